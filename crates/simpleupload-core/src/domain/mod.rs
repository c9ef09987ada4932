//! Domain entities and business logic
//!
//! This module contains the core domain types for SimpleUpload:
//! - Filename normalization and directory suggestion rules
//! - Upload value types (local target, remote file, move result)
//! - The upload workflow state machine
//! - Domain-specific error types

pub mod errors;
pub mod filename;
pub mod upload;
pub mod workflow;

// Re-export commonly used types
pub use errors::{ApiError, DomainError};
pub use filename::{
    capitalize_and_clean, extension_of, is_invalid_filename, suggest_directory,
    INVALID_FILENAME_WARNING,
};
pub use upload::{destination_path, MovedFile, RemoteFile, UploadTarget};
pub use workflow::{WorkflowPhase, WorkflowState, DIRECTORY_LISTING_FAILED};
