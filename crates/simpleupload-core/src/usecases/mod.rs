//! Use cases (interactors) for SimpleUpload
//!
//! Use cases orchestrate domain entities and port interfaces. They are
//! thin coordinators that delegate rules to the domain and I/O to ports.
//!
//! ## Use Cases
//!
//! - [`UploadWorkflow`] - Select a file, upload it, move it to a saved directory

pub mod upload_workflow;

pub use upload_workflow::{UploadWorkflow, WorkflowError};
