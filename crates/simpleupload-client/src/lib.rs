//! SimpleUpload Client - HTTP client for the SimpleUpload server
//!
//! Provides an async client for:
//! - Streamed multipart uploads with progress reporting
//! - Listing pending uploads, saved files and saved directories
//! - Moving an upload into a saved directory
//!
//! ## Modules
//!
//! - [`client`] - HTTP client, request construction and response handling
//! - [`upload`] - Chunked multipart upload body
//! - [`provider`] - [`IUploadApi`](simpleupload_core::ports::IUploadApi) implementation

pub mod client;
pub mod provider;
pub mod upload;

pub use client::UploadClient;

use thiserror::Error;

/// Errors that can occur while building an [`UploadClient`]
///
/// Request failures are reported as
/// [`ApiError`](simpleupload_core::domain::ApiError) instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No server endpoint is configured
    #[error("No server endpoint configured (set server.endpoint)")]
    MissingEndpoint,

    /// The endpoint is not an absolute http(s) URL
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The rejected endpoint
        endpoint: String,
        /// Why it was rejected
        reason: String,
    },

    /// The underlying HTTP client could not be created
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
