//! Domain error types
//!
//! This module defines the errors raised by domain operations (invalid
//! workflow transitions, missing move preconditions) and the tagged error
//! returned by every upload API call.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid state transition attempt
    #[error("Invalid state transition from {from} to {to}")]
    InvalidState {
        /// The current state
        from: String,
        /// The attempted target state
        to: String,
    },

    /// The final filename for a move was empty
    #[error("Filename must not be empty")]
    EmptyFilename,

    /// No destination directory was chosen for a move
    #[error("No destination directory selected")]
    NoDestination,

    /// The server returned an unusable remote path
    #[error("Invalid remote path: {0}")]
    InvalidRemotePath(String),
}

/// Errors returned by the upload API
///
/// Every failure that happens behind the API boundary (transport, HTTP
/// status, response shape, reading the local file) is converted into one
/// of these variants. Callers never see the underlying library errors.
/// The `Display` output is the human-readable message shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection failure, timeout or any other transport-level problem
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// Response status code
        status: u16,
        /// Status reason and response body, if any
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("{0}")]
    Deserialization(String),

    /// The selected local file could not be opened or read
    #[error("{0}")]
    LocalIo(String),
}

impl ApiError {
    /// Short name of the error kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network",
            ApiError::HttpStatus { .. } => "http_status",
            ApiError::Deserialization(_) => "deserialization",
            ApiError::LocalIo(_) => "local_io",
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::LocalIo(err.to_string())
    }
}
