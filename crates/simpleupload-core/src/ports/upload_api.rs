//! Upload API port (driven/secondary port)
//!
//! This module defines the interface to the upload server. The HTTP
//! implementation lives in the `simpleupload-client` crate; tests in this
//! crate use in-memory fakes.
//!
//! ## Design Notes
//!
//! - Every method returns `Result<_, ApiError>`. Implementations convert
//!   transport, status and parsing failures into `ApiError` so nothing
//!   adapter-specific crosses the port.
//! - Uses `#[async_trait]` for async trait methods.
//! - Each call is a single round-trip: no retries, no idempotency key.

use std::sync::Arc;

use crate::domain::{ApiError, MovedFile, RemoteFile};

/// Progress callback for uploads: `(bytes_sent, total_bytes)`
///
/// Implementations call it zero or more times per upload with a
/// non-decreasing `bytes_sent` and a fixed `total_bytes`.
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Port trait for the upload server
#[async_trait::async_trait]
pub trait IUploadApi: Send + Sync {
    /// Uploads `content` under `filename`
    ///
    /// # Arguments
    /// * `filename` - Name reported to the server for the uploaded file
    /// * `content` - Complete file contents
    /// * `progress` - Optional callback invoked while the body is sent
    ///
    /// # Returns
    /// The server-side handle of the uploaded (not yet moved) file
    async fn upload(
        &self,
        filename: &str,
        content: Vec<u8>,
        progress: Option<ProgressCallback>,
    ) -> Result<RemoteFile, ApiError>;

    /// Lists files that were uploaded but not moved yet
    async fn list_uploads(&self) -> Result<Vec<String>, ApiError>;

    /// Lists files stored in the saved area
    async fn list_saved_files(&self) -> Result<Vec<String>, ApiError>;

    /// Lists the saved directories an upload can be moved into
    ///
    /// Order is defined by the server and preserved.
    async fn list_saved_dirs(&self) -> Result<Vec<String>, ApiError>;

    /// Moves an uploaded file to `saved` (`<directory>/<filename>`)
    ///
    /// The server decides how to handle an existing file at the target.
    async fn move_file(&self, upload: &str, saved: &str) -> Result<MovedFile, ApiError>;
}
