//! IUploadApi implementation for the SimpleUpload HTTP server
//!
//! Delegates to [`UploadClient`] for requests and to the [`upload`] module
//! for the streamed multipart body.

use simpleupload_core::domain::{ApiError, MovedFile, RemoteFile};
use simpleupload_core::ports::{IUploadApi, ProgressCallback};

use crate::client::UploadClient;
use crate::upload;

#[async_trait::async_trait]
impl IUploadApi for UploadClient {
    async fn upload(
        &self,
        filename: &str,
        content: Vec<u8>,
        progress: Option<ProgressCallback>,
    ) -> Result<RemoteFile, ApiError> {
        upload::upload_file(self, filename, content, progress).await
    }

    async fn list_uploads(&self) -> Result<Vec<String>, ApiError> {
        UploadClient::list_uploads(self).await
    }

    async fn list_saved_files(&self) -> Result<Vec<String>, ApiError> {
        UploadClient::list_saved_files(self).await
    }

    async fn list_saved_dirs(&self) -> Result<Vec<String>, ApiError> {
        UploadClient::list_saved_dirs(self).await
    }

    async fn move_file(&self, upload: &str, saved: &str) -> Result<MovedFile, ApiError> {
        UploadClient::move_file(self, upload, saved).await
    }
}
