//! Upload operations for the SimpleUpload server
//!
//! Sends a file as a single multipart `file` part to `POST /api/uploads`.
//! The part body is a stream of fixed-size chunks so progress can be
//! reported as the transport pulls data, not only once the request ends.

use futures_util::stream::{self, Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method};
use simpleupload_core::domain::{ApiError, RemoteFile};
use simpleupload_core::ports::ProgressCallback;
use tracing::{debug, info};

use crate::client::{transport_error, UploadClient, UploadResponse, UPLOADS_PATH};

/// Size of each streamed body chunk: 64 KiB
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Content type of the uploaded part
const PART_MIME: &str = "application/octet-stream";

/// Uploads `content` under `filename`
///
/// # Arguments
/// * `client` - The configured UploadClient
/// * `filename` - File name sent in the multipart part
/// * `content` - Complete file contents
/// * `progress` - Called once per chunk handed to the transport
///
/// # Returns
/// The server-side path of the uploaded file
pub async fn upload_file(
    client: &UploadClient,
    filename: &str,
    content: Vec<u8>,
    progress: Option<ProgressCallback>,
) -> Result<RemoteFile, ApiError> {
    let total = content.len() as u64;
    debug!(filename, bytes = total, "Uploading file");

    let body = Body::wrap_stream(chunk_stream(content, progress));
    let part = Part::stream_with_length(body, total)
        .file_name(filename.to_string())
        .mime_str(PART_MIME)
        .map_err(transport_error)?;
    let form = Form::new().part("file", part);

    let request = client.request(Method::POST, UPLOADS_PATH).multipart(form);
    let response: UploadResponse = client.send_json(request).await?;

    let remote = RemoteFile::new(response.file)
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;
    info!(filename, remote = %remote, bytes = total, "Upload complete");
    Ok(remote)
}

/// Splits `content` into [`CHUNK_SIZE`] pieces, reporting progress as each
/// piece is polled
///
/// `sent` grows monotonically and the last report equals the total. Empty
/// content yields no chunks and no reports.
pub fn chunk_stream(
    content: Vec<u8>,
    progress: Option<ProgressCallback>,
) -> impl Stream<Item = Result<Vec<u8>, std::io::Error>> + Send + Sync + 'static {
    let total = content.len() as u64;
    let chunks: Vec<Vec<u8>> = content.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();
    let mut sent = 0u64;

    stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        if let Some(progress) = &progress {
            progress(sent, total);
        }
        Ok::<_, std::io::Error>(chunk)
    })
}
