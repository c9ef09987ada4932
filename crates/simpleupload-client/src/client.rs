//! SimpleUpload HTTP client
//!
//! Provides a typed HTTP client for the upload server. Handles the
//! `X-Upload-Key` header, endpoint construction, status classification and
//! JSON decoding into [`ApiError`]-returning calls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use simpleupload_client::UploadClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = UploadClient::new("https://files.example.com", Some("secret".into()))?;
//! for dir in client.list_saved_dirs().await? {
//!     println!("{}", dir);
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use simpleupload_core::domain::{ApiError, MovedFile};
use simpleupload_core::ports::ISettingsStore;
use tracing::{debug, info, warn};
use url::Url;

use crate::ClientError;

/// Header carrying the optional upload key
pub const UPLOAD_KEY_HEADER: &str = "X-Upload-Key";

/// Path for uploading and listing pending uploads
pub(crate) const UPLOADS_PATH: &str = "/api/uploads";

/// Path for listing saved files and moving uploads
pub(crate) const SAVED_PATH: &str = "/api/saved";

// ============================================================================
// Server response types
// ============================================================================

/// Response from `POST /api/uploads`
#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    /// Server-side path of the uploaded file
    pub(crate) file: String,
}

/// Response from `POST /api/saved`
#[derive(Debug, Deserialize)]
struct MovedResponse {
    /// Final path of the moved file
    moved: String,
}

// ============================================================================
// UploadClient
// ============================================================================

/// HTTP client for the upload server
///
/// Wraps `reqwest::Client` with the base URL and upload key. Cheap to
/// share behind an `Arc`; the settings are fixed at construction.
#[derive(Debug, Clone)]
pub struct UploadClient {
    /// The underlying HTTP client
    client: Client,
    /// Endpoint without trailing slash
    base_url: String,
    /// Upload key sent with every request, if configured
    upload_key: Option<String>,
}

impl UploadClient {
    /// Creates a client for `endpoint`
    ///
    /// A trailing `/` is stripped. An empty `upload_key` is treated as
    /// unset.
    ///
    /// # Errors
    /// Returns `ClientError::InvalidEndpoint` unless `endpoint` is an
    /// absolute `http` or `https` URL.
    pub fn new(
        endpoint: impl Into<String>,
        upload_key: Option<String>,
    ) -> Result<Self, ClientError> {
        let base_url = normalize_endpoint(&endpoint.into())?;
        let client = Client::builder()
            .user_agent(concat!("simpleupload/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            upload_key: upload_key.filter(|key| !key.is_empty()),
        })
    }

    /// Creates a client from persisted settings
    ///
    /// # Errors
    /// Returns `ClientError::MissingEndpoint` if no endpoint is configured.
    pub fn from_settings(settings: &dyn ISettingsStore) -> Result<Self, ClientError> {
        let endpoint = settings.endpoint().ok_or(ClientError::MissingEndpoint)?;
        Self::new(endpoint, settings.upload_key())
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true if requests carry an upload key
    pub fn has_upload_key(&self) -> bool {
        self.upload_key.is_some()
    }

    /// Creates a request builder for the given method and path
    ///
    /// Prepends the base URL and adds the upload key header when one is
    /// configured.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, &url);
        match &self.upload_key {
            Some(key) => builder.header(UPLOAD_KEY_HEADER, key),
            None => builder,
        }
    }

    /// Lists files uploaded but not moved yet (`GET /api/uploads`)
    pub async fn list_uploads(&self) -> Result<Vec<String>, ApiError> {
        self.get_list(self.request(Method::GET, UPLOADS_PATH), "uploads")
            .await
    }

    /// Lists files in the saved area (`GET /api/saved`)
    pub async fn list_saved_files(&self) -> Result<Vec<String>, ApiError> {
        self.get_list(self.request(Method::GET, SAVED_PATH), "saved files")
            .await
    }

    /// Lists saved directories (`GET /api/saved?dirs=1`)
    pub async fn list_saved_dirs(&self) -> Result<Vec<String>, ApiError> {
        let request = self
            .request(Method::GET, SAVED_PATH)
            .query(&[("dirs", "1")]);
        self.get_list(request, "saved directories").await
    }

    /// Moves an uploaded file to `saved` (`POST /api/saved`)
    ///
    /// # Arguments
    /// * `upload` - Server path returned by the upload
    /// * `saved` - Destination as `<directory>/<filename>`
    pub async fn move_file(&self, upload: &str, saved: &str) -> Result<MovedFile, ApiError> {
        debug!(upload, saved, "Sending move request");

        let request = self
            .request(Method::POST, SAVED_PATH)
            .form(&[("upload", upload), ("saved", saved)]);
        let response: MovedResponse = self.send_json(request).await?;

        info!(moved_to = %response.moved, "File moved");
        Ok(MovedFile {
            moved_to: response.moved,
        })
    }

    async fn get_list(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<Vec<String>, ApiError> {
        debug!("Fetching {}", what);
        let entries: Vec<String> = self.send_json(request).await?;
        debug!("Fetched {} {}", entries.len(), what);
        Ok(entries)
    }

    /// Sends `request` and decodes a 2xx JSON body into `T`
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(transport_error)?;
        let response = check_status(response).await?;

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "Malformed response body");
            ApiError::Deserialization(e.to_string())
        })
    }
}

/// Validates `endpoint` and strips trailing slashes
fn normalize_endpoint(endpoint: &str) -> Result<String, ClientError> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    let invalid = |reason: String| ClientError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

/// Maps a non-2xx response to `ApiError::HttpStatus`
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), url = %url, "Request failed");

    Err(ApiError::HttpStatus {
        status: status.as_u16(),
        message: status_message(status.canonical_reason(), &body),
    })
}

/// Builds the message for an error status from its reason and body text
fn status_message(reason: Option<&str>, body: &str) -> String {
    let reason = reason.unwrap_or("Unexpected status");
    let body = body.trim();
    if body.is_empty() {
        reason.to_string()
    } else {
        format!("{}: {}", reason, body)
    }
}

/// Maps a reqwest transport failure to `ApiError::Network`
pub(crate) fn transport_error(err: reqwest::Error) -> ApiError {
    warn!(error = %err, "Transport error");
    ApiError::Network(err.to_string())
}
