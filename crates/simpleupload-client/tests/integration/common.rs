//! Shared test helpers for upload server integration tests
//!
//! Each helper mounts the necessary mock endpoints on a wiremock server.
//! [`setup_server`] returns an UploadClient pointing at it.

use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use simpleupload_client::UploadClient;

/// Upload key used by [`setup_server`]
pub const TEST_KEY: &str = "test-upload-key";

/// Starts a mock server and returns a client configured with [`TEST_KEY`]
pub async fn setup_server() -> (MockServer, UploadClient) {
    let server = MockServer::start().await;
    let client =
        UploadClient::new(server.uri(), Some(TEST_KEY.to_string())).expect("client creation");
    (server, client)
}

/// Starts a mock server and returns a client without an upload key
pub async fn setup_server_without_key() -> (MockServer, UploadClient) {
    let server = MockServer::start().await;
    let client = UploadClient::new(server.uri(), None).expect("client creation");
    (server, client)
}

/// Mounts `POST /api/uploads` answering `{"file": remote}`
pub async fn mount_upload(server: &MockServer, remote: &str) {
    Mock::given(method("POST"))
        .and(path("/api/uploads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "file": remote
        })))
        .mount(server)
        .await;
}

/// Mounts `GET /api/uploads` answering with `entries`
pub async fn mount_uploads_list(server: &MockServer, entries: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/api/uploads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entries))
        .mount(server)
        .await;
}

/// Mounts `GET /api/saved?dirs=1` answering with `dirs`
pub async fn mount_saved_dirs(server: &MockServer, dirs: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/api/saved"))
        .and(query_param("dirs", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dirs))
        .mount(server)
        .await;
}

/// Mounts `GET /api/saved` (no `dirs` parameter) answering with `files`
pub async fn mount_saved_files(server: &MockServer, files: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/api/saved"))
        .and(query_param_is_missing("dirs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(files))
        .mount(server)
        .await;
}

/// Mounts `POST /api/saved` answering `{"moved": moved}`
pub async fn mount_move(server: &MockServer, moved: &str) {
    Mock::given(method("POST"))
        .and(path("/api/saved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "moved": moved
        })))
        .mount(server)
        .await;
}
