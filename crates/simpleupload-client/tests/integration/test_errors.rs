//! Integration tests for error classification

use simpleupload_client::UploadClient;
use simpleupload_core::domain::ApiError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_unauthorized_maps_to_http_status() {
    let (server, client) = common::setup_server().await;

    Mock::given(method("GET"))
        .and(path("/api/uploads"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let err = client.list_uploads().await.unwrap_err();

    assert_eq!(
        err,
        ApiError::HttpStatus {
            status: 401,
            message: "Unauthorized: bad key".to_string(),
        }
    );
}

#[tokio::test]
async fn test_server_error_without_body() {
    let (server, client) = common::setup_server().await;

    Mock::given(method("GET"))
        .and(path("/api/uploads"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.list_uploads().await.unwrap_err();

    assert_eq!(
        err,
        ApiError::HttpStatus {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    );
}

#[tokio::test]
async fn test_malformed_json_maps_to_deserialization() {
    let (server, client) = common::setup_server().await;

    Mock::given(method("GET"))
        .and(path("/api/uploads"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_uploads().await.unwrap_err();

    assert_eq!(err.kind(), "deserialization");
}

#[tokio::test]
async fn test_wrong_shape_maps_to_deserialization() {
    let (server, client) = common::setup_server().await;

    Mock::given(method("POST"))
        .and(path("/api/saved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "file": "not-a-move-response"
        })))
        .mount(&server)
        .await;

    let err = client.move_file("a", "b/c").await.unwrap_err();

    assert_eq!(err.kind(), "deserialization");
}

#[tokio::test]
async fn test_connection_refused_maps_to_network() {
    // Bind then drop a listener so the port is known to be closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = UploadClient::new(format!("http://{}", addr), None).unwrap();
    let err = client.list_saved_dirs().await.unwrap_err();

    assert_eq!(err.kind(), "network");
}
