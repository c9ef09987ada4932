//! Integration tests for moving uploads into saved directories

use simpleupload_core::domain::destination_path;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_move_sends_urlencoded_form() {
    let (server, client) = common::setup_server().await;

    Mock::given(method("POST"))
        .and(path("/api/saved"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(header("X-Upload-Key", common::TEST_KEY))
        .and(body_string_contains("upload=a1b2c3-report.pdf"))
        .and(body_string_contains("saved=pdf%2FReport+2024.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "moved": "pdf/Report 2024.pdf"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let saved = destination_path("pdf", "Report 2024.pdf");
    let moved = client
        .move_file("a1b2c3-report.pdf", &saved)
        .await
        .expect("move_file failed");

    assert_eq!(moved.moved_to, "pdf/Report 2024.pdf");
}

#[tokio::test]
async fn test_move_returns_server_reported_path() {
    let (server, client) = common::setup_server().await;
    common::mount_move(&server, "pdf/Report (1).pdf").await;

    let moved = client
        .move_file("abc.pdf", "pdf/Report.pdf")
        .await
        .expect("move_file failed");

    // The server may rename on conflict; the client reports what it says
    assert_eq!(moved.moved_to, "pdf/Report (1).pdf");
}

#[tokio::test]
async fn test_move_conflict_is_http_status() {
    let (server, client) = common::setup_server().await;

    Mock::given(method("POST"))
        .and(path("/api/saved"))
        .respond_with(ResponseTemplate::new(409).set_body_string("target exists"))
        .mount(&server)
        .await;

    let err = client
        .move_file("abc.pdf", "pdf/Report.pdf")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "http_status");
    assert_eq!(err.to_string(), "HTTP 409: Conflict: target exists");
}
