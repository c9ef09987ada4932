//! Integration tests for streamed multipart uploads

use std::sync::{Arc, Mutex};

use simpleupload_client::upload::CHUNK_SIZE;
use simpleupload_core::ports::{IUploadApi, ProgressCallback};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

fn progress_recorder() -> (ProgressCallback, Arc<Mutex<Vec<(u64, u64)>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = calls.clone();
    let callback: ProgressCallback = Arc::new(move |sent, total| {
        sink.lock().unwrap().push((sent, total));
    });
    (callback, calls)
}

#[tokio::test]
async fn test_upload_sends_multipart_file_part() {
    let (server, client) = common::setup_server().await;

    Mock::given(method("POST"))
        .and(path("/api/uploads"))
        .and(header("X-Upload-Key", common::TEST_KEY))
        .and(body_string_contains(
            r#"Content-Disposition: form-data; name="file"; filename="report.pdf""#,
        ))
        .and(body_string_contains("Content-Type: application/octet-stream"))
        .and(body_string_contains("%PDF-1.4 test content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "file": "a1b2c3-report.pdf"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let remote = client
        .upload("report.pdf", b"%PDF-1.4 test content".to_vec(), None)
        .await
        .expect("upload failed");

    assert_eq!(remote.as_str(), "a1b2c3-report.pdf");
}

#[tokio::test]
async fn test_upload_without_key_omits_header() {
    let (server, client) = common::setup_server_without_key().await;
    common::mount_upload(&server, "uploaded.txt").await;

    client
        .upload("notes.txt", b"hello".to_vec(), None)
        .await
        .expect("upload failed");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("x-upload-key").is_none());
}

#[tokio::test]
async fn test_upload_reports_progress_per_chunk() {
    let (server, client) = common::setup_server().await;
    common::mount_upload(&server, "big.bin").await;

    let content: Vec<u8> = (0..(CHUNK_SIZE * 3 + 123)).map(|i| (i % 251) as u8).collect();
    let total = content.len() as u64;
    let (callback, calls) = progress_recorder();

    client
        .upload("big.bin", content.clone(), Some(callback))
        .await
        .expect("upload failed");

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 4);
    assert!(calls.windows(2).all(|w| w[0].0 <= w[1].0));
    assert!(calls.iter().all(|(_, t)| *t == total));
    assert_eq!(calls.last(), Some(&(total, total)));

    // The server received the whole file
    let requests = server.received_requests().await.unwrap();
    let body = &requests[0].body;
    assert!(body
        .windows(content.len())
        .any(|window| window == content.as_slice()));
}

#[tokio::test]
async fn test_upload_empty_file_reports_no_progress() {
    let (server, client) = common::setup_server().await;
    common::mount_upload(&server, "empty.txt").await;
    let (callback, calls) = progress_recorder();

    let remote = client
        .upload("empty.txt", Vec::new(), Some(callback))
        .await
        .expect("upload failed");

    assert_eq!(remote.as_str(), "empty.txt");
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_blank_remote_is_deserialization_error() {
    let (server, client) = common::setup_server().await;
    common::mount_upload(&server, "").await;

    let err = client
        .upload("a.txt", b"x".to_vec(), None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "deserialization");
}
