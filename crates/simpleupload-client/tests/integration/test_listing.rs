//! Integration tests for the listing endpoints

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_list_uploads() {
    let (server, client) = common::setup_server().await;
    common::mount_uploads_list(&server, &["b.txt", "a.txt"]).await;

    let uploads = client.list_uploads().await.expect("list_uploads failed");

    assert_eq!(uploads, vec!["b.txt", "a.txt"]);
}

#[tokio::test]
async fn test_list_saved_dirs_preserves_server_order() {
    let (server, client) = common::setup_server().await;
    common::mount_saved_dirs(&server, &["zip", "pdf", "Images"]).await;
    common::mount_saved_files(&server, &["pdf/old.pdf"]).await;

    let dirs = client.list_saved_dirs().await.expect("list_saved_dirs failed");

    assert_eq!(dirs, vec!["zip", "pdf", "Images"]);
}

#[tokio::test]
async fn test_list_saved_files_has_no_dirs_param() {
    let (server, client) = common::setup_server().await;
    common::mount_saved_dirs(&server, &["pdf"]).await;
    common::mount_saved_files(&server, &["pdf/old.pdf", "notes.txt"]).await;

    let files = client
        .list_saved_files()
        .await
        .expect("list_saved_files failed");

    assert_eq!(files, vec!["pdf/old.pdf", "notes.txt"]);
}

#[tokio::test]
async fn test_list_empty() {
    let (server, client) = common::setup_server().await;
    common::mount_uploads_list(&server, &[]).await;

    let uploads = client.list_uploads().await.expect("list_uploads failed");

    assert!(uploads.is_empty());
}

#[tokio::test]
async fn test_listing_sends_upload_key() {
    let (server, client) = common::setup_server().await;

    Mock::given(method("GET"))
        .and(path("/api/saved"))
        .and(query_param("dirs", "1"))
        .and(header("X-Upload-Key", common::TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(["pdf"]))
        .expect(1)
        .mount(&server)
        .await;

    let dirs = client.list_saved_dirs().await.expect("list_saved_dirs failed");
    assert_eq!(dirs, vec!["pdf"]);
}
