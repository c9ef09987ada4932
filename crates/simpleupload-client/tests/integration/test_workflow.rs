//! End-to-end workflow session against a mock server
//!
//! Drives the core UploadWorkflow through the real HTTP client.

use std::io::Write;
use std::sync::Arc;

use simpleupload_core::domain::{capitalize_and_clean, WorkflowPhase, DIRECTORY_LISTING_FAILED};
use simpleupload_core::usecases::{UploadWorkflow, WorkflowError};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

fn local_file(content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

#[tokio::test]
async fn test_session_upload_suggest_and_move() {
    let (server, client) = common::setup_server().await;
    common::mount_upload(&server, "x9-annual_report.pdf").await;
    common::mount_saved_dirs(&server, &["images", "pdf"]).await;

    Mock::given(method("POST"))
        .and(path("/api/saved"))
        .and(body_string_contains("upload=x9-annual_report.pdf"))
        .and(body_string_contains("saved=pdf%2FannualReport.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "moved": "pdf/annualReport.pdf"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let workflow = UploadWorkflow::new(Arc::new(client));
    let file = local_file(b"%PDF-1.4");
    workflow
        .select_file(
            Some(file.path().to_path_buf()),
            Some("annual report.pdf".to_string()),
        )
        .unwrap();

    workflow.upload().await.expect("upload failed");
    let state = workflow.state();
    assert_eq!(state.phase().name(), "Uploaded");
    assert_eq!(state.suggested_dir(), Some("pdf"));

    let name = capitalize_and_clean(state.selected_filename().unwrap(), Some("pdf"));
    assert_eq!(name, "annualReport.pdf");

    let moved = workflow
        .move_to(state.suggested_dir().unwrap(), &name)
        .await
        .expect("move failed");
    assert_eq!(moved.moved_to, "pdf/annualReport.pdf");
    assert_eq!(workflow.state().phase(), &WorkflowPhase::Idle);
}

#[tokio::test]
async fn test_session_directory_listing_failure() {
    let (server, client) = common::setup_server().await;
    common::mount_upload(&server, "x1.bin").await;

    Mock::given(method("GET"))
        .and(path("/api/saved"))
        .and(query_param("dirs", "1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let workflow = UploadWorkflow::new(Arc::new(client));
    let file = local_file(b"data");
    workflow.select_path(file.path()).unwrap();

    workflow.upload().await.expect("upload failed");

    let state = workflow.state();
    assert_eq!(state.phase().name(), "Uploaded");
    assert_eq!(state.error(), Some(DIRECTORY_LISTING_FAILED));
}

#[tokio::test]
async fn test_session_upload_rejected_by_server() {
    let (server, client) = common::setup_server().await;

    Mock::given(method("POST"))
        .and(path("/api/uploads"))
        .respond_with(ResponseTemplate::new(413).set_body_string("too large"))
        .mount(&server)
        .await;

    let workflow = UploadWorkflow::new(Arc::new(client));
    let file = local_file(b"data");
    workflow.select_path(file.path()).unwrap();

    let err = workflow.upload().await.unwrap_err();
    assert!(matches!(err, WorkflowError::Api(_)));

    let state = workflow.state();
    assert_eq!(state.phase().name(), "FileSelected");
    let error = state.error().unwrap();
    assert!(error.starts_with("Error: HTTP 413"));
    assert!(error.ends_with("too large"));
}
