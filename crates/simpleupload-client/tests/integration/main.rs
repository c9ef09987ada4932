//! Integration tests for simpleupload-client
//!
//! Uses wiremock to simulate the upload server and verifies end-to-end
//! behavior of the UploadClient: uploads, listings, moves, error mapping
//! and a full workflow session.

mod common;

mod test_errors;
mod test_listing;
mod test_move;
mod test_upload;
mod test_workflow;
