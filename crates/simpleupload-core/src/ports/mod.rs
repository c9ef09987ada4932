//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IUploadApi`] - Upload server operations (upload, list, move)
//! - [`ISettingsStore`] - Persisted endpoint and upload key
//! - [`INotificationService`] - User-facing confirmations

pub mod notification;
pub mod settings_store;
pub mod upload_api;

pub use notification::{INotificationService, Notification};
pub use settings_store::ISettingsStore;
pub use upload_api::{IUploadApi, ProgressCallback};
