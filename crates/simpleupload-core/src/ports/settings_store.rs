//! Settings store port
//!
//! Key-value access to the two user settings the upload client needs:
//! the server endpoint and the optional upload key. Values are persisted
//! across sessions by the implementation (see
//! [`FileSettingsStore`](crate::config::FileSettingsStore)).

/// Port trait for persisted user settings
pub trait ISettingsStore: Send + Sync {
    /// Returns the configured upload key, if any
    fn upload_key(&self) -> Option<String>;

    /// Stores a new upload key
    fn set_upload_key(&self, key: &str) -> anyhow::Result<()>;

    /// Returns the configured server endpoint, if any
    fn endpoint(&self) -> Option<String>;

    /// Stores a new server endpoint
    fn set_endpoint(&self, endpoint: &str) -> anyhow::Result<()>;
}
