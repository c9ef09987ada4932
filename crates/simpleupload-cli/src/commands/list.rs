//! Listing commands - `dirs`, `uploads` and `saved`
//!
//! Each prints one server listing, in server order.

use anyhow::{Context, Result};
use simpleupload_core::ports::IUploadApi;
use tracing::info;

use super::CommandContext;

/// Which server listing to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Files uploaded but not moved yet
    Uploads,
    /// Files in the saved area
    SavedFiles,
    /// Directories uploads can be moved into
    SavedDirs,
}

impl Listing {
    fn title(self) -> &'static str {
        match self {
            Listing::Uploads => "Pending uploads",
            Listing::SavedFiles => "Saved files",
            Listing::SavedDirs => "Saved directories",
        }
    }

    fn json_key(self) -> &'static str {
        match self {
            Listing::Uploads => "uploads",
            Listing::SavedFiles => "saved",
            Listing::SavedDirs => "dirs",
        }
    }

    async fn fetch(self, api: &dyn IUploadApi) -> Result<Vec<String>> {
        let entries = match self {
            Listing::Uploads => api.list_uploads().await,
            Listing::SavedFiles => api.list_saved_files().await,
            Listing::SavedDirs => api.list_saved_dirs().await,
        };
        entries.with_context(|| format!("Failed to list {}", self.title().to_lowercase()))
    }

    /// Execute the listing command
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let client = ctx.client()?;

        info!(listing = self.json_key(), "Fetching listing");
        let entries = self.fetch(&client).await?;

        if ctx.is_json() {
            let mut body = serde_json::Map::new();
            body.insert(self.json_key().to_string(), serde_json::json!(entries));
            formatter.print_json(&serde_json::Value::Object(body));
        } else if entries.is_empty() {
            formatter.success(&format!("{}: none", self.title()));
        } else {
            formatter.success(&format!("{} ({})", self.title(), entries.len()));
            for entry in &entries {
                formatter.info(entry);
            }
        }

        Ok(())
    }
}
