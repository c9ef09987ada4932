//! CLI subcommands
//!
//! Every command receives a [`CommandContext`] carrying the global flags
//! and knows how to open the configuration and build an HTTP client.

pub mod clean;
pub mod completions;
pub mod config;
pub mod list;
pub mod move_file;
pub mod upload;

use std::path::PathBuf;

use anyhow::{Context, Result};
use simpleupload_client::UploadClient;
use simpleupload_core::config::{Config, FileSettingsStore};

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

/// Global options shared by all subcommands
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Selected output format
    pub format: OutputFormat,
    /// Suppress informational output
    pub quiet: bool,
    /// Configuration file in use
    pub config_path: PathBuf,
}

impl CommandContext {
    /// Creates a context, falling back to the default config path
    pub fn new(format: OutputFormat, quiet: bool, config_path: Option<PathBuf>) -> Self {
        Self {
            format,
            quiet,
            config_path: config_path.unwrap_or_else(Config::default_path),
        }
    }

    /// Returns true if JSON output was requested
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Returns the formatter for the selected output format
    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.format, self.quiet)
    }

    /// Opens the persisted settings
    pub fn settings(&self) -> Result<FileSettingsStore> {
        FileSettingsStore::open(&self.config_path).with_context(|| {
            format!(
                "Failed to open configuration at {}",
                self.config_path.display()
            )
        })
    }

    /// Builds an HTTP client from the persisted settings
    pub fn client(&self) -> Result<UploadClient> {
        let settings = self.settings()?;
        UploadClient::from_settings(&settings).context(
            "Failed to create upload client \
             (configure it with 'simpleupload config set server.endpoint <url>')",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simpleupload_core::config::ConfigBuilder;

    fn context_with(config: Option<Config>) -> (tempfile::TempDir, CommandContext) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        if let Some(config) = config {
            config.save(&path).unwrap();
        }
        let ctx = CommandContext::new(OutputFormat::Human, false, Some(path));
        (dir, ctx)
    }

    #[test]
    fn test_client_requires_endpoint() {
        let (_dir, ctx) = context_with(None);
        let err = ctx.client().unwrap_err();
        assert!(format!("{:#}", err).contains("server.endpoint"));
    }

    #[test]
    fn test_client_from_config_file() {
        let config = ConfigBuilder::new()
            .endpoint("https://files.example.com/")
            .upload_key("secret")
            .build();
        let (_dir, ctx) = context_with(Some(config));

        let client = ctx.client().unwrap();
        assert_eq!(client.base_url(), "https://files.example.com");
        assert!(client.has_upload_key());
    }

    #[test]
    fn test_default_config_path() {
        let ctx = CommandContext::new(OutputFormat::Json, true, None);
        assert_eq!(ctx.config_path, Config::default_path());
        assert!(ctx.is_json());
    }
}
