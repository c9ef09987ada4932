//! Config command - View and manage SimpleUpload configuration
//!
//! Provides the `simpleupload config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON), upload key masked
//! 2. Sets individual configuration values via dot-notation keys
//! 3. Validates the configuration file and reports errors
//!
//! A configuration file that does not parse is never overwritten: every
//! subcommand fails on it and exits with status 1.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use simpleupload_core::config::{Config, FileSettingsStore};
use simpleupload_core::ports::ISettingsStore;
use tracing::info;

use super::CommandContext;

/// Keys accepted by `config set`
const SUPPORTED_KEYS: &[&str] = &["server.endpoint", "server.upload_key", "logging.level"];

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key: server.endpoint, server.upload_key or logging.level
        key: String,
        /// New value ('none' or an empty string clears the server settings)
        value: String,
    },
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(ctx).await,
            ConfigCommand::Set { key, value } => self.execute_set(key, value, ctx).await,
            ConfigCommand::Validate => self.execute_validate(ctx).await,
        }
    }

    /// Show current configuration
    async fn execute_show(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let store = ctx.settings()?;
        let config = masked(store.config());

        info!(config_path = %store.path().display(), "Showing configuration");

        if ctx.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", store.path().display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;

            for line in yaml.lines() {
                formatter.info(line);
            }
        }

        Ok(())
    }

    /// Set a configuration value using dot-notation
    async fn execute_set(&self, key: &str, value: &str, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let store = ctx.settings()?;
        let setting = Setting::parse(key, value)?;

        info!(key = %key, "Setting configuration value");

        // Only problems with the key being set block the write
        let mut candidate = store.config();
        setting.apply(&mut candidate);
        let problems: Vec<String> = candidate
            .validate()
            .into_iter()
            .filter(|e| e.field == key)
            .map(|e| e.message)
            .collect();
        if !problems.is_empty() {
            bail!("Invalid value for '{}': {}", key, problems.join("; "));
        }

        let shown = setting.shown();
        setting
            .persist(&store)
            .context("Failed to write configuration file")?;

        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "key": key,
                "value": shown,
                "config_path": store.path().display().to_string(),
            }));
        } else {
            formatter.success(&format!("Set {} = {}", key, shown));
            formatter.info(&format!("Saved to {}", store.path().display()));
        }

        Ok(())
    }

    /// Validate configuration file
    async fn execute_validate(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let config_path = &ctx.config_path;

        if !config_path.exists() {
            if ctx.is_json() {
                formatter.print_json(&serde_json::json!({
                    "valid": true,
                    "config_path": config_path.display().to_string(),
                    "errors": [],
                    "note": "Configuration file not found. Using defaults.",
                }));
            } else {
                formatter.info(&format!(
                    "Configuration file not found at {}",
                    config_path.display()
                ));
                formatter.info(
                    "Run 'simpleupload config set server.endpoint <url>' to create one.",
                );
            }
            return Ok(());
        }

        let config = Config::load(config_path).with_context(|| {
            format!("Failed to parse configuration at {}", config_path.display())
        })?;

        info!(config_path = %config_path.display(), "Validating configuration");

        let errors = config.validate();

        if ctx.is_json() {
            let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            formatter.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": config_path.display().to_string(),
                "errors": error_strings,
            }));
        } else if errors.is_empty() {
            formatter.success("Configuration is valid");
            formatter.info(&format!("File: {}", config_path.display()));
        } else {
            formatter.info(&format!("File: {}", config_path.display()));
            for error in &errors {
                formatter.info(&format!("  {} - {}", error.field, error.message));
            }
        }

        if !errors.is_empty() {
            bail!(
                "Configuration has {} error{}",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            );
        }

        Ok(())
    }
}

/// A parsed `config set` assignment
#[derive(Debug, Clone, PartialEq, Eq)]
enum Setting {
    Endpoint(Option<String>),
    UploadKey(Option<String>),
    LogLevel(String),
}

impl Setting {
    /// Parses a dot-notation key and its value
    ///
    /// An empty value or `none` clears the optional server settings.
    fn parse(key: &str, value: &str) -> Result<Self> {
        let optional = if value.is_empty() || value == "none" {
            None
        } else {
            Some(value.to_string())
        };

        match key {
            "server.endpoint" => Ok(Setting::Endpoint(optional)),
            "server.upload_key" => Ok(Setting::UploadKey(optional)),
            "logging.level" => Ok(Setting::LogLevel(value.to_string())),
            _ => bail!(
                "Unknown configuration key: '{}' (supported: {})",
                key,
                SUPPORTED_KEYS.join(", ")
            ),
        }
    }

    fn apply(&self, config: &mut Config) {
        match self {
            Setting::Endpoint(endpoint) => config.server.endpoint = endpoint.clone(),
            Setting::UploadKey(key) => config.server.upload_key = key.clone(),
            Setting::LogLevel(level) => config.logging.level = level.clone(),
        }
    }

    /// Writes the value through the settings store
    fn persist(self, store: &FileSettingsStore) -> Result<()> {
        match self {
            Setting::Endpoint(Some(endpoint)) => store.set_endpoint(&endpoint),
            Setting::UploadKey(Some(key)) => store.set_upload_key(&key),
            cleared_or_level => store.update(|config| cleared_or_level.apply(config)),
        }
    }

    /// Value echoed back to the user, upload key hidden
    fn shown(&self) -> String {
        match self {
            Setting::Endpoint(Some(endpoint)) => endpoint.clone(),
            Setting::UploadKey(Some(key)) => mask(key),
            Setting::Endpoint(None) | Setting::UploadKey(None) => "none".to_string(),
            Setting::LogLevel(level) => level.clone(),
        }
    }
}

/// Returns `config` with the upload key masked
fn masked(mut config: Config) -> Config {
    config.server.upload_key = config.server.upload_key.map(|key| mask(&key));
    config
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count().clamp(4, 12))
}
