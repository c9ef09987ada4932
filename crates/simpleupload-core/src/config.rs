//! Configuration module for SimpleUpload.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, saving, validation, defaults, and a builder pattern for
//! programmatic use. [`FileSettingsStore`] exposes the server settings through
//! the [`ISettingsStore`] port and persists every change.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ports::ISettingsStore;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for SimpleUpload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Upload server settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the upload server, e.g. `https://files.example.com`.
    /// `None` until the user configures it.
    pub endpoint: Option<String>,
    /// Value sent in the `X-Upload-Key` header. `None` sends no header.
    pub upload_key: Option<String>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading and saving
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Write the configuration as YAML to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create configuration directory")?;
        }
        let yaml = serde_yaml::to_string(self).context("Failed to serialize configuration")?;
        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        debug!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/simpleupload/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("simpleupload")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"server.endpoint"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid. A missing endpoint
    /// is valid here; commands that talk to the server check for it.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- server ---
        if let Some(endpoint) = &self.server.endpoint {
            match url::Url::parse(endpoint) {
                Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                    if url.query().is_some() || url.fragment().is_some() {
                        errors.push(ValidationError {
                            field: "server.endpoint".into(),
                            message: "must not contain a query string or fragment".into(),
                        });
                    }
                }
                Ok(url) => errors.push(ValidationError {
                    field: "server.endpoint".into(),
                    message: format!("unsupported scheme '{}'; use http or https", url.scheme()),
                }),
                Err(e) => errors.push(ValidationError {
                    field: "server.endpoint".into(),
                    message: format!("invalid URL '{}': {}", endpoint, e),
                }),
            }
        }
        if matches!(&self.server.upload_key, Some(key) if key.trim().is_empty()) {
            errors.push(ValidationError {
                field: "server.upload_key".into(),
                message: "must not be blank; remove the key to send no header".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust
/// use simpleupload_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .endpoint("https://files.example.com")
///     .upload_key("secret")
///     .logging_level("debug")
///     .build();
/// assert_eq!(config.server.upload_key.as_deref(), Some("secret"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder pre-populated with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.server.endpoint = Some(endpoint.into());
        self
    }

    pub fn upload_key(mut self, key: impl Into<String>) -> Self {
        self.config.server.upload_key = Some(key.into());
        self
    }

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Consume the builder and return the [`Config`] without validation.
    pub fn build(self) -> Config {
        self.config
    }
}

// ---------------------------------------------------------------------------
// FileSettingsStore
// ---------------------------------------------------------------------------

/// [`ISettingsStore`] backed by the YAML configuration file
///
/// Reads come from an in-memory copy; every write updates the copy and
/// rewrites the file so the value survives the session.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    config: RwLock<Config>,
}

impl FileSettingsStore {
    /// Opens the store at `path`
    ///
    /// A missing file yields default settings; an unreadable or malformed
    /// file is an error.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let config = if path.exists() {
            Config::load(&path)?
        } else {
            Config::default()
        };
        Ok(Self {
            path,
            config: RwLock::new(config),
        })
    }

    /// Returns the file this store persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a copy of the full configuration
    pub fn config(&self) -> Config {
        self.config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Applies `change` to the configuration and persists the result
    pub fn update(&self, change: impl FnOnce(&mut Config)) -> anyhow::Result<()> {
        let mut config = self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut updated = config.clone();
        change(&mut updated);
        updated.save(&self.path)?;
        *config = updated;
        Ok(())
    }
}

impl ISettingsStore for FileSettingsStore {
    fn upload_key(&self) -> Option<String> {
        self.config().server.upload_key.filter(|key| !key.is_empty())
    }

    fn set_upload_key(&self, key: &str) -> anyhow::Result<()> {
        let key = key.to_string();
        self.update(|config| config.server.upload_key = Some(key))
    }

    fn endpoint(&self) -> Option<String> {
        self.config().server.endpoint.filter(|e| !e.is_empty())
    }

    fn set_endpoint(&self, endpoint: &str) -> anyhow::Result<()> {
        let endpoint = endpoint.to_string();
        self.update(|config| config.server.endpoint = Some(endpoint))
    }
}
