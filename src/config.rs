//! Configuration system for xs.
//!
//! Provides layered configuration from multiple sources:
//!
//! 1. **Compiled defaults** - Sensible defaults built into the binary
//! 2. **User config file** - `~/.config/xs/config.toml`
//! 3. **Environment variables** - `XS_*` prefix
//! 4. **CLI arguments** - Highest priority, always wins
//!
//! Credentials are never embedded in code: the bearer token must come from
//! the config file or the `XS_BEARER_TOKEN` environment variable.
//!
//! # Example Configuration File
//!
//! ```toml
//! [credentials]
//! bearer_token = "AAAA..."
//!
//! [stream]
//! endpoint = "https://stream.twitter.com/1.1/statuses/filter.json"
//! limit = 10
//!
//! [paths]
//! db = "~/.local/share/xs/xs.db"
//!
//! [output]
//! format = "text"
//! colors = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{Result, XsError};

/// Main configuration structure for xs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed credentials.
    pub credentials: CredentialsConfig,
    /// Streaming session configuration.
    pub stream: StreamConfig,
    /// Path-related configuration.
    pub paths: PathsConfig,
    /// Output formatting configuration.
    pub output: OutputConfig,
}

/// Feed credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Bearer token for the streaming feed.
    /// Environment variable: `XS_BEARER_TOKEN`
    pub bearer_token: Option<String>,
}

/// Streaming session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Feed endpoint URL.
    /// Environment variable: `XS_ENDPOINT`
    pub endpoint: String,

    /// Number of posts to collect per session.
    /// Environment variable: `XS_LIMIT`
    pub limit: usize,
}

/// Path configuration for the database location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Path to the `SQLite` database file.
    /// Environment variable: `XS_DB`
    pub db: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format: text, json, json-pretty, csv.
    pub format: String,

    /// Enable colored output.
    pub colors: bool,

    /// Suppress non-essential output (progress bars, etc.).
    pub quiet: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            endpoint: crate::DEFAULT_ENDPOINT.to_string(),
            limit: crate::DEFAULT_SESSION_LIMIT,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            colors: true,
            quiet: false,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. User config file (~/.config/xs/config.toml)
    /// 3. Compiled defaults
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load from user config file
        if let Some(user_config) = Self::load_user_config() {
            config.merge(user_config);
        }

        // Override from environment variables
        config.apply_env_overrides();

        debug!("Configuration loaded");
        config
    }

    /// Load configuration from a specific file.
    #[must_use]
    pub fn load_from_file(path: &PathBuf) -> Option<Self> {
        if !path.exists() {
            debug!("Config file not found: {}", path.display());
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    info!("Loaded config from: {}", path.display());
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse config file {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read config file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Load the user configuration file from the standard location.
    fn load_user_config() -> Option<Self> {
        let config_path = Self::user_config_path()?;
        Self::load_from_file(&config_path)
    }

    /// Get the path to the user configuration file.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("xs").join("config.toml"))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("XS_BEARER_TOKEN") {
            self.credentials.bearer_token = Some(token);
        }
        if let Ok(endpoint) = std::env::var("XS_ENDPOINT") {
            self.stream.endpoint = endpoint;
        }
        if let Ok(limit) = std::env::var("XS_LIMIT") {
            if let Ok(n) = limit.parse() {
                self.stream.limit = n;
            }
        }
        if let Ok(db) = std::env::var("XS_DB") {
            self.paths.db = Some(PathBuf::from(db));
        }
        if let Ok(format) = std::env::var("XS_FORMAT") {
            self.output.format = format;
        }
        if std::env::var("XS_NO_COLOR").is_ok() || std::env::var("NO_COLOR").is_ok() {
            self.output.colors = false;
        }
        if std::env::var("XS_QUIET").is_ok() {
            self.output.quiet = true;
        }
    }

    /// Merge another config into this one (other takes precedence).
    fn merge(&mut self, other: Self) {
        if other.credentials.bearer_token.is_some() {
            self.credentials.bearer_token = other.credentials.bearer_token;
        }
        if other.paths.db.is_some() {
            self.paths.db = other.paths.db;
        }

        self.stream.endpoint = other.stream.endpoint;
        self.stream.limit = other.stream.limit;

        self.output.format = other.output.format;
        self.output.colors = other.output.colors;
        self.output.quiet = other.output.quiet;
    }

    /// Get the database path, using defaults if not configured.
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.paths.db.clone().unwrap_or_else(crate::default_db_path)
    }

    /// Get the bearer token, failing before any network activity if absent.
    ///
    /// # Errors
    ///
    /// Returns [`XsError::MissingCredentials`] when no token is configured
    /// or the configured token is empty.
    pub fn bearer_token(&self) -> Result<&str> {
        match self.credentials.bearer_token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(XsError::MissingCredentials),
        }
    }

    /// Generate a default configuration file content.
    #[must_use]
    pub fn default_config_content() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
