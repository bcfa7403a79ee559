//! Configuration module for bot-admin
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`BOT_ADMIN_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use bot_admin::config::AdminConfig;
//!
//! let config = AdminConfig::default();
//! assert_eq!(config.dashboard.poll_interval_seconds, 30);
//!
//! let toml = r#"
//! [server]
//! base_url = "http://bots.internal:8080"
//! "#;
//! let config: AdminConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.base_url, "http://bots.internal:8080");
//! ```

pub mod dashboard;
pub mod error;
pub mod logging;
pub mod server;

pub use dashboard::DashboardConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Bot server connection settings
    pub server: ServerConfig,
    /// Polling and bot catalog settings
    pub dashboard: DashboardConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AdminConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("BOT_ADMIN_URL") {
            self.server.base_url = url;
        }
        if let Ok(interval) = std::env::var("BOT_ADMIN_POLL_INTERVAL") {
            if let Ok(secs) = interval.parse() {
                self.dashboard.poll_interval_seconds = secs;
            }
        }
        if let Ok(level) = std::env::var("BOT_ADMIN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("BOT_ADMIN_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation {
                field: "server.base_url".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation {
                field: "server.base_url".to_string(),
                message: format!("expected an http(s) URL, got '{}'", url),
            });
        }
        if self.server.request_timeout_seconds == Some(0) {
            return Err(ConfigError::Validation {
                field: "server.request_timeout_seconds".to_string(),
                message: "timeout must be non-zero when set".to_string(),
            });
        }

        self.dashboard.validate()
    }
}
