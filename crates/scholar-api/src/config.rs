//! Configuration file parsing for the API server.
//!
//! Loads settings from TOML files including bind address, JWT secret,
//! token expiry, database location and log filter.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// API configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// API configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// Secret used to verify bearer tokens (HS256)
    pub jwt_secret: String,

    /// Lifetime of issued tokens in seconds (default: 3600 = 1 hour)
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,

    /// SQLite database path (default: "scholar.db")
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// tracing filter used when RUST_LOG is unset (default: "info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_token_expiry() -> u64 {
    3600
}

fn default_database_path() -> String {
    "scholar.db".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl ApiConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ApiConfig = toml::from_str(contents)?;

        if config.jwt_secret.is_empty() {
            return Err(ConfigError::MissingField("jwt_secret".to_string()));
        }

        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ApiConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            jwt_secret: "test-secret-key-do-not-use-in-production".to_string(),
            token_expiry_secs: 3600,
            database_path: ":memory:".to_string(),
            log_filter: default_log_filter(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
