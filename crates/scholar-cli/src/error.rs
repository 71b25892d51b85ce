//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection error (network, DNS, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-success response from the API
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message reported by the server
        message: String,
    },

    /// Token missing, expired or rejected
    #[error("Unauthorized: {0}. Set a token with 'scholar profile add <name> --url <url> --token <jwt>'")]
    Unauthorized(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            CliError::Connection(e.to_string())
        } else if e.is_decode() {
            CliError::Api {
                status: e.status().map(|s| s.as_u16()).unwrap_or(200),
                message: format!("Unexpected response body: {}", e),
            }
        } else {
            CliError::Connection(e.to_string())
        }
    }
}
