//! Scholar API
//!
//! HTTP surface for reputation scores. Every reputation route requires a
//! bearer token; `/health` does not.

#![warn(missing_docs)]

pub mod auth;
pub mod config;
pub mod handlers;
pub mod response;
pub mod session;

use config::ApiConfig;
use handlers::{create_router, AppState};
use scholar_reputation::ReputationService;
use scholar_store::{SqliteStore, StoreError};
use session::SessionManager;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// API server error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Store could not be opened
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Token could not be issued
    #[error("Session error: {0}")]
    Session(#[from] session::SessionError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured filter when set.
pub fn init_tracing(config: &ApiConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Build application state from configuration
pub fn build_state(config: &ApiConfig) -> Result<AppState, ApiError> {
    let store = SqliteStore::new(&config.database_path)?;

    Ok(AppState {
        session_manager: Arc::new(SessionManager::new(
            &config.jwt_secret,
            config.token_expiry_secs,
        )),
        reputation: Arc::new(ReputationService::new(store)),
    })
}

/// Start the API HTTP server
///
/// Opens the store, builds the router and serves until the process exits.
pub async fn start_server(config: ApiConfig) -> Result<(), ApiError> {
    init_tracing(&config);

    info!("Starting Scholar API");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);
    info!("Token expiry: {} seconds", config.token_expiry_secs);

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("API listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ApiError::Server(e.to_string()))?;

    Ok(())
}

/// Mint a bearer token for `user_id` with the configured secret and expiry
pub fn issue_token(config: &ApiConfig, user_id: &str) -> Result<String, ApiError> {
    let manager = SessionManager::new(&config.jwt_secret, config.token_expiry_secs);
    Ok(manager.generate_token(user_id)?)
}
