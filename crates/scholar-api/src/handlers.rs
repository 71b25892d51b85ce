//! HTTP request handlers for the reputation API.
//!
//! Implements the reputation endpoints and the health check using axum.

use crate::auth::AuthUser;
use crate::response::{ErrorResponse, HealthCheckResponse, ReputationResponse};
use crate::session::{SessionError, SessionManager};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use scholar_domain::{InstitutionId, UserId};
use scholar_reputation::{ReputationError, ReputationService};
use scholar_store::SqliteStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Session manager for bearer token validation
    pub session_manager: Arc<SessionManager>,
    /// Reputation aggregator over the platform store
    pub reputation: Arc<ReputationService<SqliteStore>>,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Authentication failure (or token machinery failure)
    SessionError(SessionError),
    /// Aggregation failed
    ReputationError(ReputationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::SessionError(e) if e.is_unauthorized() => {
                (StatusCode::UNAUTHORIZED, e.to_string())
            }
            AppError::SessionError(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::ReputationError(e) => {
                tracing::error!("Reputation computation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to compute reputation".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::SessionError(e)
    }
}

impl From<ReputationError> for AppError {
    fn from(e: ReputationError) -> Self {
        AppError::ReputationError(e)
    }
}

/// GET /reputation/me - Caller's own reputation
async fn my_reputation(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ReputationResponse>, AppError> {
    let reputation = state.reputation.compute_user_reputation(&auth.user_id).await?;
    Ok(Json(reputation.into()))
}

/// GET /reputation/user/:user_id - Any user's reputation
async fn user_reputation(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<ReputationResponse>, AppError> {
    let user_id = UserId::from_string(user_id);
    let reputation = state.reputation.compute_user_reputation(&user_id).await?;
    Ok(Json(reputation.into()))
}

/// GET /reputation/institution/:institution_id - Institution reputation
async fn institution_reputation(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(institution_id): Path<String>,
) -> Result<Json<ReputationResponse>, AppError> {
    let institution_id = InstitutionId::from_string(institution_id);
    let reputation = state
        .reputation
        .compute_institution_reputation(&institution_id)
        .await?;
    Ok(Json(reputation.into()))
}

/// GET /health - Store liveness
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthCheckResponse>) {
    let store = state.reputation.store().clone();
    let healthy = matches!(
        tokio::task::spawn_blocking(move || store.ping()).await,
        Ok(Ok(()))
    );

    let (code, status) = if healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthCheckResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/reputation/me", get(my_reputation))
        .route("/reputation/user/:user_id", get(user_reputation))
        .route(
            "/reputation/institution/:institution_id",
            get(institution_reputation),
        )
        .route("/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt; // for oneshot

    fn create_test_state() -> AppState {
        let session_manager = Arc::new(SessionManager::new("test-secret", 3600));
        let store = SqliteStore::new(":memory:").unwrap();

        AppState {
            session_manager,
            reputation: Arc::new(ReputationService::new(store)),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = create_test_state();
        let app = create_router(state);

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let state = create_test_state();
        let app = create_router(state);

        let request = Request::builder()
            .uri("/reputation/me")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_store_failure_maps_to_500() {
        let err = AppError::from(ReputationError::Store("disk I/O error".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_clock_failure_is_not_unauthorized() {
        let response = AppError::from(SessionError::Clock).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
