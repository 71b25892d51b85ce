//! Bearer-token extractor for authenticated routes.

use crate::handlers::{AppError, AppState};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use scholar_domain::UserId;

/// The authenticated caller, resolved from the `Authorization` header
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Caller's user id from the token claims
    pub user_id: UserId,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|v| v.to_str())
            .transpose()
            .map_err(|_| crate::session::SessionError::MalformedHeader)?;

        let claims = state.session_manager.validate_header(header).map_err(|e| {
            tracing::warn!(path = %parts.uri.path(), "Rejected request: {}", e);
            e
        })?;

        Ok(AuthUser {
            user_id: UserId::from_string(claims.user_id),
        })
    }
}
