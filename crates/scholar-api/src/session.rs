//! Bearer token issuing and validation (HS256 JWT).
//!
//! Tokens carry the caller's user id; `/reputation/me` resolves to it.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Session token error
#[derive(Debug, Error)]
pub enum SessionError {
    /// JWT encoding failed
    #[error("Failed to encode JWT: {0}")]
    JwtEncode(#[from] jsonwebtoken::errors::Error),

    /// System clock is before the Unix epoch
    #[error("System clock unavailable")]
    Clock,

    /// No Authorization header
    #[error("Missing bearer token")]
    MissingToken,

    /// Authorization header present but not `Bearer <token>`
    #[error("Malformed Authorization header")]
    MalformedHeader,

    /// Token expired
    #[error("Session token expired")]
    TokenExpired,

    /// Invalid token
    #[error("Invalid session token")]
    InvalidToken,
}

impl SessionError {
    /// Whether the error is the caller's fault (401) rather than ours (500)
    pub fn is_unauthorized(&self) -> bool {
        !matches!(self, SessionError::JwtEncode(_) | SessionError::Clock)
    }
}

/// JWT claims for session tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User identifier
    pub user_id: String,

    /// Token expiration timestamp (Unix epoch)
    pub exp: u64,

    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
}

/// Session manager handles JWT token generation and validation
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_secs: u64,
}

fn now_secs() -> Result<u64, SessionError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| SessionError::Clock)
}

impl SessionManager {
    /// Create a new session manager with the given JWT secret and expiry
    pub fn new(jwt_secret: &str, token_expiry_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_expiry_secs,
        }
    }

    /// Generate a new session token for the given user
    pub fn generate_token(&self, user_id: &str) -> Result<String, SessionError> {
        let now = now_secs()?;

        let claims = SessionClaims {
            user_id: user_id.to_string(),
            exp: now + self.token_expiry_secs,
            iat: now,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a session token and extract claims
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let validation = Validation::default();
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::TokenExpired,
                _ => SessionError::InvalidToken,
            })?;

        Ok(token_data.claims)
    }

    /// Validate the value of an `Authorization` header
    pub fn validate_header(&self, header: Option<&str>) -> Result<SessionClaims, SessionError> {
        let value = header.ok_or(SessionError::MissingToken)?;
        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(SessionError::MalformedHeader)?;
        self.validate_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_validate_token() {
        let manager = SessionManager::new("test-secret", 3600);
        let token = manager.generate_token("test-user").unwrap();

        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.user_id, "test-user");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token() {
        let manager = SessionManager::new("test-secret", 3600);
        let now = now_secs().unwrap();

        // Past the default 60s validation leeway
        let claims = SessionClaims {
            user_id: "test-user".to_string(),
            exp: now - 100,
            iat: now - 200,
        };

        let token = encode(&Header::default(), &claims, &manager.encoding_key).unwrap();

        let result = manager.validate_token(&token);
        assert!(matches!(result, Err(SessionError::TokenExpired)));
    }

    #[test]
    fn test_invalid_token() {
        let manager = SessionManager::new("test-secret", 3600);
        let result = manager.validate_token("invalid-token");
        assert!(matches!(result, Err(SessionError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret() {
        let manager1 = SessionManager::new("secret1", 3600);
        let manager2 = SessionManager::new("secret2", 3600);

        let token = manager1.generate_token("test-user").unwrap();
        let result = manager2.validate_token(&token);
        assert!(matches!(result, Err(SessionError::InvalidToken)));
    }

    #[test]
    fn test_header_parsing() {
        let manager = SessionManager::new("test-secret", 3600);
        let token = manager.generate_token("alice").unwrap();

        let claims = manager
            .validate_header(Some(&format!("Bearer {}", token)))
            .unwrap();
        assert_eq!(claims.user_id, "alice");

        assert!(matches!(
            manager.validate_header(None),
            Err(SessionError::MissingToken)
        ));
        assert!(matches!(
            manager.validate_header(Some(&format!("Basic {}", token))),
            Err(SessionError::MalformedHeader)
        ));
        assert!(matches!(
            manager.validate_header(Some("Bearer ")),
            Err(SessionError::MalformedHeader)
        ));
    }

    #[test]
    fn test_unauthorized_classification() {
        assert!(SessionError::TokenExpired.is_unauthorized());
        assert!(SessionError::MissingToken.is_unauthorized());
        assert!(!SessionError::Clock.is_unauthorized());
    }
}
