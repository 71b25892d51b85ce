//! HTTP client for the Scholar API.

use crate::error::{CliError, Result};
use scholar_domain::Category;
use serde::{Deserialize, Serialize};

/// Reputation body returned by every `/reputation/*` route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationResponse {
    /// Sum of the breakdown
    pub score: u64,
    /// Weighted per-category values
    pub breakdown: BreakdownResponse,
    /// Percentile (0-100)
    pub percentile: u32,
    /// "up", "down" or "stable"
    pub trend: String,
}

/// Weighted value per category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakdownResponse {
    pub projects: u64,
    pub papers: u64,
    pub proposals: u64,
    pub reviews: u64,
    pub patents: u64,
    pub collaborations: u64,
    pub funding: u64,
    pub credentials: u64,
}

impl BreakdownResponse {
    /// Weighted value for a category
    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Projects => self.projects,
            Category::Papers => self.papers,
            Category::Proposals => self.proposals,
            Category::Reviews => self.reviews,
            Category::Patents => self.patents,
            Category::Collaborations => self.collaborations,
            Category::Funding => self.funding,
            Category::Credentials => self.credentials,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Scholar API client
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url`, authenticating with `token` if given
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// GET /reputation/me
    pub async fn my_reputation(&self) -> Result<ReputationResponse> {
        self.get_reputation(&["reputation", "me"]).await
    }

    /// GET /reputation/user/:user_id
    pub async fn user_reputation(&self, user_id: &str) -> Result<ReputationResponse> {
        self.get_reputation(&["reputation", "user", user_id]).await
    }

    /// GET /reputation/institution/:institution_id
    pub async fn institution_reputation(
        &self,
        institution_id: &str,
    ) -> Result<ReputationResponse> {
        self.get_reputation(&["reputation", "institution", institution_id])
            .await
    }

    /// Base URL with `segments` appended, each percent-encoded as one
    /// path segment
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| CliError::Config(format!("Invalid API URL '{}': {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| CliError::Config(format!("Invalid API URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get_reputation(&self, segments: &[&str]) -> Result<ReputationResponse> {
        let url = self.endpoint(segments)?;

        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_response(status.as_u16(), &body));
        }

        Ok(response.json().await?)
    }
}

/// Map a non-success response to a CLI error
///
/// The server reports failures as `{"error": "..."}`; any other body is
/// passed through as-is.
pub fn error_from_response(status: u16, body: &str) -> CliError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            }
        });

    if status == 401 {
        CliError::Unauthorized(message)
    } else {
        CliError::Api { status, message }
    }
}
