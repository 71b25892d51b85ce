//! JSON response bodies and conversions from domain types.

use scholar_domain::{Breakdown, ReputationScore, Trend};
use serde::{Deserialize, Serialize};

/// `ReputationScore` as served over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationResponse {
    /// Sum of the breakdown
    pub score: u64,
    /// Weighted per-category values
    pub breakdown: BreakdownResponse,
    /// Percentile (0-100)
    pub percentile: u32,
    /// "up", "down" or "stable"
    pub trend: TrendResponse,
}

/// All eight categories, always present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownResponse {
    /// Weighted projects
    pub projects: u64,
    /// Weighted papers
    pub papers: u64,
    /// Weighted proposals
    pub proposals: u64,
    /// Weighted reviews
    pub reviews: u64,
    /// Not modeled, always 0
    pub patents: u64,
    /// Weighted collaborations
    pub collaborations: u64,
    /// Not modeled, always 0
    pub funding: u64,
    /// Weighted credentials
    pub credentials: u64,
}

/// Serialized trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendResponse {
    /// Score rising
    Up,
    /// Score falling
    Down,
    /// Score unchanged
    Stable,
}

impl From<Trend> for TrendResponse {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Up => TrendResponse::Up,
            Trend::Down => TrendResponse::Down,
            Trend::Stable => TrendResponse::Stable,
        }
    }
}

impl From<Breakdown> for BreakdownResponse {
    fn from(b: Breakdown) -> Self {
        Self {
            projects: b.projects,
            papers: b.papers,
            proposals: b.proposals,
            reviews: b.reviews,
            patents: b.patents,
            collaborations: b.collaborations,
            funding: b.funding,
            credentials: b.credentials,
        }
    }
}

impl From<ReputationScore> for ReputationResponse {
    fn from(r: ReputationScore) -> Self {
        Self {
            score: r.score,
            breakdown: r.breakdown.into(),
            percentile: r.percentile,
            trend: r.trend.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// "healthy" when the store answers, "unhealthy" otherwise
    pub status: String,
    /// Server version
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
