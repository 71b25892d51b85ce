//! Scholar Reputation
//!
//! Aggregates contribution counts into reputation scores for users and
//! institutions.
//!
//! # Overview
//!
//! A score is a weighted sum over eight categories:
//!
//! | Category | Weight | Counted records |
//! |----------|--------|-----------------|
//! | projects | 3 | projects owned |
//! | papers | 5 | papers created |
//! | proposals | 2 | proposals on owned projects |
//! | reviews | 4 | reviews written |
//! | patents | 0 | not modeled |
//! | collaborations | 2 | active memberships |
//! | funding | 0 | not modeled |
//! | credentials | 1 | verified credentials |
//!
//! Scores are computed on every request from the store's current state.
//! Nothing is cached or persisted, so two calls with no intervening writes
//! return identical results.
//!
//! # Usage
//!
//! ```no_run
//! use scholar_reputation::ReputationService;
//! use scholar_store::SqliteStore;
//! use scholar_domain::InstitutionId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteStore::new("scholar.db")?;
//!     let service = ReputationService::new(store);
//!
//!     let reputation = service
//!         .compute_institution_reputation(&InstitutionId::from("inst-1"))
//!         .await?;
//!     println!("{} (percentile {})", reputation.score, reputation.percentile);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod error;
mod service;

pub use error::ReputationError;
pub use service::ReputationService;
