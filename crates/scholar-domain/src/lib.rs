//! Scholar Domain Layer
//!
//! Core model for the research-collaboration platform's reputation scoring.
//! The only external dependency is `uuid`; everything else here is plain
//! data, value objects, and the trait the persistence layer implements.
//!
//! ## Key Concepts
//!
//! - **Contribution records**: projects, papers, proposals, reviews,
//!   credentials and memberships owned by users
//! - **Cohort**: the set of users a reputation is computed over (one user,
//!   or the active members of an institution)
//! - **Breakdown**: weighted per-category values that sum to the score
//! - **Reputation score**: computed on demand, never persisted
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod id;
pub mod reputation;
pub mod traits;

// Re-exports for convenience
pub use entity::{
    Credential, CredentialStatus, Institution, Membership, MembershipStatus, Paper, Project,
    Proposal, Review, User,
};
pub use id::{InstitutionId, ProjectId, RecordId, UserId};
pub use reputation::{
    user_percentile, Breakdown, Category, ContributionCounts, ReputationScore, Trend,
    INSTITUTION_PERCENTILE,
};
pub use traits::{Cohort, ContributionStore};
