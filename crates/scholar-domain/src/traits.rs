//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{InstitutionId, UserId};

/// The set of users a count is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cohort {
    /// A single user ("equals" filter)
    User(UserId),

    /// A list of users ("in-set" filter). An empty list matches nothing.
    Members(Vec<UserId>),
}

impl Cohort {
    /// User ids covered by this cohort
    pub fn user_ids(&self) -> &[UserId] {
        match self {
            Cohort::User(id) => std::slice::from_ref(id),
            Cohort::Members(ids) => ids,
        }
    }

    /// True when the cohort cannot match any record
    pub fn is_empty(&self) -> bool {
        self.user_ids().is_empty()
    }
}

/// Read-side access to the contribution records reputation is built from
///
/// Implemented by the infrastructure layer (scholar-store). Every method is
/// an independent read; callers may issue them concurrently.
pub trait ContributionStore {
    /// Error type for store operations
    type Error;

    /// Projects owned by the cohort
    fn count_projects(&self, cohort: &Cohort) -> Result<u64, Self::Error>;

    /// Papers created by the cohort
    fn count_papers(&self, cohort: &Cohort) -> Result<u64, Self::Error>;

    /// Proposals whose project is owned by the cohort
    fn count_proposals(&self, cohort: &Cohort) -> Result<u64, Self::Error>;

    /// Reviews written by the cohort
    fn count_reviews(&self, cohort: &Cohort) -> Result<u64, Self::Error>;

    /// Credentials held by the cohort with status VERIFIED
    fn count_verified_credentials(&self, cohort: &Cohort) -> Result<u64, Self::Error>;

    /// A user's memberships with status ACTIVE, across all institutions
    fn count_active_memberships(&self, user: &UserId) -> Result<u64, Self::Error>;

    /// User id of every ACTIVE membership in the institution
    ///
    /// One entry per membership, so a user holding two active memberships in
    /// the same institution appears twice.
    fn active_members(&self, institution: &InstitutionId) -> Result<Vec<UserId>, Self::Error>;

    /// Total number of users
    fn count_users(&self) -> Result<u64, Self::Error>;

    /// Number of users other than `user`
    fn count_users_except(&self, user: &UserId) -> Result<u64, Self::Error>;
}
