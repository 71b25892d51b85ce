//! Entity module - the records reputation is computed from
//!
//! These are owned by the platform's data store. Reputation scoring only
//! reads them; the structs exist so the store can be seeded and tested.

use crate::id::{InstitutionId, ProjectId, RecordId, UserId};

/// A platform user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Account creation time (Unix seconds)
    pub created_at: u64,
}

impl User {
    /// Create a user with a freshly minted id
    pub fn new(name: impl Into<String>, created_at: u64) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            created_at,
        }
    }
}

/// An institution users can be members of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Institution {
    /// Unique identifier
    pub id: InstitutionId,

    /// Display name
    pub name: String,
}

/// A research project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,

    /// Owning user
    pub owner: UserId,

    /// Project title
    pub title: String,
}

/// A published or drafted paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paper {
    /// Unique identifier
    pub id: RecordId,

    /// Creating user
    pub creator: UserId,

    /// Paper title
    pub title: String,
}

/// A funding proposal, attributed to the owner of its project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    /// Unique identifier
    pub id: RecordId,

    /// Project the proposal was submitted for
    pub project: ProjectId,

    /// Proposal title
    pub title: String,
}

/// A review written by a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Unique identifier
    pub id: RecordId,

    /// Reviewing user
    pub reviewer: UserId,

    /// Proposal under review, if any
    pub proposal: Option<RecordId>,
}

/// A credential held by a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Unique identifier
    pub id: RecordId,

    /// Holding user
    pub user: UserId,

    /// Free-form credential kind (degree, license, ...)
    pub kind: String,

    /// Verification status
    pub status: CredentialStatus,
}

/// Verification state of a credential
///
/// Only `Verified` credentials contribute to reputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialStatus {
    /// Submitted, awaiting verification
    Pending,

    /// Verified by the platform
    Verified,

    /// Verification failed
    Rejected,

    /// Was verified, no longer valid
    Expired,
}

impl CredentialStatus {
    /// Get the status as stored (upper case)
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialStatus::Pending => "PENDING",
            CredentialStatus::Verified => "VERIFIED",
            CredentialStatus::Rejected => "REJECTED",
            CredentialStatus::Expired => "EXPIRED",
        }
    }
}

/// A user's membership in an institution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    /// Unique identifier
    pub id: RecordId,

    /// Member user
    pub user: UserId,

    /// Institution
    pub institution: InstitutionId,

    /// Membership status
    pub status: MembershipStatus,
}

/// State of a membership
///
/// Only `Active` memberships count as collaborations and define an
/// institution's cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipStatus {
    /// Invited or requested, not yet accepted
    Pending,

    /// Current member
    Active,

    /// Temporarily suspended
    Suspended,

    /// Former member
    Left,
}

impl MembershipStatus {
    /// Get the status as stored (upper case)
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "PENDING",
            MembershipStatus::Active => "ACTIVE",
            MembershipStatus::Suspended => "SUSPENDED",
            MembershipStatus::Left => "LEFT",
        }
    }
}
