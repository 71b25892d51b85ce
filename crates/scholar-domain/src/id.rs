//! Identifier newtypes
//!
//! Ids arriving from the wider platform are opaque strings and are wrapped
//! as-is. Ids minted locally (seeding, tests) are UUIDv7 strings, which keeps
//! them chronologically sortable.

use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Mint a new UUIDv7-based identifier
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7().to_string())
            }

            /// Wrap an existing identifier without validation
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Borrow the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifier of a platform user
    UserId
);

string_id!(
    /// Identifier of an institution
    InstitutionId
);

string_id!(
    /// Identifier of a project
    ProjectId
);

string_id!(
    /// Identifier for records nothing else references by type
    /// (papers, proposals, reviews, credentials, memberships)
    RecordId
);
