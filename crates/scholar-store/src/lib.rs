//! Scholar Storage Layer
//!
//! Implements the ContributionStore trait on SQLite.
//!
//! # Architecture
//!
//! - One table per record type, with an index on every ownership column
//! - Statuses stored as upper-case text
//! - A single connection shared behind a mutex, so the store can be cloned
//!   into concurrent aggregation tasks
//!
//! # Examples
//!
//! ```no_run
//! use scholar_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for contribution records
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection, OptionalExtension, Params, ToSql};
use scholar_domain::{
    Cohort, ContributionStore, Credential, CredentialStatus, Institution, InstitutionId,
    Membership, MembershipStatus, Paper, Project, Proposal, Review, User, UserId,
};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record with this id already exists
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A thread panicked while holding the connection
    #[error("Connection lock poisoned")]
    LockPoisoned,
}

/// Largest number of member ids bound into one statement.
///
/// Kept well under SQLite's host-parameter limit, which is 999 on older
/// builds.
const MEMBER_CHUNK: usize = 500;

/// SQLite-based implementation of ContributionStore
///
/// Cloning is cheap and every clone shares the same connection. Reads from
/// concurrent tasks are serialized on the connection mutex.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use scholar_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("scholar.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        tracing::debug!("SQLite schema initialized");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Cheap liveness probe used by health checks
    pub fn ping(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    fn ensure_absent(conn: &Connection, table: &str, id: &str) -> Result<(), StoreError> {
        let exists = conn
            .query_row(
                &format!("SELECT 1 FROM {} WHERE id = ?1", table),
                params![id],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        if exists {
            return Err(StoreError::Duplicate(format!("{} {}", table, id)));
        }
        Ok(())
    }

    /// Insert a user
    pub fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let conn = self.lock()?;
        Self::ensure_absent(&conn, "users", user.id.as_str())?;
        conn.execute(
            "INSERT INTO users (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![user.id.as_str(), &user.name, user.created_at as i64],
        )?;
        Ok(())
    }

    /// Insert an institution
    pub fn insert_institution(&self, institution: &Institution) -> Result<(), StoreError> {
        let conn = self.lock()?;
        Self::ensure_absent(&conn, "institutions", institution.id.as_str())?;
        conn.execute(
            "INSERT INTO institutions (id, name) VALUES (?1, ?2)",
            params![institution.id.as_str(), &institution.name],
        )?;
        Ok(())
    }

    /// Insert a project
    pub fn insert_project(&self, project: &Project) -> Result<(), StoreError> {
        let conn = self.lock()?;
        Self::ensure_absent(&conn, "projects", project.id.as_str())?;
        conn.execute(
            "INSERT INTO projects (id, owner_id, title) VALUES (?1, ?2, ?3)",
            params![project.id.as_str(), project.owner.as_str(), &project.title],
        )?;
        Ok(())
    }

    /// Insert a paper
    pub fn insert_paper(&self, paper: &Paper) -> Result<(), StoreError> {
        let conn = self.lock()?;
        Self::ensure_absent(&conn, "papers", paper.id.as_str())?;
        conn.execute(
            "INSERT INTO papers (id, creator_id, title) VALUES (?1, ?2, ?3)",
            params![paper.id.as_str(), paper.creator.as_str(), &paper.title],
        )?;
        Ok(())
    }

    /// Insert a proposal
    pub fn insert_proposal(&self, proposal: &Proposal) -> Result<(), StoreError> {
        let conn = self.lock()?;
        Self::ensure_absent(&conn, "proposals", proposal.id.as_str())?;
        conn.execute(
            "INSERT INTO proposals (id, project_id, title) VALUES (?1, ?2, ?3)",
            params![proposal.id.as_str(), proposal.project.as_str(), &proposal.title],
        )?;
        Ok(())
    }

    /// Insert a review
    pub fn insert_review(&self, review: &Review) -> Result<(), StoreError> {
        let conn = self.lock()?;
        Self::ensure_absent(&conn, "reviews", review.id.as_str())?;
        conn.execute(
            "INSERT INTO reviews (id, reviewer_id, proposal_id) VALUES (?1, ?2, ?3)",
            params![
                review.id.as_str(),
                review.reviewer.as_str(),
                review.proposal.as_ref().map(|p| p.as_str()),
            ],
        )?;
        Ok(())
    }

    /// Insert a credential
    pub fn insert_credential(&self, credential: &Credential) -> Result<(), StoreError> {
        let conn = self.lock()?;
        Self::ensure_absent(&conn, "credentials", credential.id.as_str())?;
        conn.execute(
            "INSERT INTO credentials (id, user_id, kind, status) VALUES (?1, ?2, ?3, ?4)",
            params![
                credential.id.as_str(),
                credential.user.as_str(),
                &credential.kind,
                credential.status.as_str(),
            ],
        )?;
        Ok(())
    }

    /// Insert a membership
    pub fn insert_membership(&self, membership: &Membership) -> Result<(), StoreError> {
        let conn = self.lock()?;
        Self::ensure_absent(&conn, "memberships", membership.id.as_str())?;
        conn.execute(
            "INSERT INTO memberships (id, user_id, institution_id, status) VALUES (?1, ?2, ?3, ?4)",
            params![
                membership.id.as_str(),
                membership.user.as_str(),
                membership.institution.as_str(),
                membership.status.as_str(),
            ],
        )?;
        Ok(())
    }

    /// Run `base` (a `SELECT COUNT(*) ... WHERE ...` statement) with the
    /// cohort filter on `column` appended.
    ///
    /// `Cohort::User` becomes `column = ?`. `Cohort::Members` is deduplicated
    /// and bound as `column IN (?, ?, ...)` in chunks of at most
    /// `MEMBER_CHUNK` ids, summing the per-chunk counts under one lock. An
    /// empty cohort short-circuits to zero.
    fn count_for_cohort(
        &self,
        base: &str,
        column: &str,
        cohort: &Cohort,
        extra: Vec<Box<dyn ToSql>>,
    ) -> Result<u64, StoreError> {
        if cohort.is_empty() {
            return Ok(0);
        }

        let ids: Vec<&str> = match cohort {
            Cohort::User(id) => vec![id.as_str()],
            Cohort::Members(ids) => {
                let unique: BTreeSet<&str> = ids.iter().map(UserId::as_str).collect();
                unique.into_iter().collect()
            }
        };

        let conn = self.lock()?;
        let mut total = 0;
        for chunk in ids.chunks(MEMBER_CHUNK) {
            let sql = match cohort {
                Cohort::User(_) => format!("{} AND {} = ?", base, column),
                Cohort::Members(_) => format!(
                    "{} AND {} IN ({})",
                    base,
                    column,
                    vec!["?"; chunk.len()].join(", ")
                ),
            };

            let mut params: Vec<&dyn ToSql> = extra.iter().map(|p| p.as_ref()).collect();
            params.extend(chunk.iter().map(|id| id as &dyn ToSql));

            let count: i64 = conn.query_row(&sql, &params[..], |row| row.get(0))?;
            total += to_count(count)?;
        }

        Ok(total)
    }

    fn count_simple<P: Params>(&self, sql: &str, params: P) -> Result<u64, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(sql, params, |row| row.get(0))?;
        to_count(count)
    }
}

fn to_count(count: i64) -> Result<u64, StoreError> {
    u64::try_from(count).map_err(|_| StoreError::InvalidData(format!("Negative count: {}", count)))
}

impl ContributionStore for SqliteStore {
    type Error = StoreError;

    fn count_projects(&self, cohort: &Cohort) -> Result<u64, Self::Error> {
        self.count_for_cohort(
            "SELECT COUNT(*) FROM projects WHERE 1=1",
            "owner_id",
            cohort,
            Vec::new(),
        )
    }

    fn count_papers(&self, cohort: &Cohort) -> Result<u64, Self::Error> {
        self.count_for_cohort(
            "SELECT COUNT(*) FROM papers WHERE 1=1",
            "creator_id",
            cohort,
            Vec::new(),
        )
    }

    fn count_proposals(&self, cohort: &Cohort) -> Result<u64, Self::Error> {
        self.count_for_cohort(
            "SELECT COUNT(*) FROM proposals
             JOIN projects ON projects.id = proposals.project_id
             WHERE 1=1",
            "projects.owner_id",
            cohort,
            Vec::new(),
        )
    }

    fn count_reviews(&self, cohort: &Cohort) -> Result<u64, Self::Error> {
        self.count_for_cohort(
            "SELECT COUNT(*) FROM reviews WHERE 1=1",
            "reviewer_id",
            cohort,
            Vec::new(),
        )
    }

    fn count_verified_credentials(&self, cohort: &Cohort) -> Result<u64, Self::Error> {
        self.count_for_cohort(
            "SELECT COUNT(*) FROM credentials WHERE status = ?",
            "user_id",
            cohort,
            vec![Box::new(CredentialStatus::Verified.as_str()) as Box<dyn ToSql>],
        )
    }

    fn count_active_memberships(&self, user: &UserId) -> Result<u64, Self::Error> {
        self.count_simple(
            "SELECT COUNT(*) FROM memberships WHERE user_id = ?1 AND status = ?2",
            params![user.as_str(), MembershipStatus::Active.as_str()],
        )
    }

    fn active_members(&self, institution: &InstitutionId) -> Result<Vec<UserId>, Self::Error> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT memberships.user_id FROM memberships
             JOIN users ON users.id = memberships.user_id
             WHERE memberships.institution_id = ?1 AND memberships.status = ?2
             ORDER BY memberships.id",
        )?;

        let members = stmt
            .query_map(
                params![institution.as_str(), MembershipStatus::Active.as_str()],
                |row| row.get::<_, String>(0).map(UserId::from_string),
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(members)
    }

    fn count_users(&self) -> Result<u64, Self::Error> {
        self.count_simple("SELECT COUNT(*) FROM users", [])
    }

    fn count_users_except(&self, user: &UserId) -> Result<u64, Self::Error> {
        self.count_simple("SELECT COUNT(*) FROM users WHERE id != ?1", params![user.as_str()])
    }
}
