//! Reputation aggregation over a ContributionStore

use crate::ReputationError;
use scholar_domain::{
    user_percentile, Cohort, ContributionCounts, ContributionStore, InstitutionId,
    ReputationScore, UserId,
};
use std::sync::Arc;

/// Computes reputation scores on demand
///
/// Stateless apart from the injected store handle: nothing is cached and
/// nothing is written. Every read of one computation runs as its own
/// blocking task and the results are joined before weighting, so latency is
/// bounded by the slowest read rather than their sum.
///
/// # Examples
///
/// ```no_run
/// use scholar_reputation::ReputationService;
/// use scholar_store::SqliteStore;
/// use scholar_domain::UserId;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let service = ReputationService::new(SqliteStore::new("scholar.db")?);
/// let reputation = service.compute_user_reputation(&UserId::from("u-1")).await?;
/// println!("score = {}", reputation.score);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ReputationService<S> {
    store: S,
}

type CohortQuery<S> = fn(&S, &Cohort) -> Result<u64, <S as ContributionStore>::Error>;

impl<S> ReputationService<S>
where
    S: ContributionStore + Clone + Send + Sync + 'static,
    S::Error: std::fmt::Display + Send + 'static,
{
    /// Create a service reading from `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store handle
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one read on the blocking pool
    async fn read<T, F>(&self, query: F) -> Result<T, ReputationError>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T, S::Error> + Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || query(&store))
            .await
            .map_err(|e| ReputationError::Task(e.to_string()))?
            .map_err(|e| ReputationError::Store(e.to_string()))
    }

    async fn count(&self, cohort: &Arc<Cohort>, query: CohortQuery<S>) -> Result<u64, ReputationError> {
        let cohort = Arc::clone(cohort);
        self.read(move |store: &S| query(store, &cohort)).await
    }

    /// Reputation of a single user
    ///
    /// Unknown user ids are not rejected; they score zero in every category.
    /// The percentile compares the total user count against every *other*
    /// user, not against users with a lower score.
    pub async fn compute_user_reputation(
        &self,
        user: &UserId,
    ) -> Result<ReputationScore, ReputationError> {
        tracing::debug!(user_id = %user, "Computing user reputation");

        let cohort = Arc::new(Cohort::User(user.clone()));
        let member = user.clone();
        let caller = user.clone();

        let (projects, papers, proposals, reviews, credentials, collaborations, total, others) = tokio::try_join!(
            self.count(&cohort, S::count_projects),
            self.count(&cohort, S::count_papers),
            self.count(&cohort, S::count_proposals),
            self.count(&cohort, S::count_reviews),
            self.count(&cohort, S::count_verified_credentials),
            self.read(move |store: &S| store.count_active_memberships(&member)),
            self.read(|store: &S| store.count_users()),
            self.read(move |store: &S| store.count_users_except(&caller)),
        )?;

        let counts = ContributionCounts {
            projects,
            papers,
            proposals,
            reviews,
            collaborations,
            credentials,
        };
        let reputation = ReputationScore::for_user(&counts, user_percentile(others, total));

        tracing::debug!(
            user_id = %user,
            score = reputation.score,
            percentile = reputation.percentile,
            "User reputation computed"
        );
        Ok(reputation)
    }

    /// Reputation of an institution's active membership cohort
    ///
    /// Collaborations are the number of active memberships; every other
    /// category is counted across the members' user ids. Percentile is
    /// fixed at 50.
    pub async fn compute_institution_reputation(
        &self,
        institution: &InstitutionId,
    ) -> Result<ReputationScore, ReputationError> {
        tracing::debug!(institution_id = %institution, "Computing institution reputation");

        let target = institution.clone();
        let members = self
            .read(move |store: &S| store.active_members(&target))
            .await?;

        let collaborations = members.len() as u64;
        let cohort = Arc::new(Cohort::Members(members));

        let (projects, papers, proposals, reviews, credentials) = tokio::try_join!(
            self.count(&cohort, S::count_projects),
            self.count(&cohort, S::count_papers),
            self.count(&cohort, S::count_proposals),
            self.count(&cohort, S::count_reviews),
            self.count(&cohort, S::count_verified_credentials),
        )?;

        let counts = ContributionCounts {
            projects,
            papers,
            proposals,
            reviews,
            collaborations,
            credentials,
        };
        let reputation = ReputationScore::for_institution(&counts);

        tracing::debug!(
            institution_id = %institution,
            members = collaborations,
            score = reputation.score,
            "Institution reputation computed"
        );
        Ok(reputation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_domain::Trend;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::Duration;

    /// Store returning fixed counts, optionally failing one query
    #[derive(Clone, Default)]
    struct FixedStore {
        members: Vec<UserId>,
        fail_reviews: bool,
        calls: Arc<AtomicUsize>,
    }

    impl FixedStore {
        fn tick(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl ContributionStore for FixedStore {
        type Error = String;

        fn count_projects(&self, cohort: &Cohort) -> Result<u64, String> {
            self.tick();
            Ok(cohort.user_ids().len() as u64 * 2)
        }
        fn count_papers(&self, _: &Cohort) -> Result<u64, String> {
            self.tick();
            Ok(1)
        }
        fn count_proposals(&self, _: &Cohort) -> Result<u64, String> {
            self.tick();
            Ok(0)
        }
        fn count_reviews(&self, _: &Cohort) -> Result<u64, String> {
            self.tick();
            if self.fail_reviews {
                Err("connection reset".to_string())
            } else {
                Ok(3)
            }
        }
        fn count_verified_credentials(&self, _: &Cohort) -> Result<u64, String> {
            self.tick();
            Ok(1)
        }
        fn count_active_memberships(&self, _: &UserId) -> Result<u64, String> {
            self.tick();
            Ok(2)
        }
        fn active_members(&self, _: &InstitutionId) -> Result<Vec<UserId>, String> {
            self.tick();
            Ok(self.members.clone())
        }
        fn count_users(&self) -> Result<u64, String> {
            self.tick();
            Ok(4)
        }
        fn count_users_except(&self, _: &UserId) -> Result<u64, String> {
            self.tick();
            Ok(3)
        }
    }

    #[tokio::test]
    async fn test_user_path_issues_eight_reads() {
        let store = FixedStore::default();
        let calls = Arc::clone(&store.calls);
        let service = ReputationService::new(store);

        let reputation = service
            .compute_user_reputation(&UserId::from("u-1"))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 8);
        // 2*3 + 1*5 + 0*2 + 3*4 + 2*2 + 1*1
        assert_eq!(reputation.score, 28);
        assert_eq!(reputation.percentile, 25);
        assert_eq!(reputation.trend, Trend::Stable);
    }

    #[tokio::test]
    async fn test_institution_path_uses_member_count() {
        let store = FixedStore {
            members: vec![UserId::from("a"), UserId::from("b"), UserId::from("c")],
            ..Default::default()
        };
        let calls = Arc::clone(&store.calls);
        let service = ReputationService::new(store);

        let reputation = service
            .compute_institution_reputation(&InstitutionId::from("inst"))
            .await
            .unwrap();

        // active_members + five scoped counts
        assert_eq!(calls.load(Ordering::SeqCst), 6);
        assert_eq!(reputation.breakdown.projects, 18);
        assert_eq!(reputation.breakdown.collaborations, 6);
        assert_eq!(reputation.percentile, 50);
    }

    #[tokio::test]
    async fn test_single_read_failure_fails_aggregation() {
        let store = FixedStore {
            fail_reviews: true,
            ..Default::default()
        };
        let service = ReputationService::new(store);

        let result = service.compute_user_reputation(&UserId::from("u-1")).await;
        match result {
            Err(ReputationError::Store(msg)) => assert!(msg.contains("connection reset")),
            other => panic!("expected store error, got {:?}", other),
        }
    }

    /// Store whose reads only complete once `parties` reads are in flight
    #[derive(Clone)]
    struct RendezvousStore {
        barrier: Arc<Barrier>,
    }

    impl RendezvousStore {
        fn meet(&self) -> Result<u64, String> {
            self.barrier.wait();
            Ok(0)
        }
    }

    impl ContributionStore for RendezvousStore {
        type Error = String;

        fn count_projects(&self, _: &Cohort) -> Result<u64, String> {
            self.meet()
        }
        fn count_papers(&self, _: &Cohort) -> Result<u64, String> {
            self.meet()
        }
        fn count_proposals(&self, _: &Cohort) -> Result<u64, String> {
            self.meet()
        }
        fn count_reviews(&self, _: &Cohort) -> Result<u64, String> {
            self.meet()
        }
        fn count_verified_credentials(&self, _: &Cohort) -> Result<u64, String> {
            self.meet()
        }
        fn count_active_memberships(&self, _: &UserId) -> Result<u64, String> {
            self.meet()
        }
        fn active_members(&self, _: &InstitutionId) -> Result<Vec<UserId>, String> {
            Ok(Vec::new())
        }
        fn count_users(&self) -> Result<u64, String> {
            self.meet().map(|_| 1)
        }
        fn count_users_except(&self, _: &UserId) -> Result<u64, String> {
            self.meet()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_user_reads_run_concurrently() {
        // All eight reads must be in flight at once for the barrier to open.
        let store = RendezvousStore {
            barrier: Arc::new(Barrier::new(8)),
        };
        let service = ReputationService::new(store);

        let reputation = tokio::time::timeout(
            Duration::from_secs(10),
            service.compute_user_reputation(&UserId::from("u-1")),
        )
        .await
        .expect("reads were not issued concurrently")
        .unwrap();

        assert_eq!(reputation.score, 0);
        assert_eq!(reputation.percentile, 100);
    }
}
