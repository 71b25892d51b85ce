//! End-to-end reputation tests against a seeded SQLite store

use scholar_domain::{
    Category, Credential, CredentialStatus, Institution, InstitutionId, Membership,
    MembershipStatus, Paper, Project, ProjectId, Proposal, RecordId, Review, Trend, User, UserId,
};
use scholar_reputation::ReputationService;
use scholar_store::SqliteStore;

struct Seeder {
    store: SqliteStore,
}

impl Seeder {
    fn new() -> Self {
        Self {
            store: SqliteStore::new(":memory:").unwrap(),
        }
    }

    fn user(&self, name: &str) -> UserId {
        let user = User::new(name, 1_700_000_000);
        self.store.insert_user(&user).unwrap();
        user.id
    }

    fn institution(&self, name: &str) -> InstitutionId {
        let institution = Institution {
            id: InstitutionId::new(),
            name: name.to_string(),
        };
        self.store.insert_institution(&institution).unwrap();
        institution.id
    }

    fn projects(&self, owner: &UserId, n: usize) -> Vec<ProjectId> {
        (0..n)
            .map(|i| {
                let project = Project {
                    id: ProjectId::new(),
                    owner: owner.clone(),
                    title: format!("Project {}", i),
                };
                self.store.insert_project(&project).unwrap();
                project.id
            })
            .collect()
    }

    fn papers(&self, creator: &UserId, n: usize) {
        for i in 0..n {
            self.store
                .insert_paper(&Paper {
                    id: RecordId::new(),
                    creator: creator.clone(),
                    title: format!("Paper {}", i),
                })
                .unwrap();
        }
    }

    fn proposal(&self, project: &ProjectId) {
        self.store
            .insert_proposal(&Proposal {
                id: RecordId::new(),
                project: project.clone(),
                title: "Proposal".to_string(),
            })
            .unwrap();
    }

    fn reviews(&self, reviewer: &UserId, n: usize) {
        for _ in 0..n {
            self.store
                .insert_review(&Review {
                    id: RecordId::new(),
                    reviewer: reviewer.clone(),
                    proposal: None,
                })
                .unwrap();
        }
    }

    fn credential(&self, user: &UserId, status: CredentialStatus) {
        self.store
            .insert_credential(&Credential {
                id: RecordId::new(),
                user: user.clone(),
                kind: "License".to_string(),
                status,
            })
            .unwrap();
    }

    fn membership(&self, user: &UserId, institution: &InstitutionId, status: MembershipStatus) {
        self.store
            .insert_membership(&Membership {
                id: RecordId::new(),
                user: user.clone(),
                institution: institution.clone(),
                status,
            })
            .unwrap();
    }

    fn service(&self) -> ReputationService<SqliteStore> {
        ReputationService::new(self.store.clone())
    }
}

#[tokio::test]
async fn test_user_worked_example() {
    let seed = Seeder::new();
    let alice = seed.user("Alice");
    let lab = seed.institution("Lab");
    let uni = seed.institution("University");

    seed.projects(&alice, 2);
    seed.papers(&alice, 1);
    seed.reviews(&alice, 3);
    seed.credential(&alice, CredentialStatus::Verified);
    seed.credential(&alice, CredentialStatus::Pending);
    seed.membership(&alice, &lab, MembershipStatus::Active);
    seed.membership(&alice, &uni, MembershipStatus::Active);

    let reputation = seed.service().compute_user_reputation(&alice).await.unwrap();
    let b = reputation.breakdown;

    assert_eq!(b.projects, 6);
    assert_eq!(b.papers, 5);
    assert_eq!(b.proposals, 0);
    assert_eq!(b.reviews, 12);
    assert_eq!(b.patents, 0);
    assert_eq!(b.collaborations, 4);
    assert_eq!(b.funding, 0);
    assert_eq!(b.credentials, 1);
    assert_eq!(reputation.score, 28);
    assert_eq!(reputation.trend, Trend::Stable);
}

#[tokio::test]
async fn test_user_with_no_contributions_scores_zero() {
    let seed = Seeder::new();
    let alice = seed.user("Alice");
    let bob = seed.user("Bob");
    seed.projects(&bob, 4);

    let reputation = seed.service().compute_user_reputation(&alice).await.unwrap();

    assert_eq!(reputation.score, 0);
    assert!(reputation.breakdown.iter().all(|(_, v)| v == 0));
    // Percentile is still derived from the user counts: 1 - 1/2
    assert_eq!(reputation.percentile, 50);
}

#[tokio::test]
async fn test_unknown_user_degrades_to_zero() {
    let seed = Seeder::new();
    seed.user("Alice");
    seed.user("Bob");

    let reputation = seed
        .service()
        .compute_user_reputation(&UserId::from("does-not-exist"))
        .await
        .unwrap();

    assert_eq!(reputation.score, 0);
    // Every user counts as "other", so the percentile bottoms out
    assert_eq!(reputation.percentile, 0);
}

#[tokio::test]
async fn test_percentile_ignores_actual_ranking() {
    let seed = Seeder::new();
    let top = seed.user("Top");
    let bottom = seed.user("Bottom");
    for _ in 0..8 {
        seed.user("Filler");
    }
    seed.projects(&top, 10);

    let service = seed.service();
    let top_rep = service.compute_user_reputation(&top).await.unwrap();
    let bottom_rep = service.compute_user_reputation(&bottom).await.unwrap();

    assert!(top_rep.score > bottom_rep.score);
    // round((1 - 9/10) * 100) for both, regardless of score
    assert_eq!(top_rep.percentile, 10);
    assert_eq!(bottom_rep.percentile, 10);
}

#[tokio::test]
async fn test_proposals_count_through_project_ownership() {
    let seed = Seeder::new();
    let owner = seed.user("Owner");
    let projects = seed.projects(&owner, 1);
    seed.proposal(&projects[0]);
    seed.proposal(&projects[0]);

    let reputation = seed.service().compute_user_reputation(&owner).await.unwrap();
    assert_eq!(reputation.breakdown.proposals, 4);
    assert_eq!(reputation.score, 3 + 4);
}

#[tokio::test]
async fn test_institution_worked_example() {
    let seed = Seeder::new();
    let lab = seed.institution("Lab");
    let members: Vec<UserId> = ["A", "B", "C"].iter().map(|n| seed.user(n)).collect();
    for member in &members {
        seed.membership(member, &lab, MembershipStatus::Active);
    }
    seed.projects(&members[0], 2);
    seed.projects(&members[1], 3);

    // Non-members and inactive members do not contribute
    let outsider = seed.user("Outsider");
    seed.projects(&outsider, 7);
    let former = seed.user("Former");
    seed.membership(&former, &lab, MembershipStatus::Left);
    seed.papers(&former, 2);

    let reputation = seed
        .service()
        .compute_institution_reputation(&lab)
        .await
        .unwrap();

    assert_eq!(reputation.breakdown.projects, 15);
    assert_eq!(reputation.breakdown.papers, 0);
    assert_eq!(reputation.breakdown.collaborations, 6);
    assert_eq!(reputation.score, 21);
    assert_eq!(reputation.percentile, 50);
    assert_eq!(reputation.trend, Trend::Stable);
}

#[tokio::test]
async fn test_institution_counts_verified_credentials_of_members() {
    let seed = Seeder::new();
    let lab = seed.institution("Lab");
    let member = seed.user("Member");
    seed.membership(&member, &lab, MembershipStatus::Active);
    seed.credential(&member, CredentialStatus::Verified);
    seed.credential(&member, CredentialStatus::Rejected);
    seed.reviews(&member, 1);

    let reputation = seed
        .service()
        .compute_institution_reputation(&lab)
        .await
        .unwrap();

    assert_eq!(reputation.breakdown.credentials, 1);
    assert_eq!(reputation.breakdown.reviews, 4);
    assert_eq!(reputation.breakdown.collaborations, 2);
    assert_eq!(reputation.score, 7);
}

#[tokio::test]
async fn test_institution_without_active_members() {
    let seed = Seeder::new();
    let lab = seed.institution("Lab");
    let pending = seed.user("Pending");
    seed.membership(&pending, &lab, MembershipStatus::Pending);
    seed.projects(&pending, 3);

    let reputation = seed
        .service()
        .compute_institution_reputation(&lab)
        .await
        .unwrap();

    assert_eq!(reputation.score, 0);
    assert_eq!(reputation.breakdown.collaborations, 0);
    assert_eq!(reputation.breakdown.projects, 0);
    assert_eq!(reputation.percentile, 50);
}

#[tokio::test]
async fn test_unmodeled_categories_always_zero() {
    let seed = Seeder::new();
    let lab = seed.institution("Lab");
    let alice = seed.user("Alice");
    seed.membership(&alice, &lab, MembershipStatus::Active);
    seed.projects(&alice, 5);
    seed.papers(&alice, 5);

    let service = seed.service();
    let user = service.compute_user_reputation(&alice).await.unwrap();
    let institution = service.compute_institution_reputation(&lab).await.unwrap();

    for reputation in [user, institution] {
        assert_eq!(reputation.breakdown.get(Category::Patents), 0);
        assert_eq!(reputation.breakdown.get(Category::Funding), 0);
        assert_eq!(reputation.score, reputation.breakdown.total());
    }
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let seed = Seeder::new();
    let lab = seed.institution("Lab");
    let alice = seed.user("Alice");
    seed.user("Bob");
    seed.membership(&alice, &lab, MembershipStatus::Active);
    seed.projects(&alice, 1);
    seed.reviews(&alice, 2);

    let service = seed.service();
    let first = service.compute_user_reputation(&alice).await.unwrap();
    let second = service.compute_user_reputation(&alice).await.unwrap();
    assert_eq!(first, second);

    let first = service.compute_institution_reputation(&lab).await.unwrap();
    let second = service.compute_institution_reputation(&lab).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_scores_reflect_new_records() {
    let seed = Seeder::new();
    let alice = seed.user("Alice");
    let service = seed.service();

    let before = service.compute_user_reputation(&alice).await.unwrap();
    seed.papers(&alice, 1);
    let after = service.compute_user_reputation(&alice).await.unwrap();

    assert_eq!(after.score, before.score + 5);
}
