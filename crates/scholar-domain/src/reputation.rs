//! Reputation value objects and the fixed weighting policy
//!
//! A reputation score is a weighted sum of contribution counts across eight
//! categories. It is a pure function of the counts at query time: nothing
//! here is persisted or versioned.

/// Percentile reported for every institution.
///
/// Institutions are not ranked against each other yet; this is a fixed
/// placeholder the UI displays as-is.
pub const INSTITUTION_PERCENTILE: u32 = 50;

/// Reputation category, in canonical (display and serialization) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Projects owned
    Projects,
    /// Papers created
    Papers,
    /// Proposals submitted for owned projects
    Proposals,
    /// Reviews written
    Reviews,
    /// Patents (not modeled; always zero)
    Patents,
    /// Active institutional memberships
    Collaborations,
    /// Funding secured (not modeled; always zero)
    Funding,
    /// Verified credentials
    Credentials,
}

impl Category {
    /// All categories in canonical order
    pub const ALL: [Category; 8] = [
        Category::Projects,
        Category::Papers,
        Category::Proposals,
        Category::Reviews,
        Category::Patents,
        Category::Collaborations,
        Category::Funding,
        Category::Credentials,
    ];

    /// Points awarded per counted record
    pub fn weight(&self) -> u64 {
        match self {
            Category::Projects => 3,
            Category::Papers => 5,
            Category::Proposals => 2,
            Category::Reviews => 4,
            Category::Patents => 0,
            Category::Collaborations => 2,
            Category::Funding => 0,
            Category::Credentials => 1,
        }
    }

    /// Key used in the breakdown JSON object
    pub fn name(&self) -> &'static str {
        match self {
            Category::Projects => "projects",
            Category::Papers => "papers",
            Category::Proposals => "proposals",
            Category::Reviews => "reviews",
            Category::Patents => "patents",
            Category::Collaborations => "collaborations",
            Category::Funding => "funding",
            Category::Credentials => "credentials",
        }
    }

    /// Whether the platform stores records for this category at all
    pub fn is_modeled(&self) -> bool {
        !matches!(self, Category::Patents | Category::Funding)
    }
}

/// Raw record counts for a cohort, before weighting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContributionCounts {
    /// Projects owned
    pub projects: u64,
    /// Papers created
    pub papers: u64,
    /// Proposals attached to owned projects
    pub proposals: u64,
    /// Reviews written
    pub reviews: u64,
    /// Active memberships (user path) or active members (institution path)
    pub collaborations: u64,
    /// Verified credentials
    pub credentials: u64,
}

/// Weighted per-category values that sum to the score
///
/// Always carries all eight keys; `patents` and `funding` stay zero until
/// those record types exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Breakdown {
    /// Weighted projects
    pub projects: u64,
    /// Weighted papers
    pub papers: u64,
    /// Weighted proposals
    pub proposals: u64,
    /// Weighted reviews
    pub reviews: u64,
    /// Not modeled
    pub patents: u64,
    /// Weighted collaborations
    pub collaborations: u64,
    /// Not modeled
    pub funding: u64,
    /// Weighted credentials
    pub credentials: u64,
}

impl Breakdown {
    /// Apply the category weights to raw counts
    pub fn from_counts(counts: &ContributionCounts) -> Self {
        Self {
            projects: counts.projects * Category::Projects.weight(),
            papers: counts.papers * Category::Papers.weight(),
            proposals: counts.proposals * Category::Proposals.weight(),
            reviews: counts.reviews * Category::Reviews.weight(),
            patents: 0,
            collaborations: counts.collaborations * Category::Collaborations.weight(),
            funding: 0,
            credentials: counts.credentials * Category::Credentials.weight(),
        }
    }

    /// Weighted value for a single category
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

    /// Iterate `(category, weighted value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Sum of all eight fields
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, v)| v).sum()
    }
}

/// Direction of a reputation over time
///
/// No history is stored, so only `Stable` is produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    /// Score rising
    Up,
    /// Score falling
    Down,
    /// Score unchanged
    Stable,
}

/// Computed reputation for a user or an institution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReputationScore {
    /// Sum of the breakdown
    pub score: u64,
    /// Weighted per-category values
    pub breakdown: Breakdown,
    /// Percentile (0-100)
    pub percentile: u32,
    /// Direction over time
    pub trend: Trend,
}

impl ReputationScore {
    /// Build a user's score from counts and a precomputed percentile
    pub fn for_user(counts: &ContributionCounts, percentile: u32) -> Self {
        let breakdown = Breakdown::from_counts(counts);
        Self {
            score: breakdown.total(),
            breakdown,
            percentile,
            trend: Trend::Stable,
        }
    }

    /// Build an institution's score; the percentile is fixed
    pub fn for_institution(counts: &ContributionCounts) -> Self {
        let breakdown = Breakdown::from_counts(counts);
        Self {
            score: breakdown.total(),
            breakdown,
            percentile: INSTITUTION_PERCENTILE,
            trend: Trend::Stable,
        }
    }
}

/// Percentile for the user path: `round((1 - other / total) * 100)`
///
/// `other_users` is every user except the caller, not the users ranked
/// below them, so this is not a true percentile. The UI shows the value
/// verbatim and existing accounts depend on it; see DESIGN.md before
/// changing it. Returns 0 when there are no users.
pub fn user_percentile(other_users: u64, total_users: u64) -> u32 {
    if total_users == 0 {
        return 0;
    }
    let ratio = other_users as f64 / total_users as f64;
    ((1.0 - ratio) * 100.0).round().clamp(0.0, 100.0) as u32
}
