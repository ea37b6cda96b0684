use serde::{Deserialize, Serialize};

/// A normalized job posting extracted from a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Cleaned job description text.
    pub job_description: String,
    /// Company name, or `"Unknown Company"` when no extraction path found one.
    pub company_name: String,
    /// True when the description did not pass the full validity predicate and
    /// was accepted under the relaxed last-resort floor.
    pub degraded: bool,
}

impl JobPosting {
    pub const UNKNOWN_COMPANY: &'static str = "Unknown Company";
}

/// Tuning thresholds for description validation and fallback acceptance.
///
/// These are deliberately configuration rather than hard invariants: the
/// windows were tuned against real-world job boards and carry no deeper
/// rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionLimits {
    /// Minimum cleaned length for a valid description.
    pub min_description_len: usize,
    /// Exclusive maximum cleaned length for a valid description.
    pub max_description_len: usize,
    /// A valid description must contain strictly more tokens than this.
    pub min_token_count: usize,
    /// Largest-block scan only considers blocks strictly longer than this.
    pub block_floor: usize,
    /// Largest-block scan only considers blocks strictly shorter than this.
    pub block_ceiling: usize,
    /// An invalid description is still returned (degraded) at or above this length.
    pub degraded_floor: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            min_description_len: 80,
            max_description_len: 50_000,
            min_token_count: 15,
            block_floor: 100,
            block_ceiling: 20_000,
            degraded_floor: 50,
        }
    }
}
