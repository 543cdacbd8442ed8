//! Pull request records exchanged between the pipeline stages

/// Author placeholder used when the hosting service reports no login.
pub const UNKNOWN_AUTHOR: &str = "-";

/// Represents one merged pull request as fetched from the hosting service
///
/// Timestamps are kept verbatim as opaque strings; the pipeline never
/// interprets them, it only carries them through to the persisted tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub title: String,
    pub number: u64,
    pub author: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
    pub merged_at: String,
    pub labels: Vec<String>,
}

impl PullRequest {
    /// Checks whether the pull request carries the given label (exact match)
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }

    /// Checks whether the pull request carries at least one of the given labels
    pub fn has_any_label(&self, labels: &[String]) -> bool {
        labels.iter().any(|label| self.has_label(label))
    }
}

/// A pull request together with the single category it ended up in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedPullRequest {
    pub pull: PullRequest,
    pub category: String,
}
