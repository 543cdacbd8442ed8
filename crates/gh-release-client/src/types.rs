//! Request and response types of the GitHub API boundary

use gh_release_notes::PullRequest;
use serde::{Deserialize, Serialize};

/// Identifies one window of merged pull requests on a trunk branch
#[derive(Debug, Clone)]
pub struct PullRequestSearch {
    pub org: String,
    pub repo: String,
    pub base_branch: String,
    /// Inclusive lower bound of the merge time window
    pub merged_start: String,
    /// Inclusive upper bound of the merge time window
    pub merged_end: String,
}

impl PullRequestSearch {
    /// Renders the GitHub search expression for this window.
    pub fn to_query(&self) -> String {
        format!(
            "repo:{}/{} is:pr is:merged base:{} merged:{}..{} sort:updated",
            self.org, self.repo, self.base_branch, self.merged_start, self.merged_end
        )
    }
}

/// One page of search results plus the continuation cursor
#[derive(Debug, Clone)]
pub struct PullRequestPage {
    pub pulls: Vec<PullRequest>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// Summary row of the recent-releases listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub id: u64,
    pub tag: String,
    pub prerelease: bool,
}

/// The most recent public release of a repository
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestRelease {
    pub name: Option<String>,
    pub created_at: String,
    pub published_at: String,
}

/// Request body of the release create and update calls
#[derive(Debug, Clone, Serialize)]
pub struct ReleasePayload {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
    pub generate_release_notes: bool,
}

impl ReleasePayload {
    /// Builds the notes-preview payload: a pre-release that is never a draft
    /// and never auto-generates its notes.
    pub fn prerelease(tag: &str, name: &str, body: &str, target_branch: &str) -> Self {
        Self {
            tag_name: tag.to_string(),
            target_commitish: target_branch.to_string(),
            name: name.to_string(),
            body: body.to_string(),
            draft: false,
            prerelease: true,
            generate_release_notes: false,
        }
    }
}
