//! Client abstraction for the hosting-service calls of the pipeline

use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::{
    LatestRelease, PullRequestPage, PullRequestSearch, ReleasePayload, ReleaseSummary,
};

/// GitHub API surface the drafting pipeline relies on
///
/// Each method maps to exactly one HTTP call, so callers stay in charge of
/// pagination. There is no retry policy; every failure is fatal.
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetches one page of merged pull requests for `search`.
    ///
    /// # Arguments
    /// * `search` - The repository and merge window to search in
    /// * `cursor` - Continuation cursor from the previous page, `None` for the first page
    ///
    /// # Returns
    /// The decoded page together with the cursor of the page after it
    async fn search_merged_pulls(
        &self,
        search: &PullRequestSearch,
        cursor: Option<&str>,
    ) -> Result<PullRequestPage, ClientError>;

    /// Returns the most recent public release, or `None` when the repository
    /// has never published one.
    async fn latest_release(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Option<LatestRelease>, ClientError>;

    /// Lists the most recently created releases, newest first.
    async fn list_recent_releases(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<ReleaseSummary>, ClientError>;

    /// Creates a release from `payload`.
    async fn create_release(
        &self,
        org: &str,
        repo: &str,
        payload: &ReleasePayload,
    ) -> Result<(), ClientError>;

    /// Replaces name, body and flags of the release identified by `release_id`.
    async fn update_release(
        &self,
        org: &str,
        repo: &str,
        release_id: u64,
        payload: &ReleasePayload,
    ) -> Result<(), ClientError>;
}
