//! GitHub API boundary of the release notes drafting pipeline
//!
//! Exposes the [`GitHubClient`] trait covering exactly the calls the
//! pipeline needs (paginated pull request search, release lookup, release
//! create/update) plus the octocrab-backed implementation used in
//! production. Test doubles implement the same trait.

use std::time::Duration;

pub mod client;
pub mod error;
pub mod octocrab_client;
pub mod types;

pub use client::GitHubClient;
pub use error::ClientError;
pub use octocrab_client::OctocrabClient;
pub use types::{
    LatestRelease, PullRequestPage, PullRequestSearch, ReleasePayload, ReleaseSummary,
};

/// Pull requests requested per search page.
pub const FETCH_PAGE_SIZE: u32 = 50;

/// Labels fetched per pull request.
pub const LABEL_PAGE_SIZE: u32 = 20;

/// Releases scanned when resolving an existing notes pre-release.
pub const RELEASE_LOOKUP_PAGE_SIZE: u32 = 50;

/// Timeout applied to every outbound call.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
