//! `query` stage: fetch merged pull requests into a CSV snapshot

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use log::info;

use gh_release_client::{ClientError, GitHubClient, PullRequestSearch};
use gh_release_notes::{store, PullRequest};

use crate::config::DrafterConfig;
use crate::error::DrafterError;

/// Fetches every pull request merged in the window and persists the snapshot.
///
/// The window starts at `start_time`, or at the latest public release when
/// `since_latest_release` is set, and always ends now.
pub async fn run(
    client: &dyn GitHubClient,
    config: &DrafterConfig,
    start_time: Option<String>,
    since_latest_release: bool,
    output: &Path,
) -> Result<(), DrafterError> {
    let start = resolve_start(client, config, start_time, since_latest_release).await?;
    let end = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    info!(
        "querying pull requests merged to {} between {start} and {end}",
        config.branch
    );

    let search = PullRequestSearch {
        org: config.org.clone(),
        repo: config.repo.clone(),
        base_branch: config.branch.clone(),
        merged_start: start,
        merged_end: end,
    };
    let pulls = fetch_all_merged_pulls(client, &search).await?;
    store::write_pull_requests(output, &pulls)?;

    println!("{} pull requests written", pulls.len());
    Ok(())
}

/// Drains the paginated search, one page per request.
async fn fetch_all_merged_pulls(
    client: &dyn GitHubClient,
    search: &PullRequestSearch,
) -> Result<Vec<PullRequest>, ClientError> {
    let mut pulls = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        info!(
            "fetching next page of pull requests, item offset: {}",
            pulls.len()
        );
        let page = client.search_merged_pulls(search, cursor.as_deref()).await?;
        pulls.extend(page.pulls);

        if !page.has_next_page {
            return Ok(pulls);
        }
        cursor = page.end_cursor;
    }
}

async fn resolve_start(
    client: &dyn GitHubClient,
    config: &DrafterConfig,
    start_time: Option<String>,
    since_latest_release: bool,
) -> Result<String, DrafterError> {
    if let Some(start) = start_time {
        validate_start_time(&start)?;
        return Ok(start);
    }
    if since_latest_release {
        let release = client
            .latest_release(&config.org, &config.repo)
            .await?
            .ok_or_else(|| {
                DrafterError::Config(format!(
                    "{}/{} has no published release to anchor the window",
                    config.org, config.repo
                ))
            })?;
        info!("latest release published at {}", release.published_at);
        return Ok(release.published_at);
    }
    Err(DrafterError::Config(
        "start time must be specified with --start-time or --since-latest-release".to_string(),
    ))
}

/// Accepts the timestamp shapes GitHub's `merged:` qualifier understands.
fn validate_start_time(value: &str) -> Result<(), DrafterError> {
    let valid = DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();

    if valid {
        Ok(())
    } else {
        Err(DrafterError::Config(format!(
            "'{value}' is not an ISO-8601 timestamp"
        )))
    }
}
