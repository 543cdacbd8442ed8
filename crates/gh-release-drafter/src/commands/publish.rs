//! `publish` stage: upsert the pre-release holding the draft notes

use std::fs;
use std::path::Path;

use log::info;

use gh_release_client::{ClientError, GitHubClient, ReleasePayload};

use crate::config::DrafterConfig;
use crate::error::DrafterError;

/// Reads the digest from `notes_file` and publishes it under `tag`.
pub async fn run(
    client: &dyn GitHubClient,
    config: &DrafterConfig,
    notes_file: &Path,
    tag: &str,
) -> Result<(), DrafterError> {
    let body = fs::read_to_string(notes_file)
        .map_err(|err| DrafterError::file(format!("cannot read {}", notes_file.display()), err))?;

    upsert_prerelease(client, &config.org, &config.repo, &config.branch, tag, &body).await?;
    println!("release notes pre-release for {tag} published");
    Ok(())
}

/// Ensures exactly one pre-release exists under `tag` carrying `body`.
///
/// An existing notes pre-release is replaced in full, so the previous body
/// is discarded. Releases that are not flagged as pre-releases never match,
/// even under the same tag.
pub async fn upsert_prerelease(
    client: &dyn GitHubClient,
    org: &str,
    repo: &str,
    branch: &str,
    tag: &str,
    body: &str,
) -> Result<(), ClientError> {
    let name = format!("{tag} release notes preview");
    let payload = ReleasePayload::prerelease(tag, &name, body, branch);

    let existing = client
        .list_recent_releases(org, repo)
        .await?
        .into_iter()
        .find(|release| release.prerelease && release.tag == tag);

    match existing {
        Some(release) => {
            info!("updating notes pre-release {tag} (id {})", release.id);
            client.update_release(org, repo, release.id, &payload).await
        }
        None => {
            info!("creating notes pre-release {tag}");
            client.create_release(org, repo, &payload).await
        }
    }
}
