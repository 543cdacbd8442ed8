//! Octocrab-based implementation of the GitHub client

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use serde::Deserialize;

use gh_release_notes::{PullRequest, UNKNOWN_AUTHOR};

use crate::client::GitHubClient;
use crate::error::ClientError;
use crate::types::{
    LatestRelease, PullRequestPage, PullRequestSearch, ReleasePayload, ReleaseSummary,
};
use crate::{FETCH_PAGE_SIZE, HTTP_TIMEOUT, LABEL_PAGE_SIZE, RELEASE_LOOKUP_PAGE_SIZE};

/// GitHub client issuing real API calls through octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Creates a client from an already configured octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Builds an authenticated client with the fixed per-call timeouts.
    pub fn from_token(token: impl Into<String>) -> Result<Self, ClientError> {
        let octocrab = Octocrab::builder()
            .personal_token(token.into())
            .set_connect_timeout(Some(HTTP_TIMEOUT))
            .set_read_timeout(Some(HTTP_TIMEOUT))
            .build()
            .map_err(|err| ClientError::transport("client construction", err))?;
        Ok(Self::new(Arc::new(octocrab)))
    }

    /// Posts one GraphQL document and unwraps its `data` payload.
    ///
    /// A response carrying an `errors` array counts as a failure even when
    /// the HTTP exchange succeeded.
    async fn graphql_data(
        &self,
        request: &str,
        query: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let payload = serde_json::json!({ "query": query });
        let mut response: serde_json::Value = self
            .octocrab
            .graphql(&payload)
            .await
            .map_err(|err| ClientError::transport(request, err))?;

        if let Some(errors) = response.get("errors") {
            return Err(ClientError::protocol(request, errors));
        }
        Ok(response["data"].take())
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn search_merged_pulls(
        &self,
        search: &PullRequestSearch,
        cursor: Option<&str>,
    ) -> Result<PullRequestPage, ClientError> {
        const REQUEST: &str = "pull request search";

        let after = match cursor {
            Some(cursor) => format!("\"{cursor}\""),
            None => "null".to_string(),
        };
        let query = format!(
            r#"{{
  search(after: {after}, first: {page_size}, query: "{search_query}", type: ISSUE) {{
    nodes {{
      ... on PullRequest {{
        title
        number
        author {{
          login
        }}
        url
        createdAt
        updatedAt
        mergedAt
        labels(first: {label_page_size}) {{
          nodes {{
            name
          }}
        }}
      }}
    }}
    pageInfo {{
      endCursor
      hasNextPage
    }}
  }}
}}"#,
            after = after,
            page_size = FETCH_PAGE_SIZE,
            search_query = search.to_query(),
            label_page_size = LABEL_PAGE_SIZE,
        );
        debug!("searching pull requests, cursor: {:?}", cursor);

        let mut data = self.graphql_data(REQUEST, &query).await?;
        let results: SearchResults = serde_json::from_value(data["search"].take())
            .map_err(|err| ClientError::decode(REQUEST, err))?;

        Ok(PullRequestPage {
            pulls: results
                .nodes
                .into_iter()
                .map(PullNode::into_record)
                .collect(),
            end_cursor: results.page_info.end_cursor,
            has_next_page: results.page_info.has_next_page,
        })
    }

    async fn latest_release(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Option<LatestRelease>, ClientError> {
        const REQUEST: &str = "latest release lookup";

        let query = format!(
            r#"{{
  repository(owner: "{org}", name: "{repo}") {{
    latestRelease {{
      name
      createdAt
      publishedAt
    }}
  }}
}}"#
        );
        let mut data = self.graphql_data(REQUEST, &query).await?;

        let node = data["repository"]["latestRelease"].take();
        if node.is_null() {
            return Ok(None);
        }
        let release =
            serde_json::from_value(node).map_err(|err| ClientError::decode(REQUEST, err))?;
        Ok(Some(release))
    }

    async fn list_recent_releases(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<ReleaseSummary>, ClientError> {
        const REQUEST: &str = "release listing";

        let query = format!(
            r#"{{
  repository(owner: "{org}", name: "{repo}") {{
    releases(first: {page_size}, orderBy: {{field: CREATED_AT, direction: DESC}}) {{
      nodes {{
        databaseId
        tagName
        isPrerelease
      }}
    }}
  }}
}}"#,
            page_size = RELEASE_LOOKUP_PAGE_SIZE,
        );
        let mut data = self.graphql_data(REQUEST, &query).await?;

        let nodes: Vec<ReleaseNode> =
            serde_json::from_value(data["repository"]["releases"]["nodes"].take())
                .map_err(|err| ClientError::decode(REQUEST, err))?;
        Ok(nodes
            .into_iter()
            .filter_map(ReleaseNode::into_summary)
            .collect())
    }

    async fn create_release(
        &self,
        org: &str,
        repo: &str,
        payload: &ReleasePayload,
    ) -> Result<(), ClientError> {
        let request = format!("release creation for tag {}", payload.tag_name);
        debug!("creating release {} on {org}/{repo}", payload.tag_name);

        let route = format!("/repos/{org}/{repo}/releases");
        let _: serde_json::Value = self
            .octocrab
            .post(route, Some(payload))
            .await
            .map_err(|err| ClientError::transport(&request, err))?;
        Ok(())
    }

    async fn update_release(
        &self,
        org: &str,
        repo: &str,
        release_id: u64,
        payload: &ReleasePayload,
    ) -> Result<(), ClientError> {
        let request = format!("release update for tag {}", payload.tag_name);
        debug!("updating release {release_id} on {org}/{repo}");

        let route = format!("/repos/{org}/{repo}/releases/{release_id}");
        let _: serde_json::Value = self
            .octocrab
            .patch(route, Some(payload))
            .await
            .map_err(|err| ClientError::transport(&request, err))?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResults {
    nodes: Vec<PullNode>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    end_cursor: Option<String>,
    has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullNode {
    title: String,
    number: u64,
    author: Option<AuthorNode>,
    url: String,
    created_at: String,
    updated_at: String,
    merged_at: String,
    labels: LabelConnection,
}

#[derive(Debug, Deserialize)]
struct AuthorNode {
    login: String,
}

#[derive(Debug, Deserialize)]
struct LabelConnection {
    nodes: Vec<LabelNode>,
}

#[derive(Debug, Deserialize)]
struct LabelNode {
    name: String,
}

impl PullNode {
    fn into_record(self) -> PullRequest {
        PullRequest {
            title: self.title,
            number: self.number,
            author: self
                .author
                .map(|author| author.login)
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            url: self.url,
            created_at: self.created_at,
            updated_at: self.updated_at,
            merged_at: self.merged_at,
            labels: self
                .labels
                .nodes
                .into_iter()
                .map(|label| label.name)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseNode {
    database_id: Option<u64>,
    tag_name: String,
    is_prerelease: bool,
}

impl ReleaseNode {
    /// A release without a database id cannot be addressed by the REST
    /// update call, so it is skipped during the scan.
    fn into_summary(self) -> Option<ReleaseSummary> {
        Some(ReleaseSummary {
            id: self.database_id?,
            tag: self.tag_name,
            prerelease: self.is_prerelease,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_nodes_decode_into_records() {
        let data = serde_json::json!({
            "nodes": [{
                "title": "Fix crash",
                "number": 42,
                "author": { "login": "alice" },
                "url": "https://github.com/acme/widgets/pull/42",
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-02T00:00:00Z",
                "mergedAt": "2024-01-03T00:00:00Z",
                "labels": { "nodes": [{ "name": "audio" }, { "name": "bug" }] }
            }],
            "pageInfo": { "endCursor": "abc", "hasNextPage": true }
        });

        let SearchResults { nodes, page_info } = serde_json::from_value(data).unwrap();
        let record = nodes.into_iter().next().unwrap().into_record();

        assert_eq!(record.number, 42);
        assert_eq!(record.author, "alice");
        assert_eq!(record.labels, vec!["audio", "bug"]);
        assert_eq!(page_info.end_cursor.as_deref(), Some("abc"));
        assert!(page_info.has_next_page);
    }

    #[test]
    fn test_missing_author_becomes_the_placeholder() {
        let node: PullNode = serde_json::from_value(serde_json::json!({
            "title": "Fix crash",
            "number": 7,
            "author": null,
            "url": "https://github.com/acme/widgets/pull/7",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z",
            "mergedAt": "2024-01-03T00:00:00Z",
            "labels": { "nodes": [] }
        }))
        .unwrap();

        assert_eq!(node.into_record().author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_releases_without_database_id_are_skipped() {
        let nodes: Vec<ReleaseNode> = serde_json::from_value(serde_json::json!([
            { "databaseId": 11, "tagName": "v0.82.0", "isPrerelease": false },
            { "databaseId": null, "tagName": "v0.83.0-alpha", "isPrerelease": true },
        ]))
        .unwrap();

        let summaries: Vec<ReleaseSummary> =
            nodes.into_iter().filter_map(ReleaseNode::into_summary).collect();

        assert_eq!(
            summaries,
            vec![ReleaseSummary {
                id: 11,
                tag: "v0.82.0".to_string(),
                prerelease: false,
            }]
        );
    }
}
