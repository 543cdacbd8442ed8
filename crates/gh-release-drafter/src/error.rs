//! Error taxonomy of the drafter binary

use gh_release_client::ClientError;
use gh_release_notes::StoreError;
use thiserror::Error;

/// Fatal conditions aborting a pipeline stage
///
/// Nothing is retried: the stage stops, the process reports the failure and
/// exits non-zero. Outputs persisted by earlier stages stay untouched.
#[derive(Debug, Error)]
pub enum DrafterError {
    /// A required parameter, credential or configuration value is missing
    #[error("configuration error: {0}")]
    Config(String),

    /// A stage input table is missing or malformed
    #[error("input error: {0}")]
    Input(#[from] StoreError),

    /// A local file read or write failed
    #[error("{context}: {source}")]
    File {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// An outbound API call failed
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl DrafterError {
    pub fn file(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::File {
            context: context.into(),
            source,
        }
    }
}
