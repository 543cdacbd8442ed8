//! Error taxonomy of the GitHub API boundary

use thiserror::Error;

/// Errors surfaced by [`GitHubClient`](crate::client::GitHubClient) implementations
///
/// Every variant is fatal to the invoking stage; nothing is retried. Each
/// carries a description of the attempted request so a failure can be
/// diagnosed without re-running the pipeline.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The call never produced a usable response: network failure, timeout
    /// or a non-success HTTP status.
    #[error("{request} failed: {message}")]
    Transport { request: String, message: String },

    /// A well-formed response that itself reports errors.
    #[error("{request} returned errors: {errors}")]
    Protocol { request: String, errors: String },

    /// A success response whose body did not match the expected shape.
    #[error("cannot decode the {request} response: {message}")]
    Decode { request: String, message: String },
}

impl ClientError {
    pub fn transport(request: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            request: request.to_string(),
            message: err.to_string(),
        }
    }

    pub fn protocol(request: &str, errors: &serde_json::Value) -> Self {
        Self::Protocol {
            request: request.to_string(),
            errors: errors.to_string(),
        }
    }

    pub fn decode(request: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            request: request.to_string(),
            message: err.to_string(),
        }
    }
}
