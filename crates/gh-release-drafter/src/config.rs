//! Drafter configuration
//!
//! The repository coordinates and the category rules come from a TOML file;
//! the API token comes from the environment (a `.env` file is honoured).

use std::env;
use std::fs;
use std::path::Path;

use gh_release_notes::{default_rules, Exclusions, FilterRule};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::DrafterError;

/// Configuration of one drafting pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrafterConfig {
    /// Owner of the repository the notes are drafted for
    pub org: String,
    /// Name of the repository
    pub repo: String,
    /// Trunk branch the pull requests were merged to
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Login of the automated dependency-update bot to leave out
    #[serde(default = "default_bot_author")]
    pub bot_author: String,
    /// Label marking pull requests that never appear in the notes
    #[serde(default = "default_exclude_label")]
    pub exclude_label: String,
    /// Ordered category rules; the built-in list when omitted
    #[serde(default = "default_rules")]
    pub rules: Vec<FilterRule>,
}

impl DrafterConfig {
    /// Loads the configuration from `path`.
    ///
    /// The repository coordinates have no usable defaults, so a missing or
    /// unreadable file is a configuration error rather than a fallback.
    pub fn load(path: &Path) -> Result<Self, DrafterError> {
        debug!("loading configuration from {}", path.display());
        let raw = fs::read_to_string(path)
            .map_err(|err| DrafterError::Config(format!("cannot read {}: {err}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|err| DrafterError::Config(format!("invalid {}: {err}", path.display())))
    }

    /// The records to drop before classification.
    pub fn exclusions(&self) -> Exclusions {
        Exclusions {
            bot_author: self.bot_author.clone(),
            exclude_label: self.exclude_label.clone(),
        }
    }
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_bot_author() -> String {
    "dependabot".to_string()
}

fn default_exclude_label() -> String {
    "website".to_string()
}

/// Resolves the API token from `GITHUB_TOKEN`, falling back to `GH_TOKEN`.
pub fn resolve_token() -> Result<String, DrafterError> {
    env::var("GITHUB_TOKEN")
        .or_else(|_| env::var("GH_TOKEN"))
        .map_err(|_| DrafterError::Config("GITHUB_TOKEN or GH_TOKEN must be set".to_string()))
}
