//! Core building blocks of the release notes drafting pipeline
//!
//! This crate owns everything between the fetched pull requests and the
//! published notes: the record model, the ordered category rules, the
//! classifier, the Markdown renderer and the CSV tables the stages exchange.

pub mod classify;
pub mod records;
pub mod render;
pub mod rules;
pub mod store;

pub use classify::{classify, CategorySection, Classification, Exclusions};
pub use records::{CategorizedPullRequest, PullRequest, UNKNOWN_AUTHOR};
pub use render::{render_markdown, BACKPORT_LABEL, PRERELEASE_NOTICE};
pub use rules::{default_rules, FilterRule, CATCH_ALL_CATEGORY, CATCH_ALL_TITLE};
pub use store::{read_pull_requests, write_categorized, write_pull_requests, StoreError};
