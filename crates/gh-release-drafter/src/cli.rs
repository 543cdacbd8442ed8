//! Command line surface of the drafter

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Drafts and publishes release notes from merged pull requests.
#[derive(Debug, Parser)]
#[command(name = "gh-release-drafter", version, about)]
pub struct Cli {
    /// Path to the drafter configuration file
    #[arg(long, global = true, default_value = "gh-release-drafter.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Queries merged pull requests into a CSV snapshot
    Query {
        /// Include pull requests merged after this timestamp
        #[arg(short = 's', long)]
        start_time: Option<String>,

        /// Start the window at the latest public release instead
        #[arg(long, conflicts_with = "start_time")]
        since_latest_release: bool,

        /// Output CSV file receiving the snapshot
        #[arg(short = 'p', long)]
        pull_requests_csv: PathBuf,
    },

    /// Categorises a snapshot into a digest and/or a categorised table
    Process {
        /// Input CSV file written by the query stage
        #[arg(short, long)]
        input_csv: PathBuf,

        /// Write the Markdown digest to this file
        #[arg(short, long)]
        markdown_file: Option<PathBuf>,

        /// Write the categorised table to this file
        #[arg(short, long)]
        csv_file: Option<PathBuf>,
    },

    /// Publishes the digest as the notes pre-release of a version tag
    Publish {
        /// Markdown file holding the release notes body
        #[arg(short = 'n', long)]
        release_notes_file: PathBuf,

        /// Version tag of the notes pre-release (e.g., v0.83.0-alpha)
        #[arg(short = 't', long)]
        version_tag: String,
    },
}
