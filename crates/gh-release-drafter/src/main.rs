//! Release notes drafter
//!
//! Drafts and publishes release notes from merged pull requests in three
//! independent stages: `query` fetches the merged pull requests into a CSV
//! snapshot, `process` categorises a snapshot into a Markdown digest and a
//! categorised table, and `publish` upserts the digest as a pre-release on
//! GitHub. Each stage reads the previous stage's file, so any of them can be
//! re-run on its own.

mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use gh_release_client::OctocrabClient;

use cli::{Cli, Command};
use config::DrafterConfig;
use error::DrafterError;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), DrafterError> {
    let config = DrafterConfig::load(&cli.config)?;

    match cli.command {
        Command::Query {
            start_time,
            since_latest_release,
            pull_requests_csv,
        } => {
            let client = authenticated_client()?;
            commands::query::run(
                &client,
                &config,
                start_time,
                since_latest_release,
                &pull_requests_csv,
            )
            .await
        }
        Command::Process {
            input_csv,
            markdown_file,
            csv_file,
        } => commands::process::run(
            &config,
            &input_csv,
            markdown_file.as_deref(),
            csv_file.as_deref(),
        ),
        Command::Publish {
            release_notes_file,
            version_tag,
        } => {
            let client = authenticated_client()?;
            commands::publish::run(&client, &config, &release_notes_file, &version_tag).await
        }
    }
}

fn authenticated_client() -> Result<OctocrabClient, DrafterError> {
    let token = config::resolve_token()?;
    Ok(OctocrabClient::from_token(token)?)
}
