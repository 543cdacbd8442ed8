//! `process` stage: categorise a snapshot and render the outputs

use std::fs;
use std::path::Path;

use log::info;

use gh_release_notes::{classify, render_markdown, store};

use crate::config::DrafterConfig;
use crate::error::DrafterError;

/// Classifies the snapshot at `input` and writes the requested outputs.
///
/// At least one of `markdown_file` and `csv_file` must be given; the stage
/// never talks to the network.
pub fn run(
    config: &DrafterConfig,
    input: &Path,
    markdown_file: Option<&Path>,
    csv_file: Option<&Path>,
) -> Result<(), DrafterError> {
    if markdown_file.is_none() && csv_file.is_none() {
        return Err(DrafterError::Config(
            "at least one of --markdown-file or --csv-file must be specified".to_string(),
        ));
    }

    let pulls = store::read_pull_requests(input)?;
    info!(
        "classifying {} pull requests from {}",
        pulls.len(),
        input.display()
    );
    let classification = classify(pulls, &config.rules, &config.exclusions());

    if let Some(path) = markdown_file {
        let markdown = render_markdown(&classification);
        fs::write(path, &markdown)
            .map_err(|err| DrafterError::file(format!("cannot write {}", path.display()), err))?;
        info!("digest written to {}", path.display());
    }
    if let Some(path) = csv_file {
        store::write_categorized(path, &classification.categorized())?;
        info!("categorised table written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use gh_release_notes::{default_rules, write_pull_requests, PullRequest};
    use tempfile::tempdir;

    fn config() -> DrafterConfig {
        DrafterConfig {
            org: "acme".to_string(),
            repo: "widgets".to_string(),
            branch: "main".to_string(),
            bot_author: "dependabot".to_string(),
            exclude_label: "website".to_string(),
            rules: default_rules(),
        }
    }

    fn pull(number: u64, title: &str, author: &str, labels: &[&str]) -> PullRequest {
        PullRequest {
            title: title.to_string(),
            number,
            author: author.to_string(),
            url: format!("https://github.com/acme/widgets/pull/{number}"),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-02T00:00:00Z".to_string(),
            merged_at: "2024-01-03T00:00:00Z".to_string(),
            labels: labels.iter().map(|label| label.to_string()).collect(),
        }
    }

    #[test]
    fn test_process_writes_digest_and_categorised_table() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pulls.csv");
        let markdown = dir.path().join("notes.md");
        let table = dir.path().join("categorized.csv");
        write_pull_requests(
            &input,
            &[
                pull(1, "Fix MIDI lag", "alice", &["midi", "bug"]),
                pull(2, "Mystery tweak", "bob", &[]),
            ],
        )
        .unwrap();

        run(&config(), &input, Some(&markdown), Some(&table)).unwrap();

        let digest = fs::read_to_string(&markdown).unwrap();
        assert!(digest.contains("## Full PR list of sound-related changes"));
        assert!(digest.contains("  - Fix MIDI lag (#1)\n"));
        assert!(digest.contains("## Full PR list of other changes"));
        assert!(digest.contains("  - bob\n"));

        let raw = fs::read_to_string(&table).unwrap();
        assert!(raw.lines().nth(1).unwrap().ends_with(",sound"));
        assert!(raw.lines().nth(2).unwrap().ends_with(",other"));
    }

    #[test]
    fn test_process_requires_at_least_one_output() {
        let err = run(&config(), Path::new("unused.csv"), None, None).unwrap_err();

        assert!(matches!(err, DrafterError::Config(_)));
    }

    #[test]
    fn test_missing_input_is_an_input_error() {
        let dir = tempdir().unwrap();
        let markdown = dir.path().join("notes.md");

        let err = run(&config(), &dir.path().join("absent.csv"), Some(&markdown), None)
            .unwrap_err();

        assert!(matches!(err, DrafterError::Input(_)));
    }
}
