//! Markdown rendering of a classification
//!
//! The digest opens with a fixed warning notice, lists every non-empty
//! category in rule order and closes with the commit-author section.

use crate::classify::{CategorySection, Classification};

/// Label marking changes ported back from a newer development branch.
pub const BACKPORT_LABEL: &str = "backport";

/// Notice prepended to every digest.
pub const PRERELEASE_NOTICE: &str = "> [!WARNING]\n\
     > **Auto-generated release notes preview** — This is not a release.\n\
     > No binaries are available. These notes are updated automatically as PRs are merged.\n\n";

/// Renders the Markdown digest for `classification`.
///
/// Rendering the same classification twice yields byte-identical output.
pub fn render_markdown(classification: &Classification) -> String {
    let mut markdown = String::from(PRERELEASE_NOTICE);
    for section in &classification.sections {
        if section.pulls.is_empty() {
            continue;
        }
        push_section(&mut markdown, section);
    }
    push_contributors(&mut markdown, &classification.contributors);
    markdown
}

fn push_section(markdown: &mut String, section: &CategorySection) {
    markdown.push_str(&format!("## Full PR list of {}\n\n", section.title));
    for pull in &section.pulls {
        markdown.push_str(&format!("  - {} (#{})", pull.title, pull.number));
        if pull.has_label(BACKPORT_LABEL) {
            markdown.push_str(" _[backport]_");
        }
        markdown.push('\n');
    }
    markdown.push_str("\n\n");
}

fn push_contributors(markdown: &mut String, contributors: &[String]) {
    markdown.push_str("## Commit authors\n\n");
    for login in contributors {
        markdown.push_str(&format!("  - {login}\n"));
    }
}
