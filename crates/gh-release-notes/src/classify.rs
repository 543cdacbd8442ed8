//! Ordered-rule classification of merged pull requests
//!
//! The classifier drops excluded records, then folds the rule list over the
//! remaining pool. A consuming rule partitions the pool; a marker rule only
//! tags it. Whatever survives every rule lands in the catch-all category.

use crate::records::{CategorizedPullRequest, PullRequest, UNKNOWN_AUTHOR};
use crate::rules::{FilterRule, CATCH_ALL_CATEGORY, CATCH_ALL_TITLE};

/// Records dropped from the pool before any rule runs
#[derive(Debug, Clone)]
pub struct Exclusions {
    /// Login of the automated dependency-update bot
    pub bot_author: String,
    /// Label marking pull requests that never appear in the notes
    pub exclude_label: String,
}

impl Default for Exclusions {
    fn default() -> Self {
        Self {
            bot_author: "dependabot".to_string(),
            exclude_label: "website".to_string(),
        }
    }
}

/// The pull requests recorded under one category
#[derive(Debug, Clone)]
pub struct CategorySection {
    pub category: String,
    pub title: String,
    /// Whether the matching rule consumed its records
    pub exclusive: bool,
    pub pulls: Vec<PullRequest>,
}

/// Result of classifying one snapshot of merged pull requests
#[derive(Debug, Clone)]
pub struct Classification {
    /// Sections in rule order, the catch-all last
    pub sections: Vec<CategorySection>,
    /// Contributor logins across the whole input, case-insensitively sorted
    pub contributors: Vec<String>,
}

impl Classification {
    /// Flat view of the classification: every retained pull request exactly
    /// once, tagged with the category of the rule that consumed it or with
    /// the catch-all. Marker sections contribute nothing here because their
    /// records stayed in the pool.
    pub fn categorized(&self) -> Vec<CategorizedPullRequest> {
        self.sections
            .iter()
            .filter(|section| section.exclusive)
            .flat_map(|section| {
                section.pulls.iter().map(|pull| CategorizedPullRequest {
                    pull: pull.clone(),
                    category: section.category.clone(),
                })
            })
            .collect()
    }
}

/// Classifies `pulls` against the ordered `rules`.
///
/// Excluded records are invisible to every rule, to the catch-all and to the
/// categorised view; contributors are still collected from the full input.
/// Titles are trimmed on intake and every section is sorted by title,
/// case-insensitively.
pub fn classify(
    pulls: Vec<PullRequest>,
    rules: &[FilterRule],
    exclusions: &Exclusions,
) -> Classification {
    let contributors = contributor_logins(&pulls, exclusions);

    let mut remaining: Vec<PullRequest> = pulls
        .into_iter()
        .filter(|pull| {
            pull.author != exclusions.bot_author && !pull.has_label(&exclusions.exclude_label)
        })
        .map(|mut pull| {
            pull.title = pull.title.trim().to_string();
            pull
        })
        .collect();

    let mut sections = Vec::with_capacity(rules.len() + 1);
    for rule in rules {
        let matched = if rule.remove {
            let (matched, unmatched): (Vec<PullRequest>, Vec<PullRequest>) = remaining
                .into_iter()
                .partition(|pull| pull.has_any_label(&rule.labels));
            remaining = unmatched;
            matched
        } else {
            remaining
                .iter()
                .filter(|pull| pull.has_any_label(&rule.labels))
                .cloned()
                .collect()
        };
        sections.push(CategorySection {
            category: rule.category.clone(),
            title: rule.title.clone(),
            exclusive: rule.remove,
            pulls: sorted_by_title(matched),
        });
    }

    sections.push(CategorySection {
        category: CATCH_ALL_CATEGORY.to_string(),
        title: CATCH_ALL_TITLE.to_string(),
        exclusive: true,
        pulls: sorted_by_title(remaining),
    });

    Classification {
        sections,
        contributors,
    }
}

fn sorted_by_title(mut pulls: Vec<PullRequest>) -> Vec<PullRequest> {
    pulls.sort_by_key(|pull| pull.title.to_lowercase());
    pulls
}

/// Distinct author logins worth crediting: empty logins, the unknown-author
/// placeholder and the bot are left out.
fn contributor_logins(pulls: &[PullRequest], exclusions: &Exclusions) -> Vec<String> {
    let mut logins: Vec<String> = pulls
        .iter()
        .map(|pull| pull.author.clone())
        .filter(|author| {
            let author = author.as_str();
            !author.is_empty() && author != UNKNOWN_AUTHOR && author != exclusions.bot_author
        })
        .collect();
    logins.sort();
    logins.dedup();
    logins.sort_by_key(|login| login.to_lowercase());
    logins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::default_rules;

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

    fn sound_rule() -> FilterRule {
        FilterRule::new("sound", "sound-related changes", &["audio", "midi"])
    }

    fn section<'a>(classification: &'a Classification, category: &str) -> &'a CategorySection {
        classification
            .sections
            .iter()
            .find(|section| section.category == category)
            .unwrap()
    }

    #[test]
    fn test_matching_and_unmatched_records_split_between_rule_and_catch_all() {
        let rules = vec![FilterRule::new("sound", "sound-related changes", &["audio"])];
        let pulls = vec![
            pull(1, "Fix crash", "alice", &["audio", "bug"]),
            pull(2, "Update docs", "bob", &["documentation"]),
        ];

        let classification = classify(pulls, &rules, &Exclusions::default());
        let categorized = classification.categorized();

        assert_eq!(categorized.len(), 2);
        assert_eq!(categorized[0].pull.title, "Fix crash");
        assert_eq!(categorized[0].category, "sound");
        assert_eq!(categorized[1].pull.title, "Update docs");
        assert_eq!(categorized[1].category, "other");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = vec![
            sound_rule(),
            FilterRule::new("misc-fixes", "miscellaneous fixes", &["bug"]),
        ];
        let pulls = vec![pull(1, "Fix crackling", "alice", &["audio", "bug"])];

        let classification = classify(pulls, &rules, &Exclusions::default());

        assert_eq!(section(&classification, "sound").pulls.len(), 1);
        assert!(section(&classification, "misc-fixes").pulls.is_empty());
        assert_eq!(classification.categorized()[0].category, "sound");
    }

    #[test]
    fn test_marker_rule_keeps_the_record_for_later_rules() {
        let rules = vec![
            FilterRule::new(
                "game-compatibility",
                "game compatibility improvements",
                &["game compatibility"],
            )
            .keep_matches(),
            sound_rule(),
        ];
        let pulls = vec![pull(1, "Fix timing", "alice", &["game compatibility", "audio"])];

        let classification = classify(pulls, &rules, &Exclusions::default());

        assert_eq!(section(&classification, "game-compatibility").pulls.len(), 1);
        assert_eq!(section(&classification, "sound").pulls.len(), 1);

        let categorized = classification.categorized();
        assert_eq!(categorized.len(), 1);
        assert_eq!(categorized[0].category, "sound");
    }

    #[test]
    fn test_record_matched_only_by_a_marker_rule_stays_in_the_catch_all() {
        let rules = vec![
            FilterRule::new(
                "game-compatibility",
                "game compatibility improvements",
                &["game compatibility"],
            )
            .keep_matches(),
            sound_rule(),
        ];
        let pulls = vec![pull(1, "Fix timing", "alice", &["game compatibility"])];

        let classification = classify(pulls, &rules, &Exclusions::default());

        assert_eq!(section(&classification, "game-compatibility").pulls.len(), 1);
        assert_eq!(section(&classification, "other").pulls.len(), 1);

        let categorized = classification.categorized();
        assert_eq!(categorized.len(), 1);
        assert_eq!(categorized[0].category, "other");
    }

    #[test]
    fn test_bot_authored_records_are_dropped_entirely() {
        let pulls = vec![
            pull(1, "Bump serde", "dependabot", &["bug"]),
            pull(2, "Fix crash", "alice", &["bug"]),
        ];

        let classification = classify(
            pulls,
            &[FilterRule::new("misc-fixes", "miscellaneous fixes", &["bug"])],
            &Exclusions::default(),
        );
        let categorized = classification.categorized();

        assert_eq!(categorized.len(), 1);
        assert_eq!(categorized[0].pull.author, "alice");
        assert!(!classification.contributors.contains(&"dependabot".to_string()));
    }

    #[test]
    fn test_exclusion_label_drops_the_record_but_keeps_the_author() {
        let pulls = vec![
            pull(1, "Refresh landing page", "carol", &["website"]),
            pull(2, "Fix crash", "alice", &["bug"]),
        ];

        let classification = classify(pulls, &default_rules(), &Exclusions::default());

        assert!(classification
            .categorized()
            .iter()
            .all(|row| row.pull.number != 1));
        assert_eq!(classification.contributors, vec!["alice", "carol"]);
    }

    #[test]
    fn test_titles_are_trimmed_and_sections_sorted_case_insensitively() {
        let pulls = vec![
            pull(1, "  zip through menus ", "alice", &["audio"]),
            pull(2, "Align mixer volumes", "bob", &["audio"]),
            pull(3, "boost bass", "carol", &["audio"]),
        ];

        let classification = classify(pulls, &[sound_rule()], &Exclusions::default());
        let titles: Vec<&str> = section(&classification, "sound")
            .pulls
            .iter()
            .map(|pull| pull.title.as_str())
            .collect();

        assert_eq!(titles, vec!["Align mixer volumes", "boost bass", "zip through menus"]);
    }

    #[test]
    fn test_every_retained_record_is_categorised_exactly_once() {
        let rules = default_rules();
        let pulls = vec![
            pull(1, "Add shader presets", "alice", &["shaders"]),
            pull(2, "Fix MIDI lag", "bob", &["midi", "bug"]),
            pull(3, "Improve timing", "carol", &["game compatibility"]),
            pull(4, "Mystery tweak", "dave", &[]),
            pull(5, "Bump deps", "dependabot", &["ci"]),
        ];

        let classification = classify(pulls, &rules, &Exclusions::default());
        let categorized = classification.categorized();

        assert_eq!(categorized.len(), 4);
        for row in &categorized {
            assert!(
                row.category == "other" || rules.iter().any(|rule| rule.category == row.category),
                "unexpected category {}",
                row.category
            );
        }
    }

    #[test]
    fn test_record_without_labels_lands_in_the_catch_all() {
        let pulls = vec![pull(1, "Mystery tweak", "alice", &[])];

        let classification = classify(pulls, &default_rules(), &Exclusions::default());

        assert_eq!(section(&classification, "other").pulls.len(), 1);
    }

    #[test]
    fn test_contributors_are_deduplicated_and_sorted() {
        let pulls = vec![
            pull(1, "One", "Zed", &[]),
            pull(2, "Two", "alice", &[]),
            pull(3, "Three", "Zed", &[]),
            pull(4, "Four", "-", &[]),
            pull(5, "Five", "", &[]),
        ];

        let classification = classify(pulls, &[], &Exclusions::default());

        assert_eq!(classification.contributors, vec!["alice", "Zed"]);
    }
}
