//! Ordered label filters driving categorisation
//!
//! Rules are evaluated in list order. A matching rule records the pull
//! request under its category; a rule with `remove` set also consumes the
//! record so later rules never see it.

use serde::{Deserialize, Serialize};

/// Category key of the fallback bucket for pull requests no rule matched.
pub const CATCH_ALL_CATEGORY: &str = "other";

/// Heading of the fallback bucket in rendered output.
pub const CATCH_ALL_TITLE: &str = "other changes";

/// Represents one entry of the ordered classification rule list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRule {
    /// Category key written to the categorised table
    pub category: String,
    /// Section heading used in the rendered digest
    pub title: String,
    /// Labels this rule matches on; one shared label is enough
    pub labels: Vec<String>,
    /// Whether a match removes the record from the pool seen by later rules
    #[serde(default = "default_remove")]
    pub remove: bool,
}

fn default_remove() -> bool {
    true
}

impl FilterRule {
    /// Creates a consuming rule for `category` matching any of `labels`
    pub fn new(category: &str, title: &str, labels: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            title: title.to_string(),
            labels: labels.iter().map(|label| label.to_string()).collect(),
            remove: true,
        }
    }

    /// Turns the rule into a marker that tags matches without consuming them
    pub fn keep_matches(mut self) -> Self {
        self.remove = false;
        self
    }
}

/// The built-in rule list used when the configuration does not override it.
pub fn default_rules() -> Vec<FilterRule> {
    vec![
        FilterRule::new(
            "game-compatibility",
            "game compatibility improvements",
            &["game compatibility"],
        )
        .keep_matches(),
        FilterRule::new(
            "graphics",
            "graphics-related changes",
            &["video", "voodoo", "shaders"],
        ),
        FilterRule::new("sound", "sound-related changes", &["audio", "midi"]),
        FilterRule::new("input-handling", "input-related changes", &["input handling"]),
        FilterRule::new("dos-integration", "DOS integration related changes", &["DOS"]),
        FilterRule::new(
            "localisation",
            "localisation-related changes",
            &["localisation", "translation"],
        ),
        FilterRule::new(
            "documentation",
            "documentation-related changes",
            &["documentation"],
        ),
        FilterRule::new(
            "project-maintenance",
            "project maintenance related changes",
            &[
                "ci",
                "build system",
                "cleanup",
                "packaging",
                "plumbing",
                "refactoring",
                "upstream sync",
            ],
        ),
        FilterRule::new("misc-enhancements", "miscellaneous enhancements", &["enhancement"]),
        FilterRule::new("misc-fixes", "miscellaneous fixes", &["bug", "regression"]),
    ]
}
