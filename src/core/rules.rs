//! Pattern/response rule tables

use crate::error::{HalError, HalResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One ordered matching rule: a regex and the templates it can answer with.
///
/// Templates reference capture groups positionally with `%1`..`%9`.
/// An empty pattern matches any input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub pattern: String,
    pub responses: Vec<String>,
}

impl Rule {
    pub fn new(pattern: &str, responses: &[&str]) -> Self {
        Self {
            pattern: pattern.to_string(),
            responses: responses.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// The catch-all rule that closes every table
    pub fn catch_all() -> Self {
        Self::new("", &["Is everything OK?", "Can you still communicate?"])
    }

    pub fn is_catch_all(&self) -> bool {
        self.pattern.is_empty()
    }
}

/// The stock HAL9000 table
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            r"You are (worrying|scary|disturbing)",
            &["Yes, I am %1.", "Oh, sooo %1."],
        ),
        Rule::new(
            r"Are you ([\w\s]+)\?",
            &["Why would you think I am %1?", "Would you like me to be %1?"],
        ),
        Rule::catch_all(),
    ]
}

/// Load a rule table from a JSON array of `{ "pattern", "responses" }` objects
pub fn load_rules(path: &Path) -> HalResult<Vec<Rule>> {
    let content = std::fs::read_to_string(path)?;
    let rules: Vec<Rule> = serde_json::from_str(&content)?;
    if rules.is_empty() {
        return Err(HalError::Rules(format!(
            "rule file {} contains no rules",
            path.display()
        )));
    }
    info!("📜 Loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_end_with_catch_all() {
        let rules = default_rules();
        assert_eq!(rules.len(), 3);
        assert!(rules.last().is_some_and(Rule::is_catch_all));
        assert!(rules[..2].iter().all(|r| !r.is_catch_all()));
    }

    #[test]
    fn test_load_rules_from_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("rules.json");
        std::fs::write(
            &path,
            r#"[
                { "pattern": "Open the (\\w+) doors", "responses": ["I'm sorry, I can't open the %1 doors."] },
                { "pattern": "", "responses": ["Dave?"] }
            ]"#,
        )
        .expect("write");

        let rules = load_rules(&path).expect("load");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].pattern, r"Open the (\w+) doors");
        assert!(rules[1].is_catch_all());
    }

    #[test]
    fn test_load_rules_rejects_empty_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("rules.json");
        std::fs::write(&path, "[]").expect("write");
        assert!(matches!(load_rules(&path), Err(HalError::Rules(_))));
    }
}
