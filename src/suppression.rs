//! Inline suppression comments and the `.gitsafeignore` file. Grounded on
//! `original_source/src/gitsafe/scanner/suppression.py`.
//!
//! Conventions (matches ESLint/pylint/semgrep):
//!   - `#gitsafe-ignore` on line N suppresses all rules on line N.
//!   - `#gitsafe-ignore` as a standalone comment suppresses line N+1.
//!   - `#gitsafe-ignore[RULE_A,RULE_B]` suppresses only those rules.
//!   - `#nosec` is a shorthand for `#gitsafe-ignore`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use globset::Glob;
use lazy_static::lazy_static;
use regex::Regex;

use crate::findings::{Suppression, SuppressionReason};

lazy_static! {
    static ref SUPPRESS_RE: Regex =
        Regex::new(r"#\s*(?:gitsafe-ignore|nosec)(?:\[([A-Za-z0-9_,\s]+)\])?\s*$").unwrap();
}

/// `None` scope means "suppress every rule"; `Some(ids)` scopes to those ids.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LineSuppression {
    scope: Option<HashSet<String>>,
}

fn parse_inline_suppression(line_content: &str) -> Option<LineSuppression> {
    let caps = SUPPRESS_RE.captures(line_content)?;
    let scope = caps.get(1).map(|m| {
        m.as_str()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<_>>()
    });
    Some(LineSuppression { scope })
}

fn is_pure_comment(line_content: &str) -> bool {
    let stripped = line_content.trim();
    stripped.starts_with('#') || stripped.starts_with("//") || stripped.starts_with("/*")
}

/// Pre-scans a file's added lines for suppression markers, then answers
/// per-(line, rule) suppression queries during the main scan pass.
#[derive(Default)]
pub struct SuppressionChecker {
    line_suppressions: HashMap<String, HashMap<usize, LineSuppression>>,
}

impl SuppressionChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `lines` must be the file's added lines in ascending order, so
    /// next-line suppression can see the previous line.
    pub fn register_lines(&mut self, file: &str, lines: &[(usize, String)]) {
        let mut mapping: HashMap<usize, LineSuppression> = HashMap::new();
        let mut pending_next_line: Option<LineSuppression> = None;

        for (line_no, content) in lines {
            match parse_inline_suppression(content) {
                Some(suppression) => {
                    mapping.insert(*line_no, suppression.clone());
                    pending_next_line = if is_pure_comment(content) {
                        Some(suppression)
                    } else {
                        None
                    };
                }
                None => {
                    if let Some(carried) = pending_next_line.take() {
                        mapping.insert(*line_no, carried);
                    }
                }
            }
        }

        self.line_suppressions.insert(file.to_string(), mapping);
    }

    pub fn is_suppressed(&self, file: &str, line_no: usize, rule_id: &str) -> Option<Suppression> {
        let entry = self.line_suppressions.get(file)?.get(&line_no)?;

        match &entry.scope {
            None => Some(Suppression {
                rule_id: rule_id.to_string(),
                file: file.to_string(),
                line_no,
                reason: SuppressionReason::Inline,
                source: "#gitsafe-ignore".to_string(),
            }),
            Some(ids) if ids.contains(rule_id) => Some(Suppression {
                rule_id: rule_id.to_string(),
                file: file.to_string(),
                line_no,
                reason: SuppressionReason::Inline,
                source: format!("#gitsafe-ignore[{rule_id}]"),
            }),
            Some(_) => None,
        }
    }
}

/// Compiled `.gitsafeignore`: global path globs plus rule-scoped ones.
#[derive(Default)]
pub struct GitSafeIgnore {
    global_patterns: Vec<(String, globset::GlobMatcher)>,
    rule_patterns: HashMap<String, Vec<(String, globset::GlobMatcher)>>,
}

impl GitSafeIgnore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing file is not an error: returns an ignore list with no entries.
    pub fn from_file(path: &Path) -> Self {
        let mut instance = GitSafeIgnore::new();
        let Ok(text) = std::fs::read_to_string(path) else {
            return instance;
        };

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix("rule:") {
                let mut parts = rest.splitn(2, char::is_whitespace);
                let (Some(rule_id), Some(pattern)) = (parts.next(), parts.next()) else {
                    continue;
                };
                let pattern = pattern.trim();
                if let Ok(glob) = Glob::new(pattern) {
                    instance
                        .rule_patterns
                        .entry(rule_id.to_string())
                        .or_default()
                        .push((pattern.to_string(), glob.compile_matcher()));
                }
                continue;
            }

            if let Ok(glob) = Glob::new(line) {
                instance
                    .global_patterns
                    .push((line.to_string(), glob.compile_matcher()));
            }
        }

        instance
    }

    pub fn is_ignored(&self, filepath: &str, rule_id: Option<&str>) -> bool {
        if self.global_patterns.iter().any(|(_, m)| m.is_match(filepath)) {
            return true;
        }
        if let Some(rule_id) = rule_id {
            if let Some(patterns) = self.rule_patterns.get(rule_id) {
                return patterns.iter().any(|(_, m)| m.is_match(filepath));
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_line_suppression_blocks_the_finding() {
        let mut checker = SuppressionChecker::new();
        checker.register_lines(
            "config.py",
            &[(3, "AWS_KEY = \"x\" #gitsafe-ignore".to_string())],
        );
        assert!(checker.is_suppressed("config.py", 3, "AWS_ACCESS_KEY").is_some());
    }

    #[test]
    fn scoped_suppression_only_matches_listed_rules() {
        let mut checker = SuppressionChecker::new();
        checker.register_lines(
            "config.py",
            &[(3, "KEY = \"x\" #gitsafe-ignore[AWS_ACCESS_KEY]".to_string())],
        );
        assert!(checker.is_suppressed("config.py", 3, "AWS_ACCESS_KEY").is_some());
        assert!(checker.is_suppressed("config.py", 3, "GITHUB_TOKEN").is_none());
    }

    #[test]
    fn standalone_comment_suppresses_next_line() {
        let mut checker = SuppressionChecker::new();
        checker.register_lines(
            "config.py",
            &[
                (3, "# gitsafe-ignore".to_string()),
                (4, "AWS_KEY = \"leaked\"".to_string()),
            ],
        );
        assert!(checker.is_suppressed("config.py", 3, "AWS_ACCESS_KEY").is_some());
        assert!(checker.is_suppressed("config.py", 4, "AWS_ACCESS_KEY").is_some());
    }

    #[test]
    fn inline_suppression_does_not_carry_past_one_line() {
        let mut checker = SuppressionChecker::new();
        checker.register_lines(
            "config.py",
            &[
                (3, "KEY = \"x\" #gitsafe-ignore".to_string()),
                (4, "OTHER = \"y\"".to_string()),
            ],
        );
        assert!(checker.is_suppressed("config.py", 4, "AWS_ACCESS_KEY").is_none());
    }

    #[test]
    fn nosec_is_a_shorthand() {
        let mut checker = SuppressionChecker::new();
        checker.register_lines("a.py", &[(1, "token = \"x\" # nosec".to_string())]);
        assert!(checker.is_suppressed("a.py", 1, "GENERIC_TOKEN").is_some());
    }

    #[test]
    fn gitsafeignore_missing_file_ignores_nothing() {
        let ignore = GitSafeIgnore::from_file(Path::new("/nonexistent/.gitsafeignore"));
        assert!(!ignore.is_ignored("tests/fixture.py", None));
    }

    #[test]
    fn gitsafeignore_global_glob_matches() {
        let dir = std::env::temp_dir().join("gitsafe-core-test-ignore-global");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(".gitsafeignore");
        std::fs::write(&path, "tests/*\n# a comment\n").unwrap();
        let ignore = GitSafeIgnore::from_file(&path);
        assert!(ignore.is_ignored("tests/fixture.py", None));
        assert!(!ignore.is_ignored("src/main.py", None));
    }

    #[test]
    fn gitsafeignore_rule_scoped_glob() {
        let dir = std::env::temp_dir().join("gitsafe-core-test-ignore-scoped");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(".gitsafeignore");
        std::fs::write(&path, "rule:HARDCODED_PASSWORD tests/fixtures/*\n").unwrap();
        let ignore = GitSafeIgnore::from_file(&path);
        assert!(ignore.is_ignored("tests/fixtures/creds.py", Some("HARDCODED_PASSWORD")));
        assert!(!ignore.is_ignored("tests/fixtures/creds.py", Some("AWS_ACCESS_KEY")));
        assert!(!ignore.is_ignored("tests/fixtures/creds.py", None));
    }
}
