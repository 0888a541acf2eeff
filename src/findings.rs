//! Finding data model — `RawFinding`, `Finding`, `Suppression`, and
//! `ScanResult`. Grounded on
//! `original_source/src/gitsafe/findings/models.py`.

use serde::Serialize;

use crate::rules::Category;
use crate::severity::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Regex,
    Entropy,
    FilePattern,
}

/// A single match produced by the engine, before dedup. `line_no` is `0`
/// for file-rule matches.
#[derive(Debug, Clone)]
pub struct RawFinding {
    pub rule_id: String,
    pub rule_name: String,
    pub severity: Severity,
    pub category: Category,
    pub file: String,
    pub line_no: usize,
    pub matched_value: String,
    pub description: String,
    pub detection_method: DetectionMethod,
    pub entropy_value: Option<f64>,
    pub commit: Option<String>,
}

/// A deduplicated, severity-gated finding, as handed to callers.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub id: String,
    pub rule_id: String,
    pub rule_name: String,
    pub severity: Severity,
    pub category: Category,
    pub file: String,
    pub line_no: usize,
    pub matched_value: String,
    pub description: String,
    pub detection_methods: Vec<DetectionMethod>,
    pub entropy_value: Option<f64>,
    pub commit: Option<String>,
    pub is_blocking: bool,
}

/// An audit record of a silenced potential finding. Never carries matched
/// bytes.
#[derive(Debug, Clone, Serialize)]
pub struct Suppression {
    pub rule_id: String,
    pub file: String,
    pub line_no: usize,
    pub reason: SuppressionReason,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuppressionReason {
    Inline,
    NextLine,
    Gitsafeignore,
}

/// The final product of a scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub findings: Vec<Finding>,
    pub suppressions: Vec<Suppression>,
    pub skipped_files: Vec<String>,
    pub scanned_files: usize,
    pub blocked: bool,
    pub duration_ms: f64,
}

impl ScanResult {
    pub fn blocking_findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_blocking)
    }
}

/// Partial reveal locally (first 4 + last 2 chars); total redaction in CI.
/// Grounded on `original_source/src/gitsafe/findings/redactor.py`.
pub fn redact(value: &str, ci_mode: bool) -> String {
    if ci_mode {
        return "[REDACTED]".to_string();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 6 {
        return "[REDACTED]".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_local_reveals_partial() {
        assert_eq!(redact("ghp_Abc123xyz9", false), "ghp_...z9");
    }

    #[test]
    fn redact_short_value_is_fully_redacted() {
        assert_eq!(redact("abcdef", false), "[REDACTED]");
    }

    #[test]
    fn redact_ci_mode_is_always_full() {
        assert_eq!(redact("ghp_Abc123xyz9", true), "[REDACTED]");
    }
}
