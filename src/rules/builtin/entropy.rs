//! The entropy meta-rule — registered so it shows up in `RuleRegistry::all`
//! and can be enabled/disabled like any other rule, but its actual
//! detection is delegated to [`crate::entropy`] rather than a pattern
//! match (id `HIGH_ENTROPY_STRING`).

use crate::rules::model::{Category, Rule};
use crate::severity::Severity;

pub fn all() -> Vec<Rule> {
    vec![Rule {
        id: "HIGH_ENTROPY_STRING".into(),
        name: "High-Entropy String".into(),
        description: "Detects strings with high Shannon entropy that may be secrets.".into(),
        category: Category::Sensitive,
        severity: Severity::Medium,
        pattern: None,
        file_patterns: None,
        min_entropy: Some(4.0),
        min_length: Some(16),
        allowlist: vec![],
        enabled: true,
    }]
}
