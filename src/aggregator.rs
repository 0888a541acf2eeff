//! Deduplication, severity gating, and `FINDING-NNN` assignment. Grounded
//! on `original_source/src/gitsafe/findings/aggregator.py`.

use std::collections::HashMap;

use crate::findings::{Finding, RawFinding};
use crate::severity::Severity;

/// Dedup key: `(rule_id, file, line_no)`. When a regex rule and the entropy
/// scanner both fire on the same key, the results are merged into one
/// `Finding` with both detection methods and the higher severity kept.
///
/// `is_blocking` is decided from the *first* raw finding's severity, not any
/// severity a later merge raises it to — matching the original aggregator.
pub fn deduplicate(raw_findings: Vec<RawFinding>, fail_on: Severity) -> Vec<Finding> {
    let mut findings: Vec<Finding> = Vec::new();
    let mut index: HashMap<(String, String, usize), usize> = HashMap::new();
    let mut counter = 0usize;

    for raw in raw_findings {
        let key = (raw.rule_id.clone(), raw.file.clone(), raw.line_no);

        if let Some(&pos) = index.get(&key) {
            let existing = &mut findings[pos];
            if !existing.detection_methods.contains(&raw.detection_method) {
                existing.detection_methods.push(raw.detection_method);
            }
            if raw.severity > existing.severity {
                existing.severity = raw.severity;
            }
            if raw.entropy_value.is_some() {
                existing.entropy_value = raw.entropy_value;
            }
        } else {
            counter += 1;
            let finding = Finding {
                id: format!("FINDING-{counter:03}"),
                rule_id: raw.rule_id,
                rule_name: raw.rule_name,
                severity: raw.severity,
                category: raw.category,
                file: raw.file,
                line_no: raw.line_no,
                matched_value: raw.matched_value,
                description: raw.description,
                detection_methods: vec![raw.detection_method],
                entropy_value: raw.entropy_value,
                commit: raw.commit,
                is_blocking: raw.severity.at_or_above(fail_on),
            };
            index.insert(key, findings.len());
            findings.push(finding);
        }
    }

    findings
}
