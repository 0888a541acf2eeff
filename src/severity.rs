//! Four-valued severity with a total order.
//!
//! Modeled as a closed enum rather than a string so the hot loop in
//! [`crate::engine`] never re-parses or re-compares severity labels.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

impl Severity {
    /// `self >= threshold`, named for readability at call sites (the severity gate).
    pub fn at_or_above(self, threshold: Severity) -> bool {
        self >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn total_order() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn at_or_above() {
        assert!(Severity::High.at_or_above(Severity::Medium));
        assert!(Severity::High.at_or_above(Severity::High));
        assert!(!Severity::Medium.at_or_above(Severity::High));
    }

    #[rstest]
    #[case(Severity::Low, Severity::Medium, true)]
    #[case(Severity::Medium, Severity::High, true)]
    #[case(Severity::High, Severity::Critical, true)]
    #[case(Severity::Low, Severity::Critical, true)]
    #[case(Severity::Medium, Severity::Medium, false)]
    #[case(Severity::Critical, Severity::Low, false)]
    #[case(Severity::High, Severity::Low, false)]
    fn ordering_pairs(#[case] lower: Severity, #[case] higher: Severity, #[case] is_strictly_less: bool) {
        assert_eq!(lower < higher, is_strictly_less);
    }

    #[rstest]
    #[case(Severity::Low, Severity::Low, true)]
    #[case(Severity::Medium, Severity::Low, true)]
    #[case(Severity::High, Severity::Medium, true)]
    #[case(Severity::Critical, Severity::Critical, true)]
    #[case(Severity::Low, Severity::Medium, false)]
    #[case(Severity::Medium, Severity::Critical, false)]
    fn at_or_above_table(#[case] value: Severity, #[case] threshold: Severity, #[case] expected: bool) {
        assert_eq!(value.at_or_above(threshold), expected);
    }
}
