//! Password / connection-string rules. Grounded on
//! `original_source/src/gitsafe/rules/builtin/passwords.py`.

use crate::rules::model::{Category, Rule};
use crate::severity::Severity;

fn rule(id: &str, name: &str, description: &str, pattern: &str, allowlist: &[&str]) -> Rule {
    Rule {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        category: Category::Credential,
        severity: Severity::High,
        pattern: Some(pattern.into()),
        file_patterns: None,
        min_entropy: None,
        min_length: None,
        allowlist: allowlist.iter().map(|s| s.to_string()).collect(),
        enabled: true,
    }
}

pub fn all() -> Vec<Rule> {
    vec![
        rule(
            "HARDCODED_PASSWORD",
            "Hardcoded Password",
            "Detects password assignments in code (password = '...').",
            r#"(?i)(?:password|passwd|pwd|pass)\s*[:=]\s*['"](?P<secret>[^'"]{8,})['"]"#,
            &[
                "example",
                "test",
                "dummy",
                "placeholder",
                "changeme",
                "password",
                r"\*{3,}",
                "x{4,}",
                "your[-_]?pass",
            ],
        ),
        rule(
            "CONNECTION_STRING",
            "Database Connection String",
            "Detects connection strings with embedded credentials.",
            r"(?i)(?:mongodb(?:\+srv)?|postgres(?:ql)?|mysql|redis|amqp|mssql)://[^:]+:(?P<secret>[^@\s]{8,})@[^\s]+",
            &["localhost", r"127\.0\.0\.1", r"example\.com", "test"],
        ),
        rule(
            "BASIC_AUTH_URL",
            "Basic Auth in URL",
            "Detects URLs with embedded username:password.",
            r"https?://[^:]+:(?P<secret>[^@\s]{8,})@[^\s]+",
            &["localhost", r"127\.0\.0\.1", r"example\.com", "test"],
        ),
    ]
}
