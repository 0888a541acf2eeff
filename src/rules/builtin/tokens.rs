//! Token rules — GitHub, GitLab, Slack, Stripe, generic JWT/API-key/token.
//! Grounded on `original_source/src/gitsafe/rules/builtin/tokens.py`.

use crate::rules::model::{Category, Rule};
use crate::severity::Severity;

fn rule(
    id: &str,
    name: &str,
    description: &str,
    category: Category,
    severity: Severity,
    pattern: &str,
    allowlist: &[&str],
) -> Rule {
    Rule {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        category,
        severity,
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
            "GITHUB_TOKEN",
            "GitHub Personal Access Token",
            "Detects GitHub PATs (ghp_, gho_, ghu_, ghs_, ghr_ prefixed).",
            Category::Secret,
            Severity::Critical,
            r"(?P<secret>gh[pousr]_[A-Za-z0-9_]{36,255})",
            &["example", "test", "ghp_xxxx"],
        ),
        rule(
            "GITLAB_TOKEN",
            "GitLab Personal Access Token",
            "Detects GitLab PATs (glpat- prefix).",
            Category::Secret,
            Severity::Critical,
            r"(?P<secret>glpat-[A-Za-z0-9\-_]{20,})",
            &["example", "test"],
        ),
        rule(
            "GENERIC_JWT",
            "JSON Web Token",
            "Detects JWTs (eyJ... three-part base64url tokens).",
            Category::Secret,
            Severity::High,
            r"(?P<secret>eyJ[A-Za-z0-9_-]{10,}\.eyJ[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]+)",
            &["example", "test"],
        ),
        rule(
            "SLACK_TOKEN",
            "Slack Token",
            "Detects Slack bot/user/workspace tokens.",
            Category::Secret,
            Severity::Critical,
            r"(?P<secret>xox[bporsca]-[0-9]{10,13}-[0-9]{10,13}[a-zA-Z0-9-]*)",
            &["example", "test"],
        ),
        rule(
            "SLACK_WEBHOOK",
            "Slack Webhook URL",
            "Detects Slack incoming webhook URLs.",
            Category::Secret,
            Severity::High,
            r"(?P<secret>https://hooks\.slack\.com/services/T[A-Za-z0-9]+/B[A-Za-z0-9]+/[A-Za-z0-9]+)",
            &[],
        ),
        rule(
            "STRIPE_SECRET_KEY",
            "Stripe Secret Key",
            "Detects Stripe secret API keys (sk_live_ prefix).",
            Category::Secret,
            Severity::Critical,
            r"(?P<secret>sk_live_[A-Za-z0-9]{24,})",
            &["example", "test"],
        ),
        rule(
            "STRIPE_PUBLISHABLE_KEY",
            "Stripe Publishable Key",
            "Detects Stripe publishable keys. Lower severity since they are semi-public.",
            Category::Key,
            Severity::Low,
            r"(?P<secret>pk_live_[A-Za-z0-9]{24,})",
            &[],
        ),
        rule(
            "GENERIC_API_KEY",
            "Generic API Key Assignment",
            "Detects generic API key assignments in code.",
            Category::Secret,
            Severity::Medium,
            r"(?i)(?:api_key|apikey|api_secret|api_token)\s*[:=]\s*['\"](?P<secret>[A-Za-z0-9_\-]{16,})['\"]",
            &["example", "test", "dummy", "placeholder", "your[-_]?api"],
        ),
        rule(
            "GENERIC_TOKEN",
            "Generic Token Assignment",
            "Detects generic token assignments (token = '...').",
            Category::Secret,
            Severity::Medium,
            r"(?i)(?:token|access_token|auth_token|secret_token)\s*[:=]\s*['\"](?P<secret>[A-Za-z0-9_\-]{16,})['\"]",
            &["example", "test", "dummy", "placeholder", "your[-_]?token"],
        ),
    ]
}
