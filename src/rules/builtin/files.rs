//! File-level rules — `.env`, PEM, SSH keys, credential files, keystores.
//! Grounded on `original_source/src/gitsafe/rules/builtin/env_files.py`.

use crate::rules::model::{Category, Rule};
use crate::severity::Severity;

fn file_rule(
    id: &str,
    name: &str,
    description: &str,
    category: Category,
    severity: Severity,
    file_patterns: &[&str],
    allowlist: &[&str],
) -> Rule {
    Rule {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        category,
        severity,
        pattern: None,
        file_patterns: Some(file_patterns.iter().map(|s| s.to_string()).collect()),
        min_entropy: None,
        min_length: None,
        allowlist: allowlist.iter().map(|s| s.to_string()).collect(),
        enabled: true,
    }
}

pub fn all() -> Vec<Rule> {
    vec![
        file_rule(
            "ENV_FILE",
            ".env File",
            "Detects .env files containing environment variable secrets.",
            Category::Config,
            Severity::High,
            &[".env", ".env.*", "*.env"],
            &[r"\.env\.example$", r"\.env\.template$", r"\.env\.sample$"],
        ),
        file_rule(
            "PEM_FILE",
            "PEM Key File",
            "Detects PEM-encoded key/certificate files.",
            Category::Key,
            Severity::Critical,
            &["*.pem", "*.key"],
            &[],
        ),
        file_rule(
            "SSH_KEY_FILE",
            "SSH Private Key File",
            "Detects SSH private key files (id_rsa, id_ed25519, etc.).",
            Category::Key,
            Severity::Critical,
            &["id_rsa", "id_dsa", "id_ecdsa", "id_ed25519"],
            &[],
        ),
        file_rule(
            "CREDENTIALS_FILE",
            "Credentials File",
            "Detects common credential files (credentials.json, .htpasswd, etc.).",
            Category::Config,
            Severity::High,
            &[
                "credentials.json",
                "service-account*.json",
                ".htpasswd",
                ".netrc",
                ".npmrc",
                ".pypirc",
            ],
            &[],
        ),
        file_rule(
            "KEYSTORE_FILE",
            "Keystore File",
            "Detects Java/Android keystore files.",
            Category::Key,
            Severity::High,
            &["*.keystore", "*.jks"],
            &[],
        ),
    ]
}
