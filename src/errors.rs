//! Typed error enums for each collaborator.
//!
//! `anyhow` is used at the CLI boundary to collapse these; `thiserror` gives
//! each module its own precise error type. Neither may ever carry matched
//! secret bytes.

use thiserror::Error;

/// Raised on internal scanner failure. Its `Display` form is restricted by
/// contract to a finding count: never a matched value, never a raw finding.
#[derive(Debug, Error)]
#[error("internal scanner error after {findings_before_failure} findings; secrets scrubbed")]
pub struct ScanError {
    pub findings_before_failure: usize,
}

/// Raised when a rule's pattern or allowlist fails to compile. This happens
/// at registry build time (startup), never mid-scan.
#[derive(Debug, Error)]
#[error("rule {rule_id} failed to compile: {source}")]
pub struct RuleCompileError {
    pub rule_id: String,
    #[source]
    pub source: regex::Error,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: Box<toml::de::Error>,
    },
}

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("git is not installed or not on PATH")]
    GitNotFound,
    #[error("git command timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
    #[error("git error: {0}")]
    GitFailed(String),
}
