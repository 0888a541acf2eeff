//! Configuration schema — the `Config` data model.
//!
//! The engine treats `Config` as an immutable, already-valid input; the
//! loader that produces it is a separate, smaller concern. This module
//! still provides a small, convenience `Config::load` so the crate is
//! runnable end to end; it is not the subject of the detection pipeline's
//! test suite. Grounded on
//! `original_source/src/gitsafe/config/{schema,defaults,loader}.py`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::severity::Severity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub fail_on: Severity,
    pub scan_unstaged: bool,
    pub max_file_size_kb: u64,
    pub early_exit: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            fail_on: Severity::High,
            scan_unstaged: false,
            max_file_size_kb: 512,
            early_exit: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntropyConfig {
    pub enabled: bool,
    pub min_entropy: f64,
    pub min_length: usize,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        EntropyConfig {
            enabled: true,
            min_entropy: 4.0,
            min_length: 16,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub enable: Vec<String>,
    pub disable: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    pub files: Vec<String>,
    pub rules: Vec<String>,
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowlistConfig {
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CiConfig {
    pub max_findings: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub rules: RulesConfig,
    pub entropy: EntropyConfig,
    pub ignore: IgnoreConfig,
    pub allowlist: AllowlistConfig,
    pub ci: CiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scan: ScanConfig::default(),
            rules: RulesConfig::default(),
            entropy: EntropyConfig::default(),
            ignore: IgnoreConfig::default(),
            allowlist: AllowlistConfig::default(),
            ci: CiConfig::default(),
        }
    }
}

impl Config {
    /// Load `.gitsafe.toml` from `repo_root`, or `override_path` if given.
    /// Missing file is not an error — falls back to `Config::default()`.
    /// Unknown TOML keys are ignored (no `deny_unknown_fields`).
    pub fn load(repo_root: &Path, override_path: Option<&Path>) -> Result<Config, ConfigError> {
        let path = override_path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| repo_root.join(".gitsafe.toml"));

        if !path.exists() {
            return Ok(Config::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source: Box::new(source),
        })
    }
}

/// Starter config written by the `init` CLI subcommand. Grounded on
/// `original_source/src/gitsafe/config/defaults.py`'s `DEFAULT_TOML`.
pub const DEFAULT_TOML: &str = r#"# GitSafe Configuration
[scan]
fail_on = "high"          # low | medium | high | critical
scan_unstaged = false
max_file_size_kb = 512
# early_exit = false

[entropy]
enabled = true
min_entropy = 4.0
min_length = 16

[rules]
# enable = ["AWS_ACCESS_KEY", "PRIVATE_KEY"]
# disable = ["HIGH_ENTROPY_STRING"]

[ignore]
# files = ["tests/*", "docs/*"]
# rules = ["HARDCODED_PASSWORD"]
# paths = ["config/example.env"]

[allowlist]
# patterns = ["example", "localhost", "dummy_key", "test"]

[ci]
# max_findings = 50
"#;
