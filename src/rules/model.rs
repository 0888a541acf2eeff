//! Rule data model. A rule is exactly one of: content rule (has `pattern`),
//! file rule (has `file_patterns`, no `pattern`), or entropy rule (has
//! `min_entropy`). Grounded on `original_source/src/gitsafe/rules/models.py`.

use globset::{Glob, GlobMatcher};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::RuleCompileError;
use crate::severity::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Secret,
    Credential,
    Key,
    Config,
    Sensitive,
}

/// A rule definition as loaded from built-ins or a user rule file.
/// Compiled matchers are built separately (see [`CompiledRule`]) so `Rule`
/// itself stays a plain, serialisable value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub severity: Severity,
    pub pattern: Option<String>,
    pub file_patterns: Option<Vec<String>>,
    pub min_entropy: Option<f64>,
    pub min_length: Option<usize>,
    #[serde(default)]
    pub allowlist: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Rule {
    pub fn is_file_rule(&self) -> bool {
        self.file_patterns.is_some() && self.pattern.is_none()
    }

    pub fn is_entropy_rule(&self) -> bool {
        self.min_entropy.is_some()
    }
}

/// A rule plus its eagerly-compiled matchers. The registry holds these so
/// the hot scan loop never compiles a pattern.
pub struct CompiledRule {
    pub rule: Rule,
    pub pattern: Option<Regex>,
    pub file_patterns: Vec<GlobMatcher>,
    pub allowlist: Vec<Regex>,
}

impl CompiledRule {
    pub fn compile(rule: Rule) -> Result<Self, RuleCompileError> {
        let pattern = match &rule.pattern {
            Some(p) => Some(Regex::new(p).map_err(|source| RuleCompileError {
                rule_id: rule.id.clone(),
                source,
            })?),
            None => None,
        };

        let file_patterns = rule
            .file_patterns
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|g| {
                Glob::new(g)
                    .map(|glob| glob.compile_matcher())
                    .map_err(|_| RuleCompileError {
                        rule_id: rule.id.clone(),
                        source: regex::Error::Syntax(format!("invalid glob: {g}")),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let allowlist = rule
            .allowlist
            .iter()
            .map(|p| {
                regex::RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| RuleCompileError {
                        rule_id: rule.id.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompiledRule {
            rule,
            pattern,
            file_patterns,
            allowlist,
        })
    }

    pub fn id(&self) -> &str {
        &self.rule.id
    }

    pub fn matches_file(&self, basename: &str, full_path: &str) -> bool {
        self.file_patterns
            .iter()
            .any(|m| m.is_match(basename) || m.is_match(full_path))
    }

    pub fn allowlisted(&self, text: &str) -> bool {
        self.allowlist.iter().any(|p| p.is_match(text))
    }
}
