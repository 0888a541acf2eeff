//! Rule registry — builds the rule set at startup, applies enable/disable,
//! and eagerly compiles every enabled rule's pattern and allowlist so the
//! hot scan loop stays branch-free. Grounded on
//! `original_source/src/gitsafe/rules/registry.py`.

use crate::config::Config;
use crate::errors::RuleCompileError;
use crate::rules::builtin;
use crate::rules::model::{CompiledRule, Rule};

pub struct RuleRegistry {
    rules: Vec<CompiledRule>,
}

impl RuleRegistry {
    /// Build the registry from the built-in rules plus any `extra` (e.g.
    /// user-supplied) rules, in registration order, then apply `config`'s
    /// enable/disable policy and compile every enabled rule. Registration
    /// order is preserved — it is the tie-breaker for deterministic output
    /// ordering.
    pub fn build(config: &Config, extra: Vec<Rule>) -> Result<Self, RuleCompileError> {
        let mut all_rules = builtin::all();
        all_rules.extend(extra);
        apply_config(&mut all_rules, config);

        let rules = all_rules
            .into_iter()
            .filter(|r| r.enabled)
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleRegistry { rules })
    }

    /// All compiled, enabled rules in registration order.
    pub fn all(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Content rules: those with a regex pattern (entropy rules have none —
    /// they have their own extraction path in [`crate::engine`]).
    pub fn content_rules(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter().filter(|r| r.pattern.is_some())
    }

    /// File-pattern rules: no content pattern, match by name/path.
    pub fn file_rules(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter().filter(|r| r.rule.is_file_rule())
    }

    pub fn get(&self, rule_id: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.id() == rule_id)
    }
}

/// Enable/disable policy: non-empty `enable` means only those ids are
/// enabled; `disable` and `ignore.rules` always force-disable, taking
/// precedence over `enable`.
fn apply_config(rules: &mut [Rule], config: &Config) {
    let enable = &config.rules.enable;
    let disable = &config.rules.disable;
    let ignore_rules = &config.ignore.rules;

    for rule in rules.iter_mut() {
        if !enable.is_empty() {
            rule.enabled = enable.iter().any(|id| id == &rule.id);
        }
        if disable.iter().any(|id| id == &rule.id) || ignore_rules.iter().any(|id| id == &rule.id)
        {
            rule.enabled = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_config() {
        let registry = RuleRegistry::build(&Config::default(), vec![]).unwrap();
        assert!(registry.get("AWS_ACCESS_KEY").is_some());
        assert!(registry.get("HIGH_ENTROPY_STRING").is_some());
    }

    #[test]
    fn disable_wins_over_enable() {
        let mut config = Config::default();
        config.rules.enable = vec!["AWS_ACCESS_KEY".into(), "PRIVATE_KEY".into()];
        config.rules.disable = vec!["PRIVATE_KEY".into()];
        let registry = RuleRegistry::build(&config, vec![]).unwrap();
        assert!(registry.get("AWS_ACCESS_KEY").is_some());
        assert!(registry.get("PRIVATE_KEY").is_none());
        assert!(registry.get("GITHUB_TOKEN").is_none());
    }

    #[test]
    fn ignore_rules_force_disable() {
        let mut config = Config::default();
        config.ignore.rules = vec!["HARDCODED_PASSWORD".into()];
        let registry = RuleRegistry::build(&config, vec![]).unwrap();
        assert!(registry.get("HARDCODED_PASSWORD").is_none());
    }

    #[test]
    fn selectors_partition_rule_kinds() {
        let registry = RuleRegistry::build(&Config::default(), vec![]).unwrap();
        assert!(registry.content_rules().any(|r| r.id() == "AWS_ACCESS_KEY"));
        assert!(registry.file_rules().any(|r| r.id() == "PEM_FILE"));
        assert!(!registry.content_rules().any(|r| r.id() == "PEM_FILE"));
        assert!(!registry.file_rules().any(|r| r.id() == "AWS_ACCESS_KEY"));
    }
}
