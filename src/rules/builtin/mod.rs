//! Aggregates every built-in rule category. Grounded on
//! `original_source/src/gitsafe/rules/builtin/__init__.py`.

mod aws;
mod entropy;
mod files;
mod keys;
mod passwords;
mod tokens;

use crate::rules::model::Rule;

pub fn all() -> Vec<Rule> {
    let mut rules = Vec::new();
    rules.extend(aws::all());
    rules.extend(tokens::all());
    rules.extend(keys::all());
    rules.extend(passwords::all());
    rules.extend(files::all());
    rules.extend(entropy::all());
    rules
}
