//! Shannon entropy and candidate-token extraction. Grounded on
//! `original_source/src/gitsafe/scanner/entropy.py`.

use std::collections::HashMap;

/// Shannon entropy in bits per character. `H = -Σ p(c)·log₂ p(c)`.
/// The empty string has zero entropy by definition.
pub fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in s.chars() {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }
    let total = total as f64;
    -counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            p * p.log2()
        })
        .sum::<f64>()
}

const SPLIT_CHARS: &[char] = &['=', ':', ';', ',', '\'', '"', '<', '>', '(', ')', '{', '}', '[', ']'];

/// Tokenise `line` on whitespace and a fixed punctuation set, stripping a
/// leading/trailing quote from each token.
fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_whitespace() || SPLIT_CHARS.contains(&c))
        .filter(|t| !t.is_empty())
        .collect()
}

fn strip_quotes(token: &str) -> &str {
    let token = token
        .strip_prefix('\'')
        .or_else(|| token.strip_prefix('"'))
        .unwrap_or(token);
    token
        .strip_suffix('\'')
        .or_else(|| token.strip_suffix('"'))
        .unwrap_or(token)
}

/// Return `(token, entropy)` pairs for tokens at least `min_length` long
/// whose Shannon entropy is `>= min_entropy`.
pub fn extract_and_score(line: &str, min_entropy: f64, min_length: usize) -> Vec<(String, f64)> {
    tokenize(line)
        .into_iter()
        .map(strip_quotes)
        .filter(|t| t.chars().count() >= min_length)
        .filter_map(|t| {
            let h = shannon_entropy(t);
            if h >= min_entropy {
                Some((t.to_string(), h))
            } else {
                None
            }
        })
        .collect()
}
