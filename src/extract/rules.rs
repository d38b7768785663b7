//! Data-driven matcher rule tables
//!
//! The priority chains used by entity extraction (phone formats, experience
//! phrasings, education levels) are ordered lists of rules evaluated
//! short-circuit, so each rule can be named, audited, and tested on its own.

use crate::error::{CvMatcherError, Result};
use regex::Regex;

pub struct PatternRule {
    pub name: &'static str,
    pub regex: Regex,
}

impl PatternRule {
    pub fn new(name: &'static str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| CvMatcherError::Matcher(format!("Invalid pattern '{}': {}", name, e)))?;
        Ok(Self { name, regex })
    }
}

/// An ordered rule chain: the first rule that produces an accepted match
/// anywhere in the text wins, and later rules are never consulted.
pub struct FirstMatchChain {
    rules: Vec<PatternRule>,
}

impl FirstMatchChain {
    pub fn new(patterns: &[(&'static str, &str)]) -> Result<Self> {
        let rules = patterns
            .iter()
            .map(|(name, pattern)| PatternRule::new(name, pattern))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// First whole-match of the first rule that matches.
    pub fn first_match<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.rules
            .iter()
            .find_map(|rule| rule.regex.find(text).map(|m| m.as_str()))
    }

    /// Feeds the first capture group of each matching rule to `accept`, in
    /// rule order, returning the first accepted value. Only the FIRST match
    /// of a rule is considered; a rejected capture falls through to the next
    /// rule, never to a later match of the same rule.
    pub fn first_capture_map<T>(&self, text: &str, accept: impl Fn(&str) -> Option<T>) -> Option<T> {
        for rule in &self.rules {
            if let Some(caps) = rule.regex.captures(text) {
                if let Some(group) = caps.get(1) {
                    if let Some(value) = accept(group.as_str()) {
                        return Some(value);
                    }
                }
            }
        }
        None
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }
}

/// A keyword table scanned in fixed priority order; the first entry with any
/// substring hit wins.
pub struct PriorityKeywordTable<T: Copy> {
    entries: Vec<(T, &'static [&'static str])>,
}

impl<T: Copy> PriorityKeywordTable<T> {
    pub fn new(entries: Vec<(T, &'static [&'static str])>) -> Self {
        Self { entries }
    }

    pub fn first_hit(&self, lowercased_text: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowercased_text.contains(k)))
            .map(|(value, _)| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_respects_rule_order() {
        let chain = FirstMatchChain::new(&[
            ("letters", r"[a-z]+"),
            ("digits", r"[0-9]+"),
        ])
        .unwrap();

        // Both rules match somewhere; the earlier rule wins even though the
        // digits appear first in the text.
        assert_eq!(chain.first_match("123 abc"), Some("abc"));
    }

    #[test]
    fn test_first_capture_map_falls_through_on_reject() {
        let chain = FirstMatchChain::new(&[
            ("overflowing", r"big:(\d+)"),
            ("small", r"small:(\d+)"),
        ])
        .unwrap();

        let value = chain.first_capture_map("big:99999999999999999999 small:7", |s| {
            s.parse::<u32>().ok()
        });
        assert_eq!(value, Some(7));
    }

    #[test]
    fn test_first_capture_map_ignores_later_matches_of_same_rule() {
        let chain = FirstMatchChain::new(&[("num", r"(\d+) points")]).unwrap();

        let value = chain.first_capture_map("5 points then 10 points", |s| s.parse::<u32>().ok());
        assert_eq!(value, Some(5));
    }

    #[test]
    fn test_priority_table_first_hit_wins() {
        let table = PriorityKeywordTable::new(vec![
            ("high", &["alpha", "beta"] as &[&str]),
            ("low", &["gamma"]),
        ]);

        assert_eq!(table.first_hit("gamma and beta"), Some("high"));
        assert_eq!(table.first_hit("gamma only"), Some("low"));
        assert_eq!(table.first_hit("nothing here"), None);
    }
}
