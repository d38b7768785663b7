//! Skill vocabulary matching

use crate::error::{CvMatcherError, Result};
use aho_corasick::AhoCorasick;
use std::collections::BTreeSet;

/// Fixed skill vocabulary spanning languages, frameworks, data stores, cloud
/// platforms, and soft skills.
pub const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "javascript",
    "c++",
    "c#",
    "php",
    "ruby",
    "go",
    "rust",
    "swift",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "node.js",
    "express",
    "django",
    "flask",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "elasticsearch",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "jenkins",
    "git",
    "github",
    "machine learning",
    "deep learning",
    "ai",
    "data science",
    "analytics",
    "tensorflow",
    "pytorch",
    "scikit-learn",
    "pandas",
    "numpy",
    "project management",
    "agile",
    "scrum",
    "leadership",
    "communication",
];

/// Scans text for vocabulary terms using a single Aho-Corasick pass.
pub struct SkillMatcher {
    vocabulary: Vec<String>,
    matcher: AhoCorasick,
    word_boundary: bool,
}

impl SkillMatcher {
    pub fn new(word_boundary: bool) -> Result<Self> {
        Self::with_vocabulary(
            SKILL_VOCABULARY.iter().map(|s| s.to_string()).collect(),
            word_boundary,
        )
    }

    pub fn with_vocabulary(vocabulary: Vec<String>, word_boundary: bool) -> Result<Self> {
        let patterns: Vec<String> = vocabulary.iter().map(|term| term.to_lowercase()).collect();
        let matcher = AhoCorasick::new(&patterns)
            .map_err(|e| CvMatcherError::Matcher(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            vocabulary,
            matcher,
            word_boundary,
        })
    }

    /// Vocabulary terms found in the text, case-insensitive, as a normalized
    /// lowercase set.
    ///
    /// In substring mode (the default) a term counts wherever it appears, so
    /// "java" also hits inside "javascript". Boundary mode requires
    /// non-alphanumeric characters on both sides of the match.
    pub fn find_skills(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        let mut found = BTreeSet::new();

        for mat in self.matcher.find_overlapping_iter(&lowered) {
            if self.word_boundary && !on_word_boundary(&lowered, mat.start(), mat.end()) {
                continue;
            }
            found.insert(self.vocabulary[mat.pattern().as_usize()].to_lowercase());
        }

        found
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
    let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
    before_ok && after_ok
}
