//! Best-effort keyword augmentation via an external generative model
//!
//! Augmentation is additive and unreliable by contract: any failure of the
//! external call degrades to an empty keyword list, and the deterministic
//! extraction result stands on its own.

pub mod openai;

use async_trait::async_trait;

pub use openai::OpenAiAugmenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "ar" => Language::Arabic,
            _ => Language::English,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }
}

/// Narrow interface over the external keyword service so tests can stub it
/// deterministically.
#[async_trait]
pub trait KeywordAugmenter: Send + Sync {
    /// Proposes extra free-text keywords for the given CV text. Returns an
    /// empty list on any failure; never errors.
    async fn augment(&self, text: &str, language: Language) -> Vec<String>;
}

/// Builds the keyword-extraction prompt, truncating the CV text to a bounded
/// prefix to respect external cost and latency limits.
pub(crate) fn build_prompt(text: &str, language: Language, max_chars: usize) -> String {
    let excerpt: String = text.chars().take(max_chars).collect();

    match language {
        Language::Arabic => format!(
            "حلل النص التالي من السيرة الذاتية واستخرج الكلمات المفتاحية المهمة:\n\n\
             {}\n\n\
             يرجى استخراج:\n\
             1. المهارات التقنية\n\
             2. المهارات الشخصية\n\
             3. الكلمات المفتاحية المهنية\n\
             4. أسماء التقنيات والأدوات\n\n\
             قدم النتيجة كقائمة مفصولة بفواصل.",
            excerpt
        ),
        Language::English => format!(
            "Analyze the following CV text and extract important keywords:\n\n\
             {}\n\n\
             Please extract:\n\
             1. Technical skills\n\
             2. Soft skills\n\
             3. Professional keywords\n\
             4. Technology and tool names\n\n\
             Provide the result as a comma-separated list.",
            excerpt
        ),
    }
}

/// Splits a comma-separated model response into trimmed, non-empty keywords.
pub(crate) fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|keyword| keyword.trim().to_string())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_tag() {
        assert_eq!(Language::from_tag("ar"), Language::Arabic);
        assert_eq!(Language::from_tag("AR"), Language::Arabic);
        assert_eq!(Language::from_tag("en"), Language::English);
        assert_eq!(Language::from_tag("fr"), Language::English);
    }

    #[test]
    fn test_build_prompt_truncates_text() {
        let text = "q".repeat(5000);
        let prompt = build_prompt(&text, Language::English, 2000);

        assert_eq!(prompt.matches('q').count(), 2000);
        assert!(prompt.contains("comma-separated list"));
    }

    #[test]
    fn test_build_prompt_truncation_is_char_safe() {
        let text = "é".repeat(10);
        let prompt = build_prompt(&text, Language::English, 5);
        assert_eq!(prompt.matches('é').count(), 5);
    }

    #[test]
    fn test_parse_keyword_list() {
        let keywords = parse_keyword_list("python, data analysis ,  sql,,  ");
        assert_eq!(keywords, vec!["python", "data analysis", "sql"]);
    }

    #[test]
    fn test_parse_keyword_list_empty_response() {
        assert!(parse_keyword_list("").is_empty());
        assert!(parse_keyword_list(" , , ").is_empty());
    }
}
