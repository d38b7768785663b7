//! Deterministic entity extraction over plain CV text
//!
//! Every sub-extraction tolerates missing matches: the result degrades to
//! `None`, zero, or an empty set, never an error.

use crate::error::{CvMatcherError, Result};
use crate::extract::profile::EducationLevel;
use crate::extract::rules::{FirstMatchChain, PriorityKeywordTable};
use crate::extract::skills::SkillMatcher;
use regex::Regex;
use std::collections::BTreeSet;

/// Optional phrase-extraction capability. Injected at construction; when
/// absent, the phrase pass is simply skipped.
pub trait PhraseExtractor: Send + Sync {
    fn phrases(&self, text: &str) -> Vec<String>;
}

const TECH_INDICATORS: &[&str] = &[
    "development",
    "programming",
    "software",
    "web",
    "mobile",
    "data",
];

/// Heuristic phrase extractor: short chunks (up to three words) that contain
/// a tech indicator word are treated as skill phrases.
pub struct HeuristicPhraseExtractor;

impl PhraseExtractor for HeuristicPhraseExtractor {
    fn phrases(&self, text: &str) -> Vec<String> {
        let mut phrases = Vec::new();

        for chunk in text.split(|c: char| matches!(c, ',' | ';' | '.' | ':' | '|' | '(' | ')' | '\n')) {
            let chunk = chunk.trim();
            if chunk.is_empty() || chunk.split_whitespace().count() > 3 {
                continue;
            }

            let lowered = chunk.to_lowercase();
            if TECH_INDICATORS.iter().any(|indicator| lowered.contains(indicator)) {
                phrases.push(lowered);
            }
        }

        phrases
    }
}

/// Phone formats tried in order; the first format that matches anywhere wins.
const PHONE_PATTERNS: &[(&str, &str)] = &[
    (
        "north-american",
        r"\+?1?[-.\s]?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
    ),
    (
        "international",
        r"\+?[0-9]{1,3}[-.\s]?[0-9]{3,4}[-.\s]?[0-9]{3,4}[-.\s]?[0-9]{3,4}",
    ),
    ("digit-run", r"\b[0-9]{10,15}\b"),
];

/// Experience phrasings tried in order over lowercased text. Only the first
/// match of the first matching rule is used; later, possibly larger,
/// mentions are ignored.
const EXPERIENCE_PATTERNS: &[(&str, &str)] = &[
    ("years-of-experience", r"(\d+)\+?\s*years?\s*(?:of\s*)?experience"),
    ("experience-colon-years", r"experience\s*:?\s*(\d+)\+?\s*years?"),
    (
        "years-in-field",
        r"(\d+)\+?\s*years?\s*in\s*(?:the\s*)?(?:field|industry)",
    ),
];

/// Education keyword sets in priority order, highest credential first, so a
/// text mentioning both a PhD and a Bachelor's classifies as phd.
const EDUCATION_KEYWORDS: &[(EducationLevel, &[&str])] = &[
    (EducationLevel::Phd, &["phd", "ph.d", "doctorate", "doctoral"]),
    (
        EducationLevel::Masters,
        &["masters", "master", "m.s", "msc", "m.sc", "mba", "m.a"],
    ),
    (
        EducationLevel::Bachelors,
        &["bachelors", "bachelor", "b.s", "bsc", "b.sc", "b.a", "ba", "bs"],
    ),
    (
        EducationLevel::Associates,
        &["associates", "associate", "a.s", "aa"],
    ),
    (
        EducationLevel::HighSchool,
        &["high school", "secondary", "diploma"],
    ),
];

/// Capitalized title heuristics over the original-case text.
const TITLE_PATTERNS: &[&str] = &[
    r"(?m)(?:^|\n)\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s*(?:at|@|\|)",
    r"(?:position|role|title)\s*:?\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
    r"(?:worked as|served as)\s+(?:a\s+)?([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
];

const COMMON_TITLES: &[&str] = &[
    "software engineer",
    "developer",
    "programmer",
    "analyst",
    "manager",
    "intern",
    "associate",
    "specialist",
    "consultant",
    "coordinator",
    "designer",
    "architect",
    "lead",
    "senior",
    "junior",
    "data scientist",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CvEntities {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: BTreeSet<String>,
    pub experience_years: u32,
    pub education_level: EducationLevel,
    pub job_titles: BTreeSet<String>,
}

pub struct EntityExtractor {
    email_regex: Regex,
    phone_chain: FirstMatchChain,
    experience_chain: FirstMatchChain,
    education_table: PriorityKeywordTable<EducationLevel>,
    title_patterns: Vec<Regex>,
    skill_matcher: SkillMatcher,
    phrase_extractor: Option<Box<dyn PhraseExtractor>>,
}

impl EntityExtractor {
    pub fn new(word_boundary: bool) -> Result<Self> {
        let email_regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .map_err(|e| CvMatcherError::Matcher(format!("Invalid email pattern: {}", e)))?;

        let title_patterns = TITLE_PATTERNS
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .map_err(|e| CvMatcherError::Matcher(format!("Invalid title pattern: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            email_regex,
            phone_chain: FirstMatchChain::new(PHONE_PATTERNS)?,
            experience_chain: FirstMatchChain::new(EXPERIENCE_PATTERNS)?,
            education_table: PriorityKeywordTable::new(EDUCATION_KEYWORDS.to_vec()),
            title_patterns,
            skill_matcher: SkillMatcher::new(word_boundary)?,
            phrase_extractor: None,
        })
    }

    /// Attaches the optional phrase-extraction capability.
    pub fn with_phrase_extractor(mut self, phrase_extractor: Box<dyn PhraseExtractor>) -> Self {
        self.phrase_extractor = Some(phrase_extractor);
        self
    }

    pub fn extract(&self, text: &str) -> CvEntities {
        let lowered = text.to_lowercase();

        CvEntities {
            email: self.extract_email(text),
            phone: self.extract_phone(text),
            skills: self.extract_skills(text),
            experience_years: self.extract_experience_years(&lowered),
            education_level: self.extract_education_level(&lowered),
            job_titles: self.extract_job_titles(text, &lowered),
        }
    }

    fn extract_email(&self, text: &str) -> Option<String> {
        self.email_regex.find(text).map(|m| m.as_str().to_string())
    }

    fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone_chain.first_match(text).map(|m| m.to_string())
    }

    fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        let mut skills = self.skill_matcher.find_skills(text);

        if let Some(phrase_extractor) = &self.phrase_extractor {
            skills.extend(phrase_extractor.phrases(text));
        }

        skills
    }

    fn extract_experience_years(&self, lowered: &str) -> u32 {
        self.experience_chain
            .first_capture_map(lowered, |captured| captured.parse::<u32>().ok())
            .unwrap_or(0)
    }

    fn extract_education_level(&self, lowered: &str) -> EducationLevel {
        self.education_table
            .first_hit(lowered)
            .unwrap_or(EducationLevel::Unknown)
    }

    fn extract_job_titles(&self, text: &str, lowered: &str) -> BTreeSet<String> {
        let mut titles = BTreeSet::new();

        for pattern in &self.title_patterns {
            for caps in pattern.captures_iter(text) {
                if let Some(group) = caps.get(1) {
                    titles.insert(group.as_str().to_string());
                }
            }
        }

        for title in COMMON_TITLES {
            if lowered.contains(title) {
                titles.insert((*title).to_string());
            }
        }

        titles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> EntityExtractor {
        EntityExtractor::new(false).unwrap()
    }

    #[test]
    fn test_email_extraction() {
        let entities = extractor().extract("Reach me at jane.doe+cv@mail.example.org today");
        assert_eq!(
            entities.email.as_deref(),
            Some("jane.doe+cv@mail.example.org")
        );
    }

    #[test]
    fn test_email_absent() {
        assert_eq!(extractor().extract("no contact details").email, None);
    }

    #[test]
    fn test_phone_north_american() {
        let entities = extractor().extract("Call (555) 123-4567 anytime");
        assert!(entities.phone.unwrap().contains("555) 123-4567"));
    }

    #[test]
    fn test_phone_international_fallback() {
        let entities = extractor().extract("Phone: +972 5123 4567 8901");
        assert!(entities.phone.unwrap().contains("+972 5123 4567 8901"));
    }

    #[test]
    fn test_phone_absent() {
        assert_eq!(extractor().extract("no numbers here").phone, None);
    }

    #[test]
    fn test_experience_first_match_wins() {
        let entities = extractor()
            .extract("5 years of experience in backend work, later 10 years of experience total");
        assert_eq!(entities.experience_years, 5);
    }

    #[test]
    fn test_experience_alternate_phrasings() {
        assert_eq!(extractor().extract("Experience: 7 years").experience_years, 7);
        assert_eq!(
            extractor().extract("12 years in the industry").experience_years,
            12
        );
        assert_eq!(extractor().extract("fresh graduate").experience_years, 0);
    }

    #[test]
    fn test_education_priority_order() {
        let entities = extractor().extract("PhD in CS, also holds a Bachelor's degree");
        assert_eq!(entities.education_level, EducationLevel::Phd);
    }

    #[test]
    fn test_education_unknown() {
        let entities = extractor().extract("no credentials listed");
        assert_eq!(entities.education_level, EducationLevel::Unknown);
    }

    #[test]
    fn test_job_titles_from_heuristics_and_common_list() {
        let entities = extractor().extract("Software Engineer at TechCo");
        assert!(entities.job_titles.contains("software engineer"));
        assert!(entities.job_titles.contains("Software Engineer"));
    }

    #[test]
    fn test_job_titles_worked_as() {
        let entities = extractor().extract("I worked as a Backend Developer for two years");
        assert!(entities.job_titles.contains("Backend Developer"));
        assert!(entities.job_titles.contains("developer"));
    }

    #[test]
    fn test_phrase_extractor_is_optional_and_additive() {
        let without = extractor().extract("Did web development, mostly frontend");
        let with = EntityExtractor::new(false)
            .unwrap()
            .with_phrase_extractor(Box::new(HeuristicPhraseExtractor))
            .extract("Did web development, mostly frontend");

        assert!(without.skills.is_subset(&with.skills));
        assert!(with.skills.contains("did web development"));
    }

    #[test]
    fn test_end_to_end_sample() {
        let entities = extractor().extract(
            "John Doe john@example.com 555-123-4567 Python Java 3 years experience \
             Bachelor's degree Software Engineer at TechCo",
        );

        assert_eq!(entities.email.as_deref(), Some("john@example.com"));
        assert!(entities.phone.unwrap().contains("555-123-4567"));
        assert!(entities.skills.contains("python"));
        assert!(entities.skills.contains("java"));
        assert_eq!(entities.experience_years, 3);
        assert_eq!(entities.education_level, EducationLevel::Bachelors);
        assert!(entities.job_titles.contains("software engineer"));
    }
}
