//! The CV parsing pipeline: text extraction, entity extraction, and
//! best-effort keyword augmentation

use crate::augment::{KeywordAugmenter, Language, OpenAiAugmenter};
use crate::config::Config;
use crate::error::{CvMatcherError, Result};
use crate::extract::{EntityExtractor, ExtractedProfile, HeuristicPhraseExtractor, ParsedCv};
use crate::input::{InputManager, RawDocument};
use log::{debug, info};

/// Result of one pipeline run. The raw text is kept alongside the parsed
/// shape so the caller can build the stored profile without re-extracting.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub parsed: ParsedCv,
    pub raw_text: String,
}

impl ParseOutput {
    pub fn into_profile(self) -> ExtractedProfile {
        ExtractedProfile::from_parsed(&self.parsed, self.raw_text)
    }
}

pub struct CvPipeline {
    extractor: EntityExtractor,
    augmenter: Option<Box<dyn KeywordAugmenter>>,
}

impl CvPipeline {
    /// Builds the pipeline from configuration. The augmenter is attached
    /// only when enabled and an API key is available; without it the
    /// pipeline is fully deterministic.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut extractor = EntityExtractor::new(config.matching.word_boundary)?;
        if config.extraction.phrase_extraction {
            extractor = extractor.with_phrase_extractor(Box::new(HeuristicPhraseExtractor));
        }

        let augmenter = if config.augmenter.enabled {
            match OpenAiAugmenter::from_env(&config.augmenter) {
                Some(augmenter) => Some(Box::new(augmenter) as Box<dyn KeywordAugmenter>),
                None => {
                    info!("No augmenter API key configured, running deterministic extraction only");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            extractor,
            augmenter,
        })
    }

    pub fn new(extractor: EntityExtractor) -> Self {
        Self {
            extractor,
            augmenter: None,
        }
    }

    /// Replaces the augmenter; used by callers that construct their own
    /// adapter, and by tests to inject deterministic stubs.
    pub fn with_augmenter(mut self, augmenter: Box<dyn KeywordAugmenter>) -> Self {
        self.augmenter = Some(augmenter);
        self
    }

    /// Runs the full pipeline over an uploaded document. A document that
    /// yields no text at all is rejected with `EmptyDocument`; every later
    /// stage degrades instead of failing.
    pub async fn parse_document(
        &self,
        document: &RawDocument,
        language: Language,
    ) -> Result<ParseOutput> {
        let text = InputManager::extract_text(document);
        if text.is_empty() {
            return Err(CvMatcherError::EmptyDocument);
        }

        Ok(self.parse_text(text, language).await)
    }

    /// Parses already-extracted text. Infallible: augmentation failure
    /// leaves `keywords == skills`.
    pub async fn parse_text(&self, text: String, language: Language) -> ParseOutput {
        let entities = self.extractor.extract(&text);

        let augmented = match &self.augmenter {
            Some(augmenter) => augmenter.augment(&text, language).await,
            None => Vec::new(),
        };
        debug!(
            "Extracted {} skills, augmenter added {} candidate keywords",
            entities.skills.len(),
            augmented.len()
        );

        // keywords = skills ∪ augmenter output, deduplicated
        let mut keywords = entities.skills.clone();
        keywords.extend(
            augmented
                .into_iter()
                .map(|keyword| keyword.trim().to_string())
                .filter(|keyword| !keyword.is_empty()),
        );

        let parsed = ParsedCv {
            email: entities.email,
            phone: entities.phone,
            skills: entities.skills,
            keywords,
            experience_years: entities.experience_years,
            education_level: entities.education_level,
            job_titles: entities.job_titles,
            text_length: text.chars().count(),
        };

        ParseOutput {
            parsed,
            raw_text: text,
        }
    }
}
