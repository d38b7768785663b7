//! Integration tests for the CV parsing and matching pipeline

use async_trait::async_trait;
use cv_matcher::augment::{KeywordAugmenter, Language};
use cv_matcher::error::CvMatcherError;
use cv_matcher::extract::{EducationLevel, EntityExtractor};
use cv_matcher::input::{DocumentFormat, InputManager, RawDocument};
use cv_matcher::matching::MatchScorer;
use cv_matcher::pipeline::CvPipeline;
use std::path::Path;

fn pipeline() -> CvPipeline {
    CvPipeline::new(EntityExtractor::new(false).unwrap())
}

struct StaticAugmenter(Vec<String>);

#[async_trait]
impl KeywordAugmenter for StaticAugmenter {
    async fn augment(&self, _text: &str, _language: Language) -> Vec<String> {
        self.0.clone()
    }
}

/// Stands in for an external call that timed out or errored.
struct FailingAugmenter;

#[async_trait]
impl KeywordAugmenter for FailingAugmenter {
    async fn augment(&self, _text: &str, _language: Language) -> Vec<String> {
        Vec::new()
    }
}

#[tokio::test]
async fn test_parse_sample_cv_from_file() {
    let document = InputManager::read_document(Path::new("tests/fixtures/sample_cv.txt"), None)
        .await
        .unwrap();
    assert_eq!(document.format, DocumentFormat::PlainText);

    let output = pipeline()
        .parse_document(&document, Language::English)
        .await
        .unwrap();
    let parsed = &output.parsed;

    assert_eq!(parsed.email.as_deref(), Some("john@example.com"));
    assert!(parsed.phone.as_deref().unwrap().contains("555-123-4567"));
    assert!(parsed.skills.contains("python"));
    assert!(parsed.skills.contains("java"));
    assert!(parsed.skills.contains("docker"));
    assert!(parsed.skills.contains("aws"));
    // First experience mention wins over the later, larger one.
    assert_eq!(parsed.experience_years, 5);
    assert_eq!(parsed.education_level, EducationLevel::Bachelors);
    assert!(parsed.job_titles.contains("software engineer"));
    assert_eq!(parsed.text_length, output.raw_text.chars().count());
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let text = "John Doe john@example.com 555-123-4567 Python Java 3 years experience \
                Bachelor's degree Software Engineer at TechCo";

    let output = pipeline()
        .parse_text(text.to_string(), Language::English)
        .await;
    let parsed = &output.parsed;

    assert_eq!(parsed.email.as_deref(), Some("john@example.com"));
    assert!(parsed.phone.as_deref().unwrap().contains("555-123-4567"));
    assert!(parsed.skills.contains("python"));
    assert!(parsed.skills.contains("java"));
    assert_eq!(parsed.experience_years, 3);
    assert_eq!(parsed.education_level, EducationLevel::Bachelors);
    assert!(parsed.job_titles.contains("software engineer"));
}

#[tokio::test]
async fn test_empty_documents_are_rejected_not_crashed() {
    for format in [
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::PlainText,
        DocumentFormat::LegacyDoc,
    ] {
        let document = RawDocument::new(Vec::new(), format);
        let result = pipeline()
            .parse_document(&document, Language::English)
            .await;
        assert!(
            matches!(result, Err(CvMatcherError::EmptyDocument)),
            "format {:?} should reject empty payloads",
            format
        );
    }
}

#[tokio::test]
async fn test_augmentation_failure_keeps_deterministic_result() {
    let with_failing = CvPipeline::new(EntityExtractor::new(false).unwrap())
        .with_augmenter(Box::new(FailingAugmenter));

    let output = with_failing
        .parse_text("Python and Docker, 4 years of experience".to_string(), Language::English)
        .await;

    assert_eq!(output.parsed.keywords, output.parsed.skills);
    assert_eq!(output.parsed.experience_years, 4);
}

#[tokio::test]
async fn test_augmented_keywords_stay_a_superset_of_skills() {
    let augmented = CvPipeline::new(EntityExtractor::new(false).unwrap())
        .with_augmenter(Box::new(StaticAugmenter(vec![
            "event-driven architecture".to_string(),
            "python".to_string(),
        ])));

    let output = augmented
        .parse_text("Python and Docker".to_string(), Language::English)
        .await;

    assert!(output.parsed.skills.is_subset(&output.parsed.keywords));
    assert!(output.parsed.keywords.contains("event-driven architecture"));
}

#[tokio::test]
async fn test_profile_matches_job_posting_fixture() {
    let cv_document =
        InputManager::read_document(Path::new("tests/fixtures/sample_cv.txt"), None)
            .await
            .unwrap();
    let profile = pipeline()
        .parse_document(&cv_document, Language::English)
        .await
        .unwrap()
        .into_profile();

    let job_text = std::fs::read_to_string("tests/fixtures/job_posting.txt").unwrap();
    let scorer = MatchScorer::new(false).unwrap();
    let gap = scorer.gap_analysis(&profile.keywords, &job_text);

    // The sample CV covers everything this posting asks for.
    assert_eq!(gap.score, 100.0);
    assert!(gap.missing_keywords.is_empty());
    assert!(gap.matching_keywords.contains("python"));
    assert!(gap.matching_keywords.contains("docker"));
}

#[tokio::test]
async fn test_unsupported_extension_is_rejected() {
    let result = InputManager::read_document(Path::new("tests/fixtures/sample_cv.xyz"), None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_format_override_wins_over_extension() {
    let document = InputManager::read_document(
        Path::new("tests/fixtures/sample_cv.txt"),
        Some(DocumentFormat::LegacyDoc),
    )
    .await
    .unwrap();

    assert_eq!(document.format, DocumentFormat::LegacyDoc);
    // Legacy doc decodes as UTF-8, so the text still comes through.
    let output = pipeline()
        .parse_document(&document, Language::English)
        .await
        .unwrap();
    assert_eq!(output.parsed.email.as_deref(), Some("john@example.com"));
}
