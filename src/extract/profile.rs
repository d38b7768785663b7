//! Profile types shared between extraction, storage, and scoring

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Phd,
    Masters,
    Bachelors,
    Associates,
    HighSchool,
    #[default]
    Unknown,
}

impl EducationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Phd => "phd",
            EducationLevel::Masters => "masters",
            EducationLevel::Bachelors => "bachelors",
            EducationLevel::Associates => "associates",
            EducationLevel::HighSchool => "high_school",
            EducationLevel::Unknown => "unknown",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "phd" => EducationLevel::Phd,
            "masters" => EducationLevel::Masters,
            "bachelors" => EducationLevel::Bachelors,
            "associates" => EducationLevel::Associates,
            "high_school" => EducationLevel::HighSchool,
            _ => EducationLevel::Unknown,
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extraction result in the exact shape the surrounding layers persist and
/// serialize to clients; field names and types are part of that contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCv {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: BTreeSet<String>,
    pub keywords: BTreeSet<String>,
    pub experience_years: u32,
    pub education_level: EducationLevel,
    pub job_titles: BTreeSet<String>,
    pub text_length: usize,
}

/// The stored profile derived from the latest upload. One profile per user;
/// replaced wholesale on each new upload. `skills` is always a subset of
/// `keywords`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub raw_text: String,
    pub skills: BTreeSet<String>,
    pub keywords: BTreeSet<String>,
    pub experience_years: u32,
    pub education_level: EducationLevel,
    pub job_titles: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExtractedProfile {
    pub fn from_parsed(parsed: &ParsedCv, raw_text: String) -> Self {
        let now = Utc::now();
        // Union invariant: keywords always contain every skill.
        let mut keywords = parsed.keywords.clone();
        keywords.extend(parsed.skills.iter().cloned());

        Self {
            raw_text,
            skills: parsed.skills.clone(),
            keywords,
            experience_years: parsed.experience_years,
            education_level: parsed.education_level,
            job_titles: parsed.job_titles.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}
