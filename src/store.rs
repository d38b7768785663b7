//! Profile storage: one stored profile, replaced wholesale on each upload

use crate::config::Config;
use crate::error::Result;
use crate::extract::{EducationLevel, ExtractedProfile};
use chrono::{DateTime, Utc};
use log::warn;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Self {
        Self::new(Config::default_profile_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the stored profile wholesale. `created_at` of an existing
    /// profile is preserved; `updated_at` is stamped with the current time.
    pub fn save(&self, profile: &ExtractedProfile) -> Result<ExtractedProfile> {
        let mut to_store = profile.clone();
        to_store.updated_at = Utc::now();
        if let Some(existing) = self.load() {
            to_store.created_at = existing.created_at;
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&to_store)?;
        std::fs::write(&self.path, content)?;

        Ok(to_store)
    }

    /// Loads the stored profile. Forgiving by contract: a missing or
    /// unreadable file is `None`, and malformed fields inside an otherwise
    /// valid document degrade to empty defaults instead of surfacing a
    /// parse error.
    pub fn load(&self) -> Option<ExtractedProfile> {
        let content = std::fs::read_to_string(&self.path).ok()?;

        let value: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!("Stored profile is not valid JSON, ignoring it: {}", e);
                return None;
            }
        };

        Some(ExtractedProfile {
            raw_text: value
                .get("raw_text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            skills: string_set(value.get("skills")),
            keywords: string_set(value.get("keywords")),
            experience_years: value
                .get("experience_years")
                .and_then(Value::as_u64)
                .unwrap_or(0) as u32,
            education_level: value
                .get("education_level")
                .and_then(Value::as_str)
                .map(EducationLevel::from_tag)
                .unwrap_or(EducationLevel::Unknown),
            job_titles: string_set(value.get("job_titles")),
            created_at: timestamp(value.get("created_at")),
            updated_at: timestamp(value.get("updated_at")),
        })
    }
}

/// A keyword array read leniently: anything that is not an array of strings
/// becomes an empty set.
fn string_set(value: Option<&Value>) -> BTreeSet<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn timestamp(value: Option<&Value>) -> DateTime<Utc> {
    value
        .and_then(|v| serde_json::from_value::<DateTime<Utc>>(v.clone()).ok())
        .unwrap_or_else(Utc::now)
}
