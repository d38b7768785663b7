//! Configuration management for the cv-matcher pipeline

use crate::error::{CvMatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub augmenter: AugmenterConfig,
    pub matching: MatchingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Enable the optional phrase-extraction pass on top of the fixed
    /// skill vocabulary.
    pub phrase_extraction: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmenterConfig {
    pub enabled: bool,
    pub api_base: String,
    pub model: String,
    /// Environment variable holding the API key. The augmenter is skipped
    /// entirely when the variable is unset or empty.
    pub api_key_env: String,
    /// Hard timeout for the external call. On expiry the augmenter returns
    /// an empty keyword list instead of stalling the pipeline.
    pub timeout_secs: u64,
    /// Prompt text is truncated to this many characters before sending.
    pub max_prompt_chars: usize,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// When false (the default), vocabulary terms match anywhere as
    /// substrings, so "java" also hits inside "javascript". When true,
    /// matches must sit on non-alphanumeric boundaries.
    pub word_boundary: bool,
    /// Number of postings returned by the recommendation ranking.
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub color_output: bool,
    pub detailed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig {
                phrase_extraction: false,
            },
            augmenter: AugmenterConfig {
                enabled: true,
                api_base: "https://api.openai.com/v1".to_string(),
                model: "gpt-3.5-turbo".to_string(),
                api_key_env: "OPENAI_API_KEY".to_string(),
                timeout_secs: 8,
                max_prompt_chars: 2000,
                max_tokens: 500,
                temperature: 0.3,
            },
            matching: MatchingConfig {
                word_boundary: false,
                top_k: 10,
            },
            output: OutputConfig {
                color_output: true,
                detailed: false,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| CvMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    fn save_to(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CvMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-matcher")
            .join("config.toml")
    }

    /// Default location of the stored profile, next to the config.
    pub fn default_profile_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-matcher")
            .join("profile.json")
    }
}
