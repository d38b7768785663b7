//! Chat-completion adapter for keyword augmentation
//!
//! Speaks the OpenAI-style chat API; any provider implementing "send
//! messages, get text back" works by pointing `api_base` elsewhere.

use crate::augment::{build_prompt, parse_keyword_list, KeywordAugmenter, Language};
use crate::config::AugmenterConfig;
use crate::error::{CvMatcherError, Result};
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const SYSTEM_PROMPT: &str = "You are an expert CV analyzer.";

#[derive(Debug, Error)]
enum AugmentCallError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned no choices")]
    EmptyChoices,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

pub struct OpenAiAugmenter {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    max_prompt_chars: usize,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiAugmenter {
    pub fn new(config: &AugmenterConfig, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                CvMatcherError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            max_prompt_chars: config.max_prompt_chars,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Builds the augmenter from the configured environment variable.
    /// Returns `None` when no API key is available, in which case the
    /// pipeline runs with deterministic extraction only.
    pub fn from_env(config: &AugmenterConfig) -> Option<Self> {
        let api_key = std::env::var(&config.api_key_env).ok()?;
        if api_key.trim().is_empty() {
            return None;
        }

        match Self::new(config, api_key) {
            Ok(augmenter) => Some(augmenter),
            Err(e) => {
                warn!("Keyword augmenter unavailable: {}", e);
                None
            }
        }
    }

    async fn request_keywords(&self, prompt: &str) -> std::result::Result<Vec<String>, AugmentCallError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AugmentCallError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or(AugmentCallError::EmptyChoices)?;

        Ok(parse_keyword_list(&content))
    }
}

#[async_trait]
impl KeywordAugmenter for OpenAiAugmenter {
    async fn augment(&self, text: &str, language: Language) -> Vec<String> {
        let prompt = build_prompt(text, language, self.max_prompt_chars);

        match self.request_keywords(&prompt).await {
            Ok(keywords) => {
                debug!("Augmenter proposed {} keywords", keywords.len());
                keywords
            }
            Err(e) => {
                warn!("Keyword augmentation failed, continuing without it: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_api_base_trailing_slash_is_trimmed() {
        let mut config = Config::default().augmenter;
        config.api_base = "https://example.test/v1/".to_string();

        let augmenter = OpenAiAugmenter::new(&config, "key".to_string()).unwrap();
        assert_eq!(augmenter.api_base, "https://example.test/v1");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails_open() {
        let mut config = Config::default().augmenter;
        config.api_base = "http://127.0.0.1:1/v1".to_string();
        config.timeout_secs = 1;

        let augmenter = OpenAiAugmenter::new(&config, "key".to_string()).unwrap();
        let keywords = augmenter.augment("some cv text", Language::English).await;
        assert!(keywords.is_empty());
    }
}
