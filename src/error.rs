//! Error handling for the cv-matcher pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not extract text from document")]
    EmptyDocument,

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Matcher construction error: {0}")]
    Matcher(String),

    #[error("Profile store error: {0}")]
    ProfileStore(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CvMatcherError>;
