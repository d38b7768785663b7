//! CLI interface for the cv-matcher

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cv-matcher")]
#[command(about = "CV text extraction and job keyword matching")]
#[command(
    long_about = "Parse a CV into a structured profile and score it against job postings using keyword overlap"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a CV file into a structured profile
    Parse {
        /// Path to the CV file (PDF, DOCX, TXT, DOC)
        #[arg(short, long)]
        file: PathBuf,

        /// Declared format tag (pdf, docx, plaintext, legacy-doc);
        /// detected from the file extension when omitted
        #[arg(long)]
        format: Option<String>,

        /// Language tag for augmentation prompts (en, ar)
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Skip the external keyword augmenter
        #[arg(long)]
        no_augment: bool,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Store the parsed profile for later match/recommend runs
        #[arg(long)]
        save_profile: bool,

        /// Profile location override
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Compare the stored profile against one job description
    Match {
        /// Path to the job description text file
        #[arg(short, long)]
        job: PathBuf,

        /// Profile location override
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Rank a directory of job postings against the stored profile
    Recommend {
        /// Directory containing one .txt posting per file
        #[arg(short, long)]
        jobs: PathBuf,

        /// Number of postings to return
        #[arg(long)]
        top_k: Option<usize>,

        /// Profile location override
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Console,
    Json,
}

/// Parse and validate output mode
pub fn parse_output_mode(mode: &str) -> Result<OutputMode, String> {
    match mode.to_lowercase().as_str() {
        "console" => Ok(OutputMode::Console),
        "json" => Ok(OutputMode::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            mode
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_mode() {
        assert_eq!(parse_output_mode("console").unwrap(), OutputMode::Console);
        assert_eq!(parse_output_mode("JSON").unwrap(), OutputMode::Json);
        assert!(parse_output_mode("yaml").is_err());
    }
}
