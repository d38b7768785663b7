//! cv-matcher: parse CVs into structured profiles and score them against
//! job postings

use clap::Parser;
use colored::Colorize;
use cv_matcher::augment::Language;
use cv_matcher::cli::{self, Cli, Commands, ConfigAction, OutputMode};
use cv_matcher::config::Config;
use cv_matcher::error::{CvMatcherError, Result};
use cv_matcher::extract::{ExtractedProfile, ParsedCv};
use cv_matcher::input::{DocumentFormat, InputManager};
use cv_matcher::matching::{GapAnalysis, JobPosting, MatchScorer, RankedJob};
use cv_matcher::pipeline::CvPipeline;
use cv_matcher::store::ProfileStore;
use log::{error, info};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Parse {
            file,
            format,
            language,
            no_augment,
            output,
            save_profile,
            profile,
        } => {
            let output_mode = cli::parse_output_mode(&output).map_err(CvMatcherError::InvalidInput)?;

            let format_override = match format {
                Some(tag) => Some(
                    DocumentFormat::from_tag(&tag)
                        .ok_or(CvMatcherError::UnsupportedFormat(tag))?,
                ),
                None => None,
            };
            let language = Language::from_tag(&language);

            info!("Parsing CV from {}", file.display());
            let document = InputManager::read_document(&file, format_override).await?;

            let mut pipeline_config = config.clone();
            if no_augment {
                pipeline_config.augmenter.enabled = false;
            }
            let pipeline = CvPipeline::from_config(&pipeline_config)?;

            let parse_output = pipeline.parse_document(&document, language).await?;

            match output_mode {
                OutputMode::Json => {
                    println!("{}", serde_json::to_string_pretty(&parse_output.parsed)?)
                }
                OutputMode::Console => {
                    print_parse_report(&parse_output.parsed, config.output.color_output)
                }
            }

            if save_profile {
                let store = profile_store(profile);
                store.save(&parse_output.into_profile())?;
                println!("\n💾 Profile saved to {}", store.path().display());
            }

            Ok(())
        }

        Commands::Match {
            job,
            profile,
            output,
        } => {
            let output_mode = cli::parse_output_mode(&output).map_err(CvMatcherError::InvalidInput)?;
            let profile = load_profile(profile)?;

            info!("Scoring stored profile against {}", job.display());
            let job_text = tokio::fs::read_to_string(&job).await?;

            let scorer = MatchScorer::new(config.matching.word_boundary)?;
            let gap = scorer.gap_analysis(&profile.keywords, &job_text);

            match output_mode {
                OutputMode::Json => println!("{}", serde_json::to_string_pretty(&gap)?),
                OutputMode::Console => print_gap_report(&gap, config.output.color_output),
            }

            Ok(())
        }

        Commands::Recommend {
            jobs,
            top_k,
            profile,
            output,
        } => {
            let output_mode = cli::parse_output_mode(&output).map_err(CvMatcherError::InvalidInput)?;
            let profile = load_profile(profile)?;

            let postings = read_postings_dir(&jobs).await?;
            if postings.is_empty() {
                println!("No .txt postings found in {}", jobs.display());
                return Ok(());
            }
            info!("Ranking {} postings", postings.len());

            let scorer = MatchScorer::new(config.matching.word_boundary)?;
            let top_k = top_k.unwrap_or(config.matching.top_k);
            let ranked = scorer.rank(&profile.skills, &postings, top_k);

            match output_mode {
                OutputMode::Json => println!("{}", serde_json::to_string_pretty(&ranked)?),
                OutputMode::Console => print_recommendations(&ranked, config.output.color_output),
            }

            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("Configuration file: {}", Config::config_path().display());
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    CvMatcherError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("\n{}", content);
                Ok(())
            }
            ConfigAction::Reset => {
                Config::default().save()?;
                println!("Configuration reset to defaults");
                Ok(())
            }
        },
    }
}

fn profile_store(path: Option<PathBuf>) -> ProfileStore {
    match path {
        Some(path) => ProfileStore::new(path),
        None => ProfileStore::default_location(),
    }
}

fn load_profile(path: Option<PathBuf>) -> Result<ExtractedProfile> {
    let store = profile_store(path);
    store.load().ok_or_else(|| {
        CvMatcherError::ProfileStore(format!(
            "No stored profile at {}. Run `cv-matcher parse --save-profile` first.",
            store.path().display()
        ))
    })
}

async fn read_postings_dir(dir: &PathBuf) -> Result<Vec<JobPosting>> {
    if !dir.is_dir() {
        return Err(CvMatcherError::InvalidInput(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("txt") {
            paths.push(path);
        }
    }
    // Stable input order so score ties rank deterministically.
    paths.sort();

    let mut postings = Vec::new();
    for path in paths {
        let description = tokio::fs::read_to_string(&path).await?;
        let job_ref = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("posting")
            .to_string();

        postings.push(JobPosting {
            job_ref,
            description,
            keywords: None,
        });
    }

    Ok(postings)
}

fn print_parse_report(parsed: &ParsedCv, color: bool) {
    println!("\n📄 {}", heading("Parsed CV", color));
    println!("  Email:            {}", parsed.email.as_deref().unwrap_or("-"));
    println!("  Phone:            {}", parsed.phone.as_deref().unwrap_or("-").trim());
    println!("  Experience:       {} years", parsed.experience_years);
    println!("  Education:        {}", parsed.education_level);
    println!("  Text length:      {} chars", parsed.text_length);
    println!("  Skills:           {}", join_set(&parsed.skills));
    println!("  Keywords:         {}", join_set(&parsed.keywords));
    println!("  Job titles:       {}", join_set(&parsed.job_titles));
}

fn print_gap_report(gap: &GapAnalysis, color: bool) {
    println!("\n💼 {}", heading("Job match", color));
    println!("  Match score:      {}", score_label(gap.score, color));
    println!("  Job keywords:     {}", join_set(&gap.job_keywords));
    println!("  Matching:         {}", join_set(&gap.matching_keywords));
    println!("  Missing:          {}", join_set(&gap.missing_keywords));
}

fn print_recommendations(ranked: &[RankedJob], color: bool) {
    println!("\n🎯 {}", heading("Recommended postings", color));
    for (index, job) in ranked.iter().enumerate() {
        println!(
            "  {}. {} {} ({} of {} keywords)",
            index + 1,
            job.job_ref,
            score_label(job.score, color),
            job.matching_keywords.len(),
            job.total_job_keywords
        );
    }
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn score_label(score: f64, color: bool) -> String {
    let label = format!("{:.2}%", score);
    if !color {
        return label;
    }

    if score >= 75.0 {
        label.as_str().green().to_string()
    } else if score >= 40.0 {
        label.as_str().yellow().to_string()
    } else {
        label.as_str().red().to_string()
    }
}

fn join_set(set: &std::collections::BTreeSet<String>) -> String {
    if set.is_empty() {
        "-".to_string()
    } else {
        set.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}
