//! Keyword overlap scoring between a candidate profile and job postings

use crate::error::Result;
use crate::extract::skills::SkillMatcher;
use serde::Serialize;
use std::collections::BTreeSet;

/// Overlap between a candidate keyword set and one job keyword set.
/// Computed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub matching_keywords: BTreeSet<String>,
    pub score: f64,
}

/// A posting to score: a stable reference plus either an explicit keyword
/// set or a free-text description to derive one from.
#[derive(Debug, Clone)]
pub struct JobPosting {
    pub job_ref: String,
    pub description: String,
    pub keywords: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedJob {
    pub job_ref: String,
    pub score: f64,
    pub matching_keywords: BTreeSet<String>,
    pub total_job_keywords: usize,
}

/// Gap analysis against a single target posting.
#[derive(Debug, Clone, Serialize)]
pub struct GapAnalysis {
    pub job_keywords: BTreeSet<String>,
    pub matching_keywords: BTreeSet<String>,
    pub missing_keywords: BTreeSet<String>,
    pub score: f64,
}

pub struct MatchScorer {
    skill_matcher: SkillMatcher,
}

impl MatchScorer {
    pub fn new(word_boundary: bool) -> Result<Self> {
        Ok(Self {
            skill_matcher: SkillMatcher::new(word_boundary)?,
        })
    }

    /// Percentage of the job's keywords covered by the candidate, rounded to
    /// two decimals. An empty job keyword set scores 0 rather than dividing
    /// by zero.
    pub fn score(candidate: &BTreeSet<String>, job: &BTreeSet<String>) -> MatchResult {
        let matching_keywords: BTreeSet<String> = candidate.intersection(job).cloned().collect();
        let score = round2(matching_keywords.len() as f64 / job.len().max(1) as f64 * 100.0);

        MatchResult {
            matching_keywords,
            score,
        }
    }

    /// Keywords the job asks for that the candidate does not have.
    pub fn missing_keywords(
        candidate: &BTreeSet<String>,
        job: &BTreeSet<String>,
    ) -> BTreeSet<String> {
        job.difference(candidate).cloned().collect()
    }

    /// A posting's keyword set: the explicit one when present, otherwise
    /// derived by the skill-vocabulary pass over its description.
    pub fn job_keywords(&self, posting: &JobPosting) -> BTreeSet<String> {
        match &posting.keywords {
            Some(keywords) => keywords.clone(),
            None => self.skill_matcher.find_skills(&posting.description),
        }
    }

    /// Gap analysis for one target job description.
    pub fn gap_analysis(&self, candidate: &BTreeSet<String>, job_text: &str) -> GapAnalysis {
        let job_keywords = self.skill_matcher.find_skills(job_text);
        let result = Self::score(candidate, &job_keywords);
        let missing_keywords = Self::missing_keywords(candidate, &job_keywords);

        GapAnalysis {
            job_keywords,
            matching_keywords: result.matching_keywords,
            missing_keywords,
            score: result.score,
        }
    }

    /// Ranks postings by descending score and keeps the top K. The sort is
    /// stable, so ties keep their input order.
    pub fn rank(
        &self,
        candidate: &BTreeSet<String>,
        postings: &[JobPosting],
        top_k: usize,
    ) -> Vec<RankedJob> {
        let mut ranked: Vec<RankedJob> = postings
            .iter()
            .map(|posting| {
                let job_keywords = self.job_keywords(posting);
                let result = Self::score(candidate, &job_keywords);

                RankedJob {
                    job_ref: posting.job_ref.clone(),
                    score: result.score,
                    matching_keywords: result.matching_keywords,
                    total_job_keywords: job_keywords.len(),
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(top_k);
        ranked
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
