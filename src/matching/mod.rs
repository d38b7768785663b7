//! Candidate/job keyword matching module

pub mod scorer;

pub use scorer::{GapAnalysis, JobPosting, MatchResult, MatchScorer, RankedJob};
