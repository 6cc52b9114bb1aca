//! Report wrapper around an engine result

use crate::explain::Explanation;
use crate::processing::breakdown::ScoreBreakdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A finished breakdown plus everything produced around it.
///
/// The breakdown is deterministic; anything that varies between runs lives
/// in `metadata` so the two never mix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub breakdown: ScoreBreakdown,

    /// Absent when explanations are disabled
    pub explanation: Option<Explanation>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,

    /// Version of the scorer used
    pub scorer_version: String,

    pub resume_file: String,

    pub job_file: Option<String>,

    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(resume_file: impl Into<String>, job_file: Option<String>, processing_time_ms: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            scorer_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.into(),
            job_file,
            processing_time_ms,
        }
    }
}

impl ScoreReport {
    pub fn new(
        breakdown: ScoreBreakdown,
        explanation: Option<Explanation>,
        metadata: ReportMetadata,
    ) -> Self {
        Self {
            breakdown,
            explanation,
            metadata,
        }
    }

    /// One-line verdict for the overall score
    pub fn verdict(&self) -> &'static str {
        match self.breakdown.overall_score {
            80..=100 => "Strong ATS compatibility",
            60..=79 => "Moderate ATS compatibility - some improvements recommended",
            40..=59 => "Weak ATS compatibility - significant improvements needed",
            _ => "Poor ATS compatibility - resume likely to be filtered out",
        }
    }
}
