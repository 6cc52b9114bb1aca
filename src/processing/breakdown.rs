//! Score breakdown: the engine's only output artifact

use crate::processing::alignment::AlignmentDetails;
use crate::processing::formatting::FormattingDetails;
use crate::processing::keywords::KeywordDetails;
use crate::processing::sections::SectionMap;
use crate::processing::skills::SkillSet;
use crate::processing::structure::StructureDetails;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which target text feeds keyword relevance and which role feeds alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationMode {
    JobDescription,
    TargetRole,
    #[default]
    General,
}

impl EvaluationMode {
    /// Lenient parse used by the engine: missing or unknown input means `General`.
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("job-description") => EvaluationMode::JobDescription,
            Some("target-role") => EvaluationMode::TargetRole,
            _ => EvaluationMode::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationMode::JobDescription => "job-description",
            EvaluationMode::TargetRole => "target-role",
            EvaluationMode::General => "general",
        }
    }
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a single scoring call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationParams {
    pub mode: EvaluationMode,
    pub job_description: Option<String>,
    pub target_role: Option<String>,
}

impl EvaluationParams {
    pub fn general() -> Self {
        Self::default()
    }

    pub fn job_description(text: impl Into<String>) -> Self {
        Self {
            mode: EvaluationMode::JobDescription,
            job_description: Some(text.into()),
            target_role: None,
        }
    }

    pub fn target_role(role: impl Into<String>) -> Self {
        Self {
            mode: EvaluationMode::TargetRole,
            job_description: None,
            target_role: Some(role.into()),
        }
    }
}

/// Raw output of one scoring component before the aggregator attaches a weight
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryResult<D> {
    pub score: f64,
    pub details: D,
}

impl<D> CategoryResult<D> {
    pub fn new(score: f64, details: D) -> Self {
        Self {
            score: score.clamp(0.0, 100.0),
            details,
        }
    }

    pub fn with_weight(self, weight: f64) -> CategoryScore<D> {
        CategoryScore {
            score: self.score,
            weight,
            details: self.details,
        }
    }
}

/// A weighted category with its supporting evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore<D> {
    pub score: f64,
    pub weight: f64,
    pub details: D,
}

/// Top-level category weights. Fixed design constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWeights {
    pub keyword_relevance: f64,
    pub role_alignment: f64,
    pub structure: f64,
    pub formatting: f64,
}

impl CategoryWeights {
    pub const STANDARD: CategoryWeights = CategoryWeights {
        keyword_relevance: 0.35,
        role_alignment: 0.30,
        structure: 0.20,
        formatting: 0.15,
    };

    pub fn sum(&self) -> f64 {
        self.keyword_relevance + self.role_alignment + self.structure + self.formatting
    }

    /// Weights expressed in whole percent; always 100 for the standard set.
    pub fn percent_total(&self) -> u32 {
        [
            self.keyword_relevance,
            self.role_alignment,
            self.structure,
            self.formatting,
        ]
        .iter()
        .map(|w| (w * 100.0).round() as u32)
        .sum()
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub keyword_relevance: f64,
    pub role_alignment: f64,
    pub structure: f64,
    pub formatting: f64,
}

impl CategoryScores {
    pub fn weighted_total(&self, weights: &CategoryWeights) -> f64 {
        self.keyword_relevance * weights.keyword_relevance
            + self.role_alignment * weights.role_alignment
            + self.structure * weights.structure
            + self.formatting * weights.formatting
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub keyword_relevance: CategoryScore<KeywordDetails>,
    pub role_alignment: CategoryScore<AlignmentDetails>,
    pub structure: CategoryScore<StructureDetails>,
    pub formatting: CategoryScore<FormattingDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreMetadata {
    pub mode: EvaluationMode,
    /// Id of the role profile the alignment score was computed against
    pub target_role: String,
    pub sections: SectionMap,
    pub resume_skills: SkillSet,
}

/// Complete, itemized result of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub overall_score: u8,
    pub category_scores: CategoryScores,
    pub category_weights: CategoryWeights,
    pub breakdown: CategoryBreakdown,
    pub metadata: ScoreMetadata,
}
