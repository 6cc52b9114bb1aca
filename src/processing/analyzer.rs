//! Scoring engine: runs every component and aggregates the weighted score
//!
//! The engine is built once (all patterns and skill automata are compiled in
//! `new`) and is then a pure function of its inputs. It holds no mutable
//! state, so one instance can serve any number of concurrent calls.

use crate::error::Result;
use crate::processing::alignment::score_alignment;
use crate::processing::breakdown::{
    CategoryBreakdown, CategoryScores, CategoryWeights, EvaluationMode, EvaluationParams,
    ScoreBreakdown, ScoreMetadata,
};
use crate::processing::formatting::FormattingChecker;
use crate::processing::keywords::KeywordAnalyzer;
use crate::processing::roles::{RoleCatalog, RoleProfile};
use crate::processing::sections::SectionSegmenter;
use crate::processing::skills::SkillExtractor;
use crate::processing::structure::score_structure;
use log::{debug, info, warn};

/// Target text used when no job description or role is in play
pub const GENERAL_KEYWORDS: &str = "professional experience education skills qualifications achievements projects leadership teamwork communication";

pub struct ScoringEngine {
    segmenter: SectionSegmenter,
    formatting: FormattingChecker,
    skills: SkillExtractor,
    keywords: KeywordAnalyzer,
    catalog: RoleCatalog,
    weights: CategoryWeights,
}

/// Target text and role profile chosen for one evaluation
struct EvaluationTarget<'a> {
    keyword_text: String,
    profile: &'a RoleProfile,
    job_description: Option<&'a str>,
}

impl ScoringEngine {
    pub fn new() -> Result<Self> {
        Ok(Self {
            segmenter: SectionSegmenter::new()?,
            formatting: FormattingChecker::new()?,
            skills: SkillExtractor::new()?,
            keywords: KeywordAnalyzer::new()?,
            catalog: RoleCatalog::builtin()?,
            weights: CategoryWeights::STANDARD,
        })
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// Score a resume. Never fails; malformed input degrades to low scores.
    pub fn compute_score(&self, resume_text: &str, params: &EvaluationParams) -> ScoreBreakdown {
        let sections = self.segmenter.segment(resume_text);
        let structure = score_structure(&sections);
        let formatting = self.formatting.check(resume_text);
        let resume_skills = self.skills.extract(resume_text);

        let target = self.resolve_target(params);
        let keyword_relevance = self.keywords.analyze(resume_text, &target.keyword_text);
        let role_alignment =
            score_alignment(&resume_skills, resume_text, target.profile, target.job_description);

        let category_scores = CategoryScores {
            keyword_relevance: keyword_relevance.score,
            role_alignment: role_alignment.score,
            structure: structure.score,
            formatting: formatting.score,
        };

        let total = category_scores.weighted_total(&self.weights);
        let overall_score = total.round().clamp(0.0, 100.0) as u8;

        debug!(
            "Category scores: keywords {:.1}, alignment {:.1}, structure {:.1}, formatting {:.1}",
            category_scores.keyword_relevance,
            category_scores.role_alignment,
            category_scores.structure,
            category_scores.formatting
        );
        info!(
            "Scored resume in {} mode against '{}': {}/100",
            params.mode, target.profile.id, overall_score
        );

        ScoreBreakdown {
            overall_score,
            category_scores,
            category_weights: self.weights,
            breakdown: CategoryBreakdown {
                keyword_relevance: keyword_relevance.with_weight(self.weights.keyword_relevance),
                role_alignment: role_alignment.with_weight(self.weights.role_alignment),
                structure: structure.with_weight(self.weights.structure),
                formatting: formatting.with_weight(self.weights.formatting),
            },
            metadata: ScoreMetadata {
                mode: params.mode,
                target_role: target.profile.id.clone(),
                sections,
                resume_skills,
            },
        }
    }

    fn resolve_target<'a>(&'a self, params: &'a EvaluationParams) -> EvaluationTarget<'a> {
        match params.mode {
            EvaluationMode::JobDescription => {
                let job_description = params.job_description.as_deref().unwrap_or("");
                if job_description.trim().is_empty() {
                    warn!("Job description mode without a job description; scoring against empty text");
                }
                EvaluationTarget {
                    keyword_text: job_description.to_string(),
                    profile: self.catalog.general(),
                    job_description: Some(job_description),
                }
            }
            EvaluationMode::TargetRole => {
                let requested = params.target_role.as_deref().unwrap_or("");
                let profile = self.catalog.resolve(requested);
                if self.catalog.get(requested).is_none() {
                    match self.catalog.closest_role(requested) {
                        Some(suggestion) => warn!(
                            "Unknown target role '{}' (did you mean '{}'?); using general profile",
                            requested, suggestion
                        ),
                        None => warn!("Unknown target role '{}'; using general profile", requested),
                    }
                }
                EvaluationTarget {
                    keyword_text: profile.keyword_text(),
                    profile,
                    job_description: None,
                }
            }
            EvaluationMode::General => EvaluationTarget {
                keyword_text: GENERAL_KEYWORDS.to_string(),
                profile: self.catalog.general(),
                job_description: None,
            },
        }
    }
}
