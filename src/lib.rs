//! Explainable ATS resume scoring library

pub mod cli;
pub mod config;
pub mod error;
pub mod explain;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{AtsScorerError, Result};
pub use explain::{Explanation, ExplanationGenerator, TemplateExplainer};
pub use processing::analyzer::ScoringEngine;
pub use processing::breakdown::{EvaluationMode, EvaluationParams, ScoreBreakdown};
