//! Score explanations
//!
//! Explanations only read a finished `ScoreBreakdown`; they never feed back
//! into scoring. A text-generation backend plugs in by implementing
//! `ExplanationGenerator`; `TemplateExplainer` is the built-in deterministic one.

pub mod template;

use crate::error::Result;
use crate::processing::breakdown::ScoreBreakdown;
use serde::{Deserialize, Serialize};

pub use template::TemplateExplainer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub explanation: String,
    pub suggestions: Vec<String>,
    pub generated_by: String,
}

pub trait ExplanationGenerator: Send + Sync {
    fn explain(&self, breakdown: &ScoreBreakdown) -> Result<Explanation>;

    /// Short backend name recorded in `Explanation::generated_by`
    fn backend(&self) -> &'static str;
}
