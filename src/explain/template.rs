//! Deterministic, template-based explanation of a score breakdown

use crate::error::Result;
use crate::explain::{Explanation, ExplanationGenerator};
use crate::processing::breakdown::ScoreBreakdown;

const KEYWORD_THRESHOLD: f64 = 60.0;
const ALIGNMENT_THRESHOLD: f64 = 60.0;
const FORMATTING_THRESHOLD: f64 = 80.0;
const MISSING_SKILLS_SHOWN: usize = 3;

#[derive(Debug, Clone)]
pub struct TemplateExplainer {
    max_suggestions: usize,
}

impl Default for TemplateExplainer {
    fn default() -> Self {
        Self::new(5)
    }
}

impl TemplateExplainer {
    pub fn new(max_suggestions: usize) -> Self {
        Self { max_suggestions }
    }

    fn summary(&self, breakdown: &ScoreBreakdown) -> String {
        let scores = &breakdown.category_scores;
        let mut text = format!(
            "Your resume received an overall ATS score of {}/100. ",
            breakdown.overall_score
        );

        let keywords = scores.keyword_relevance.round();
        if scores.keyword_relevance < KEYWORD_THRESHOLD {
            text.push_str(&format!(
                "Your keyword relevance score ({keywords}/100) suggests your resume may not contain enough relevant keywords from the job description. "
            ));
        } else {
            text.push_str(&format!(
                "Your keyword relevance score ({keywords}/100) shows good alignment with the target role. "
            ));
        }

        if scores.role_alignment < ALIGNMENT_THRESHOLD {
            text.push_str(&format!(
                "Your role alignment score ({}/100) indicates missing core skills for the target role. ",
                scores.role_alignment.round()
            ));
        }

        if scores.formatting < FORMATTING_THRESHOLD {
            text.push_str("Your resume has some ATS formatting issues that could affect parsing. ");
        }

        text.trim_end().to_string()
    }

    fn suggestions(&self, breakdown: &ScoreBreakdown) -> Vec<String> {
        let details = &breakdown.breakdown;
        let mut suggestions = Vec::new();

        let missing_core = &details.role_alignment.details.missing_core_skills;
        if !missing_core.is_empty() {
            let shown: Vec<&str> = missing_core
                .iter()
                .take(MISSING_SKILLS_SHOWN)
                .map(String::as_str)
                .collect();
            suggestions.push(format!("Add missing core skills: {}", shown.join(", ")));
        }

        if let Some(issue) = details.formatting.details.issues.first() {
            suggestions.push(format!("Fix formatting issues: {}", issue.message));
        }

        if !details.keyword_relevance.details.missing_keywords.is_empty() {
            suggestions.push("Include more relevant keywords from the job description".to_string());
        }

        suggestions.push("Use action verbs and quantify achievements with metrics".to_string());
        suggestions.push("Ensure resume sections are clearly labeled".to_string());

        suggestions.truncate(self.max_suggestions);
        suggestions
    }
}

impl ExplanationGenerator for TemplateExplainer {
    fn explain(&self, breakdown: &ScoreBreakdown) -> Result<Explanation> {
        Ok(Explanation {
            explanation: self.summary(breakdown),
            suggestions: self.suggestions(breakdown),
            generated_by: self.backend().to_string(),
        })
    }

    fn backend(&self) -> &'static str {
        "template"
    }
}
