//! Technology and skill extraction from raw resume text

use crate::error::Result;
use log::debug;
use regex::Regex;
use std::collections::BTreeSet;

/// Lowercased skill tokens found in a resume. Ordered so output is stable.
pub type SkillSet = BTreeSet<String>;

/// Case-insensitive alternations, one per domain
const SKILL_PATTERNS: &[&str] = &[
    // Programming languages
    r"(?i)\b(python|java|javascript|typescript|c\+\+|c#|ruby|php|swift|kotlin|go|rust)\b",
    // Web frameworks
    r"(?i)\b(react|angular|vue|node\.js|express|django|flask|spring|\.net|asp\.net)\b",
    // Databases
    r"(?i)\b(mysql|postgresql|mongodb|redis|elasticsearch|sql|nosql|oracle|sql\s*server)\b",
    // Cloud and DevOps
    r"(?i)\b(aws|azure|gcp|docker|kubernetes|jenkins|git|ci/cd|terraform|ansible)\b",
    // Data science and ML
    r"(?i)\b(tensorflow|pytorch|scikit-learn|pandas|numpy|machine\s*learning|deep\s*learning|nlp)\b",
    // Productivity tools
    r"(?i)\b(jira|confluence|slack|figma|photoshop|illustrator|excel|powerpoint)\b",
];

pub struct SkillExtractor {
    patterns: Vec<Regex>,
}

impl SkillExtractor {
    pub fn new() -> Result<Self> {
        let patterns = SKILL_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Every match across all categories, lowercased and deduplicated
    pub fn extract(&self, text: &str) -> SkillSet {
        let skills: SkillSet = self
            .patterns
            .iter()
            .flat_map(|pattern| pattern.find_iter(text))
            .map(|m| m.as_str().to_lowercase())
            .collect();

        debug!("Extracted {} distinct skills", skills.len());
        skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_across_categories() {
        let extractor = SkillExtractor::new().unwrap();
        let skills = extractor.extract("Built REST APIs using Python, Docker, AWS and PostgreSQL; tracked work in Jira.");

        for expected in ["python", "docker", "aws", "postgresql", "jira"] {
            assert!(skills.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_deduplicates_case_variants() {
        let extractor = SkillExtractor::new().unwrap();
        let skills = extractor.extract("Python python PYTHON");
        assert_eq!(skills.len(), 1);
        assert!(skills.contains("python"));
    }

    #[test]
    fn test_prefers_whole_words() {
        let extractor = SkillExtractor::new().unwrap();
        let skills = extractor.extract("JavaScript and TypeScript, no coffee");
        assert!(skills.contains("javascript"));
        assert!(skills.contains("typescript"));
        assert!(!skills.contains("java"));
    }

    #[test]
    fn test_multiword_skills() {
        let extractor = SkillExtractor::new().unwrap();
        let skills = extractor.extract("Applied Machine Learning and deep learning with Scikit-Learn");
        assert!(skills.contains("machine learning"));
        assert!(skills.contains("deep learning"));
        assert!(skills.contains("scikit-learn"));
    }

    #[test]
    fn test_empty_text() {
        let extractor = SkillExtractor::new().unwrap();
        assert!(extractor.extract("").is_empty());
    }
}
