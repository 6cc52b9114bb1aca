//! Integration tests for the ATS scorer

use ats_scorer::error::AtsScorerError;
use ats_scorer::input::InputManager;
use ats_scorer::processing::breakdown::{EvaluationMode, EvaluationParams};
use ats_scorer::processing::formatting::FormattingSignal;
use ats_scorer::ScoringEngine;
use std::path::Path;
use tempfile::TempDir;

const BACKEND_RESUME: &str = "Jane Doe\njane@example.com\n\nExperience\nSoftware Engineer at Acme, built REST APIs using Python, Docker, and AWS\n\nEducation\nB.Sc. Computer Science, State University, graduated with honours\n\nSkills\npython, docker, aws, git";

fn engine() -> ScoringEngine {
    ScoringEngine::new().unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::default();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains('\r'));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::default();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    // Headers stay on their own line so segmentation still works
    assert!(text.lines().any(|line| line == "Education"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::default();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_disabled() {
    let mut manager = InputManager::default().with_cache(false);
    manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::default();

    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(AtsScorerError::UnsupportedFormat(_))));

    let result = manager.extract_text(Path::new("tests/fixtures/resume.docx")).await;
    assert!(matches!(result, Err(AtsScorerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::default();
    let result = manager.extract_text(Path::new("tests/fixtures/missing.txt")).await;
    assert!(matches!(result, Err(AtsScorerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_oversized_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.txt");
    std::fs::write(&path, "a".repeat(2048)).unwrap();

    let mut manager = InputManager::new(1024);
    match manager.extract_text(&path).await {
        Err(AtsScorerError::FileTooLarge { size, limit, .. }) => {
            assert_eq!(size, 2048);
            assert_eq!(limit, 1024);
        }
        other => panic!("expected FileTooLarge, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fixture_resume_scores_end_to_end() {
    let mut manager = InputManager::default();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();

    let result = engine().compute_score(&resume, &EvaluationParams::job_description(job));

    assert_eq!(result.metadata.mode, EvaluationMode::JobDescription);
    assert!(result.category_scores.keyword_relevance > 0.0);
    assert!(result.breakdown.keyword_relevance.details.similarity > 0.0);
    // Education, experience, skills, summary, projects
    assert_eq!(result.category_scores.structure, 80.0);
    assert!(result.metadata.resume_skills.contains("python"));
}

#[test]
fn test_backend_developer_scenario() {
    let result = engine().compute_score(BACKEND_RESUME, &EvaluationParams::target_role("backend-developer"));
    let alignment = &result.breakdown.role_alignment.details;

    let core: Vec<&str> = alignment.core_skills.iter().map(|hit| hit.skill.as_str()).collect();
    assert!(core.contains(&"python"));
    assert!(core.contains(&"docker"));
    assert!(!alignment.missing_core_skills.is_empty());
    assert!(alignment.missing_core_skills.contains(&"server".to_string()));
    assert!(alignment.missing_core_skills.contains(&"database".to_string()));
}

#[test]
fn test_short_resume_flagged() {
    let result = engine().compute_score("Jane Doe\nPython developer", &EvaluationParams::general());
    let formatting = &result.breakdown.formatting.details;

    assert!(formatting
        .issues
        .iter()
        .any(|issue| issue.signal == FormattingSignal::TooShort
            && issue.message.starts_with("Resume appears very short")));
    assert!(result.category_scores.formatting <= 80.0);
    assert!(!formatting.passed);
}

#[test]
fn test_unknown_role_matches_general() {
    let engine = engine();
    let unknown = engine.compute_score(BACKEND_RESUME, &EvaluationParams::target_role("nonexistent-role"));
    let general = engine.compute_score(BACKEND_RESUME, &EvaluationParams::target_role("general"));

    assert_eq!(unknown.breakdown.role_alignment, general.breakdown.role_alignment);
    assert_eq!(unknown.metadata.target_role, "general");
    assert_eq!(unknown, general);
}

#[test]
fn test_empty_job_description() {
    let result = engine().compute_score(BACKEND_RESUME, &EvaluationParams::job_description(""));
    let keywords = &result.breakdown.keyword_relevance.details;

    assert!(keywords.missing_keywords.is_empty());
    assert!(keywords.matched_keywords.is_empty());
    assert_eq!(result.category_scores.keyword_relevance, 0.0);
}

#[test]
fn test_adding_education_adds_twenty() {
    let without = "Experience\nSoftware Engineer at Acme, built REST APIs using Python, Docker, and AWS\n\nSkills\npython, docker, aws, git, kubernetes, postgresql, terraform";
    let with = format!(
        "{}\n\nEducation\nB.Sc. Computer Science, State University, graduated with honours in 2015",
        without
    );

    let engine = engine();
    let before = engine.compute_score(without, &EvaluationParams::general());
    let after = engine.compute_score(&with, &EvaluationParams::general());

    assert_eq!(after.category_scores.structure - before.category_scores.structure, 20.0);
}

#[tokio::test]
async fn test_plain_resume_passes_formatting() {
    let mut manager = InputManager::default();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    let result = engine().compute_score(&resume, &EvaluationParams::general());
    assert_eq!(result.category_scores.formatting, 100.0);
    assert!(result.breakdown.formatting.details.passed);
    assert!(result.breakdown.formatting.details.issues.is_empty());
}

#[test]
fn test_serialized_breakdown_is_deterministic() {
    let params = EvaluationParams::target_role("backend-developer");

    let first = serde_json::to_string(&engine().compute_score(BACKEND_RESUME, &params)).unwrap();
    let second = serde_json::to_string(&engine().compute_score(BACKEND_RESUME, &params)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_scoring_shares_one_engine() {
    let engine = engine();
    let params = EvaluationParams::target_role("backend-developer");
    let expected = serde_json::to_string(&engine.compute_score(BACKEND_RESUME, &params)).unwrap();

    let engine = &engine;
    let params = &params;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(move || {
                    serde_json::to_string(&engine.compute_score(BACKEND_RESUME, params)).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_empty_resume_is_scored() {
    let result = engine().compute_score("", &EvaluationParams::general());

    assert_eq!(result.category_scores.structure, 0.0);
    assert!(result.category_scores.formatting <= 80.0);
    assert!(result.overall_score <= 100);
}
