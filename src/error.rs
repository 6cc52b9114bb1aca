//! Error handling for the ATS scorer
//!
//! Scoring itself never fails once the engine is built. Everything here is
//! either construction of the engine or the I/O shell around it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {path} is {size} bytes (limit {limit} bytes)")]
    FileTooLarge {
        path: String,
        size: u64,
        limit: u64,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to build skill matcher: {0}")]
    Matcher(#[from] aho_corasick::BuildError),

    #[error("Explanation generation failed: {0}")]
    Explanation(String),
}

pub type Result<T> = std::result::Result<T, AtsScorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_too_large_message() {
        let err = AtsScorerError::FileTooLarge {
            path: "resume.pdf".to_string(),
            size: 20,
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "File too large: resume.pdf is 20 bytes (limit 10 bytes)"
        );
    }

    #[test]
    fn test_regex_error_converts() {
        let err: AtsScorerError = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, AtsScorerError::Pattern(_)));
    }
}
