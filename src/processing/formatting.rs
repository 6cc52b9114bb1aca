//! ATS formatting risk heuristics
//!
//! Runs on the raw text, independent of segmentation. The score starts at 100
//! and every signal that fires subtracts a fixed penalty.

use crate::error::Result;
use crate::processing::breakdown::CategoryResult;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

const MAX_PIPES: usize = 10;
const MAX_TABS: usize = 15;
const MAX_COLUMN_LINES: usize = 3;
const MAX_DECORATIVE_GLYPHS: usize = 10;
/// Measured in UTF-16 code units
const MIN_TEXT_UNITS: usize = 500;
const MAX_ALL_CAPS_WORDS: usize = 20;

/// Bullet and ornament glyphs that ATS parsers tend to mangle
const DECORATIVE_GLYPHS: &[char] = &[
    '★', '☆', '◆', '◇', '■', '□', '●', '○', '▪', '▫', '►', '▻', '♦', '♢',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormattingSignal {
    TableStructure,
    MultiColumnLayout,
    DecorativeGlyphs,
    NonStandardBullets,
    TooShort,
    ExcessiveAllCaps,
}

impl FormattingSignal {
    pub fn penalty(&self) -> u32 {
        match self {
            FormattingSignal::TableStructure => 15,
            FormattingSignal::MultiColumnLayout => 15,
            FormattingSignal::DecorativeGlyphs => 10,
            FormattingSignal::NonStandardBullets => 5,
            FormattingSignal::TooShort => 20,
            FormattingSignal::ExcessiveAllCaps => 5,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FormattingSignal::TableStructure => "Tables detected - may cause parsing issues",
            FormattingSignal::MultiColumnLayout => {
                "Multi-column layout detected - may cause reading order issues"
            }
            FormattingSignal::DecorativeGlyphs => "Excessive special characters detected",
            FormattingSignal::NonStandardBullets => "Non-standard bullet formatting detected",
            FormattingSignal::TooShort => "Resume appears very short - may indicate parsing issues",
            FormattingSignal::ExcessiveAllCaps => {
                "Excessive all-caps text detected - prefer standard capitalization"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingIssue {
    pub signal: FormattingSignal,
    pub message: String,
    pub penalty: u32,
}

impl From<FormattingSignal> for FormattingIssue {
    fn from(signal: FormattingSignal) -> Self {
        Self {
            signal,
            message: signal.message().to_string(),
            penalty: signal.penalty(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingDetails {
    pub issues: Vec<FormattingIssue>,
    /// True only when no signal fired, regardless of the score
    pub passed: bool,
}

pub struct FormattingChecker {
    column_regex: Regex,
    bullet_regex: Regex,
    all_caps_regex: Regex,
}

impl FormattingChecker {
    pub fn new() -> Result<Self> {
        Ok(Self {
            column_regex: Regex::new(r"\s{5,}\S+\s{5,}")?,
            bullet_regex: Regex::new(r"(?m)^\s*[-•*○]\s+")?,
            all_caps_regex: Regex::new(r"\b[A-Z]{4,}\b")?,
        })
    }

    pub fn check(&self, text: &str) -> CategoryResult<FormattingDetails> {
        let signals = self.detect_signals(text);
        let penalty: u32 = signals.iter().map(FormattingSignal::penalty).sum();
        let score = 100.0 - f64::from(penalty.min(100));

        debug!("Formatting check: {} signal(s), score {}", signals.len(), score);

        let details = FormattingDetails {
            passed: signals.is_empty(),
            issues: signals.into_iter().map(FormattingIssue::from).collect(),
        };
        CategoryResult::new(score, details)
    }

    /// Signals that fire for `text`, in fixed evaluation order
    pub fn detect_signals(&self, text: &str) -> Vec<FormattingSignal> {
        let mut signals = Vec::new();

        if self.has_table_structure(text) {
            signals.push(FormattingSignal::TableStructure);
        }
        if self.has_multi_column_layout(text) {
            signals.push(FormattingSignal::MultiColumnLayout);
        }
        if self.has_excessive_glyphs(text) {
            signals.push(FormattingSignal::DecorativeGlyphs);
        }
        if !self.has_standard_bullets(text) {
            signals.push(FormattingSignal::NonStandardBullets);
        }
        if text.encode_utf16().count() < MIN_TEXT_UNITS {
            signals.push(FormattingSignal::TooShort);
        }
        if self.has_excessive_all_caps(text) {
            signals.push(FormattingSignal::ExcessiveAllCaps);
        }

        signals
    }

    fn has_table_structure(&self, text: &str) -> bool {
        let pipes = text.matches('|').count();
        let tabs = text.matches('\t').count();
        pipes > MAX_PIPES || tabs > MAX_TABS
    }

    fn has_multi_column_layout(&self, text: &str) -> bool {
        let suspicious = text
            .split('\n')
            .filter(|line| self.column_regex.is_match(line))
            .count();
        suspicious > MAX_COLUMN_LINES
    }

    fn has_excessive_glyphs(&self, text: &str) -> bool {
        text.chars().filter(|c| DECORATIVE_GLYPHS.contains(c)).count() > MAX_DECORATIVE_GLYPHS
    }

    fn has_standard_bullets(&self, text: &str) -> bool {
        self.bullet_regex.is_match(text)
    }

    fn has_excessive_all_caps(&self, text: &str) -> bool {
        self.all_caps_regex.find_iter(text).count() > MAX_ALL_CAPS_WORDS
    }
}
