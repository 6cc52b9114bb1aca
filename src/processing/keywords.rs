//! Keyword relevance: TF-IDF term overlap blended with cosine similarity
//!
//! The resume and the target text form a two-document corpus. Each side's
//! top terms are ranked by tf × idf, where idf = 1 + ln(N / (1 + df)).
//! Similarity is computed separately over raw term counts of the full texts.

use crate::error::Result;
use crate::processing::breakdown::CategoryResult;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

const TOP_TERMS: usize = 30;
const MAX_REPORTED_TERMS: usize = 15;
const MAX_MISSING_TERMS: usize = 10;
const MIN_TERM_CHARS: usize = 3;
const CORPUS_SIZE: f64 = 2.0;
const OVERLAP_WEIGHT: f64 = 0.6;
const SIMILARITY_WEIGHT: f64 = 0.4;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
    "of", "with", "by", "from", "as", "is", "was", "are", "been", "be",
    "have", "has", "had", "do", "does", "did", "will", "would", "could",
    "should", "may", "might", "can", "this", "that", "these", "those",
];

/// General English stop words removed before ranking, on top of `STOP_WORDS`
const ENGLISH_STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "all", "also", "am", "another", "any",
    "because", "before", "being", "below", "between", "both", "came", "cannot",
    "come", "doing", "during", "each", "few", "further", "get", "got", "he",
    "her", "here", "him", "himself", "his", "how", "if", "into", "it", "its",
    "itself", "like", "make", "many", "me", "more", "most", "much", "must",
    "my", "myself", "never", "now", "only", "other", "our", "ours",
    "ourselves", "out", "over", "own", "said", "same", "see", "since", "so",
    "some", "still", "such", "take", "than", "their", "theirs", "them",
    "themselves", "then", "there", "they", "through", "too", "under", "until",
    "up", "very", "way", "we", "well", "were", "what", "where", "when",
    "which", "while", "who", "whom", "why", "you", "your", "yours",
    "yourself",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordTerm {
    pub term: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDetails {
    pub matched_keywords: Vec<KeywordTerm>,
    pub missing_keywords: Vec<KeywordTerm>,
    pub resume_keywords: Vec<KeywordTerm>,
    pub target_keywords: Vec<KeywordTerm>,
    pub similarity: f64,
    pub overlap_ratio: f64,
}

/// Term counts of one document, remembering first-occurrence order
#[derive(Debug, Default)]
struct TermCounts {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl TermCounts {
    fn from_tokens(tokens: Vec<String>) -> Self {
        let mut terms = Self::default();
        for token in tokens {
            match terms.counts.get_mut(&token) {
                Some(count) => *count += 1,
                None => {
                    terms.counts.insert(token.clone(), 1);
                    terms.order.push(token);
                }
            }
        }
        terms
    }

    fn count(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    fn contains(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }
}

pub struct KeywordAnalyzer {
    stop_words: HashSet<&'static str>,
    separator: Regex,
}

impl KeywordAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            stop_words: STOP_WORDS
                .iter()
                .chain(ENGLISH_STOP_WORDS.iter())
                .copied()
                .collect(),
            separator: Regex::new(r"[^\p{L}\p{N}_]+")?,
        })
    }

    /// Score how well `resume` covers the vocabulary of `target`
    pub fn analyze(&self, resume: &str, target: &str) -> CategoryResult<KeywordDetails> {
        let resume_terms = TermCounts::from_tokens(self.tokenize(resume));
        let target_terms = TermCounts::from_tokens(self.tokenize(target));

        let resume_top = self.top_terms(&resume_terms, &target_terms, TOP_TERMS);
        let target_top = self.top_terms(&target_terms, &resume_terms, TOP_TERMS);

        let target_set: HashSet<&str> = target_top.iter().map(|t| t.term.as_str()).collect();
        let resume_set: HashSet<&str> = resume_top.iter().map(|t| t.term.as_str()).collect();

        let matched: Vec<KeywordTerm> = resume_top
            .iter()
            .filter(|t| target_set.contains(t.term.as_str()))
            .cloned()
            .collect();

        let missing: Vec<KeywordTerm> = target_top
            .iter()
            .filter(|t| !resume_set.contains(t.term.as_str()))
            .take(MAX_MISSING_TERMS)
            .cloned()
            .collect();

        let overlap_ratio = if target_top.is_empty() {
            0.0
        } else {
            matched.len() as f64 / target_top.len() as f64
        };
        let similarity = self.cosine_similarity(&resume_terms, &target_terms);

        let score = (OVERLAP_WEIGHT * overlap_ratio * 100.0 + SIMILARITY_WEIGHT * similarity * 100.0)
            .min(100.0);

        debug!(
            "Keyword relevance: {} matched of {} target terms, similarity {:.3}, score {:.1}",
            matched.len(),
            target_top.len(),
            similarity,
            score
        );

        let details = KeywordDetails {
            matched_keywords: matched.into_iter().take(MAX_REPORTED_TERMS).collect(),
            missing_keywords: missing,
            resume_keywords: resume_top.into_iter().take(MAX_REPORTED_TERMS).collect(),
            target_keywords: target_top.into_iter().take(MAX_REPORTED_TERMS).collect(),
            similarity,
            overlap_ratio,
        };

        CategoryResult::new(score, details)
    }

    /// Lowercased tokens split on every run of non-alphanumeric characters
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.separator
            .split(text)
            .filter(|piece| !piece.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    /// Top TF-IDF terms of `doc`, with `other` as the rest of the corpus
    fn top_terms(&self, doc: &TermCounts, other: &TermCounts, limit: usize) -> Vec<KeywordTerm> {
        let mut ranked: Vec<KeywordTerm> = doc
            .order
            .iter()
            .filter(|term| self.is_candidate(term))
            .map(|term| {
                let doc_frequency = 1.0 + if other.contains(term) { 1.0 } else { 0.0 };
                let idf = 1.0 + (CORPUS_SIZE / (1.0 + doc_frequency)).ln();
                KeywordTerm {
                    term: term.clone(),
                    score: doc.count(term) as f64 * idf,
                }
            })
            .collect();

        // Stable sort keeps first-occurrence order among equal scores
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(limit);
        ranked
    }

    fn is_candidate(&self, term: &str) -> bool {
        term.chars().count() >= MIN_TERM_CHARS && !self.stop_words.contains(term)
    }

    /// Cosine similarity of raw term-frequency vectors over the full token streams
    fn cosine_similarity(&self, a: &TermCounts, b: &TermCounts) -> f64 {
        // Ordered maps keep float accumulation order fixed across runs
        let a: BTreeMap<&str, f64> = a.counts.iter().map(|(t, c)| (t.as_str(), *c as f64)).collect();
        let b: BTreeMap<&str, f64> = b.counts.iter().map(|(t, c)| (t.as_str(), *c as f64)).collect();

        let dot: f64 = a
            .iter()
            .filter_map(|(term, x)| b.get(term).map(|y| x * y))
            .sum();
        let magnitude_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
        let magnitude_b = b.values().map(|y| y * y).sum::<f64>().sqrt();

        if magnitude_a == 0.0 || magnitude_b == 0.0 {
            0.0
        } else {
            (dot / (magnitude_a * magnitude_b)).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenization() {
        let analyzer = KeywordAnalyzer::new().unwrap();
        let tokens = analyzer.tokenize("Rust, Python & Docker!");
        assert_eq!(tokens, vec!["rust", "python", "docker"]);
    }

    #[test]
    fn test_identical_texts_score_full() {
        let analyzer = KeywordAnalyzer::new().unwrap();
        let text = "rust developer building distributed systems with tokio and kubernetes";
        let result = analyzer.analyze(text, text);

        assert!(result.score > 99.99);
        assert!(result.details.missing_keywords.is_empty());
        assert!((result.details.similarity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_target_scores_zero() {
        let analyzer = KeywordAnalyzer::new().unwrap();
        let result = analyzer.analyze("experienced rust developer", "");

        assert_eq!(result.score, 0.0);
        assert!(result.details.missing_keywords.is_empty());
        assert!(result.details.target_keywords.is_empty());
        assert_eq!(result.details.overlap_ratio, 0.0);
    }

    #[test]
    fn test_stop_words_and_short_terms_filtered() {
        let analyzer = KeywordAnalyzer::new().unwrap();
        let result = analyzer.analyze("the go and of rust", "rust");
        let terms: Vec<&str> = result
            .details
            .resume_keywords
            .iter()
            .map(|t| t.term.as_str())
            .collect();
        assert_eq!(terms, vec!["rust"]);
    }

    #[test]
    fn test_unique_terms_outrank_shared_terms() {
        let analyzer = KeywordAnalyzer::new().unwrap();
        let result = analyzer.analyze("python kubernetes", "python");
        let terms: Vec<&str> = result
            .details
            .resume_keywords
            .iter()
            .map(|t| t.term.as_str())
            .collect();
        assert_eq!(terms, vec!["kubernetes", "python"]);
    }

    #[test]
    fn test_missing_keywords_capped_at_ten() {
        let analyzer = KeywordAnalyzer::new().unwrap();
        let target = (0..25)
            .map(|i| format!("requirement{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        let result = analyzer.analyze("nothing relevant here", &target);

        assert_eq!(result.details.missing_keywords.len(), 10);
        assert_eq!(result.details.missing_keywords[0].term, "requirement0");
        assert_eq!(result.details.target_keywords.len(), 15);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_partial_overlap_blend() {
        let analyzer = KeywordAnalyzer::new().unwrap();
        let result = analyzer.analyze("python docker", "python terraform");

        // One of two target terms matched, cosine = 1 / 2
        assert!((result.details.overlap_ratio - 0.5).abs() < 1e-9);
        assert!((result.details.similarity - 0.5).abs() < 1e-9);
        assert!((result.score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_bounds() {
        let analyzer = KeywordAnalyzer::new().unwrap();
        let similarity = analyzer
            .analyze("Rust programming language", "Programming in Rust")
            .details
            .similarity;
        assert!(similarity > 0.0);
        assert!(similarity <= 1.0);
        assert_eq!(analyzer.analyze("", "anything").details.similarity, 0.0);
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        let analyzer = KeywordAnalyzer::new().unwrap();
        assert_eq!(analyzer.tokenize("Node.js, don't"), vec!["node", "js", "don", "t"]);
        assert_eq!(
            analyzer.tokenize("ASP.NET, e.g. CI/CD"),
            vec!["asp", "net", "e", "g", "ci", "cd"]
        );
    }

    #[test]
    fn test_dotted_names_share_terms() {
        let analyzer = KeywordAnalyzer::new().unwrap();
        let similarity = analyzer.analyze("Node backend", "Node.js backend").details.similarity;
        // Counts {node, backend} vs {node, js, backend}: 2 / (sqrt 2 * sqrt 3)
        assert!((similarity - 2.0 / 6f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_pronouns_never_ranked() {
        let analyzer = KeywordAnalyzer::new().unwrap();
        let result = analyzer.analyze(
            "Python developer. Built services on Kubernetes.",
            "We are hiring. You will join our team. Your work matters to our customers, and you will own your services. Python Kubernetes.",
        );
        let target: Vec<&str> = result
            .details
            .target_keywords
            .iter()
            .map(|t| t.term.as_str())
            .collect();
        let missing: Vec<&str> = result
            .details
            .missing_keywords
            .iter()
            .map(|t| t.term.as_str())
            .collect();

        for word in ["you", "your", "our", "own"] {
            assert!(!target.contains(&word), "{word} ranked as a target term");
            assert!(!missing.contains(&word), "{word} reported missing");
        }
        assert!(target.contains(&"hiring"));
    }
}
