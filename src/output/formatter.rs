//! Output formatters for console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::ScoreReport;
use crate::processing::breakdown::{CategoryScores, CategoryWeights};
use crate::processing::keywords::KeywordTerm;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for formatting score reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and score badges
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    detailed: bool,
}

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

/// Display rows for the four categories, in aggregation order
fn category_rows(scores: &CategoryScores, weights: &CategoryWeights) -> [(&'static str, f64, f64); 4] {
    [
        ("Keyword Relevance", scores.keyword_relevance, weights.keyword_relevance),
        ("Role Alignment", scores.role_alignment, weights.role_alignment),
        ("Structure", scores.structure, weights.structure),
        ("Formatting", scores.formatting, weights.formatting),
    ]
}

fn join_terms(terms: &[KeywordTerm]) -> String {
    terms.iter().map(|t| t.term.as_str()).collect::<Vec<_>>().join(", ")
}

fn join_display<T: std::fmt::Display>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn score_bar(&self, score: f64) -> String {
        let filled = (score / 10.0).round().clamp(0.0, 10.0) as usize;
        let bar = format!("{}{}", "■".repeat(filled), "·".repeat(10 - filled));
        let color = if score >= 70.0 {
            Color::Green
        } else if score >= 50.0 {
            Color::Yellow
        } else {
            Color::Red
        };
        self.colorize(&bar, color)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let breakdown = &report.breakdown;
        let details = &breakdown.breakdown;
        let mut output = String::new();

        output.push_str(&self.format_header("ATS SCORE REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));
        output.push_str(&format!(
            "Mode: {} | Target: {}\n",
            breakdown.metadata.mode, breakdown.metadata.target_role
        ));

        output.push_str(&self.format_header("Overall", 2));
        output.push_str(&format!(
            "Overall Score: {}/100 {}\n",
            breakdown.overall_score,
            self.format_score_badge(breakdown.overall_score)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(report.verdict(), Color::Cyan)));

        output.push_str(&self.format_header("Category Scores", 3));
        for (label, score, weight) in category_rows(&breakdown.category_scores, &breakdown.category_weights) {
            output.push_str(&format!(
                "{:<18} {} {:>5.1} (weight: {:.0}%)\n",
                label,
                self.score_bar(score),
                score,
                weight * 100.0
            ));
        }

        let issues = &details.formatting.details.issues;
        if !issues.is_empty() {
            output.push_str(&self.format_header("Formatting Issues", 3));
            for issue in issues {
                output.push_str(&format!(
                    "  {} {} (-{})\n",
                    self.colorize("✗", Color::Red),
                    issue.message,
                    issue.penalty
                ));
            }
        }

        let missing_core = &details.role_alignment.details.missing_core_skills;
        if !missing_core.is_empty() {
            output.push_str(&self.format_header("Missing Core Skills", 3));
            output.push_str(&format!("  {}\n", self.colorize(&missing_core.join(", "), Color::Yellow)));
        }

        if self.detailed {
            let keywords = &details.keyword_relevance.details;
            output.push_str(&self.format_header("Keywords", 3));
            output.push_str(&format!("  Matched: {}\n", join_terms(&keywords.matched_keywords)));
            output.push_str(&format!("  Missing: {}\n", join_terms(&keywords.missing_keywords)));
            output.push_str(&format!(
                "  Similarity: {:.2} | Overlap: {:.2}\n",
                keywords.similarity, keywords.overlap_ratio
            ));

            let alignment = &details.role_alignment.details;
            output.push_str(&self.format_header("Role Skills", 3));
            for (label, hits) in [
                ("Core", &alignment.core_skills),
                ("Transferable", &alignment.transferable_skills),
                ("Peripheral", &alignment.peripheral_skills),
            ] {
                let names: Vec<&str> = hits.iter().map(|h| h.skill.as_str()).collect();
                output.push_str(&format!("  {}: {}\n", label, names.join(", ")));
            }
            output.push_str(&format!("  Core coverage: {}%\n", alignment.core_skill_percentage));

            let structure = &details.structure.details;
            output.push_str(&self.format_header("Sections", 3));
            output.push_str(&format!("  Present: {}\n", join_display(&structure.present)));
            output.push_str(&format!("  Missing: {}\n", join_display(&structure.missing)));
            output.push_str(&format!("  Optional: {}\n", join_display(&structure.optional)));

            let skills: Vec<&str> = breakdown.metadata.resume_skills.iter().map(String::as_str).collect();
            output.push_str(&format!("  Detected skills: {}\n", skills.join(", ")));
        }

        if let Some(explanation) = &report.explanation {
            output.push_str(&self.format_header("Explanation", 2));
            output.push_str(&format!("{}\n", explanation.explanation));
            if !explanation.suggestions.is_empty() {
                output.push_str(&self.format_header("Suggestions", 3));
                for (i, suggestion) in explanation.suggestions.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, detailed: bool) -> Self {
        Self {
            include_metadata,
            detailed,
        }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match score {
            90..=100 => "🟢 Excellent",
            80..=89 => "🟢 Very Good",
            70..=79 => "🟡 Good",
            60..=69 => "🟡 Fair",
            50..=59 => "🟠 Below Average",
            _ => "🔴 Poor",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let breakdown = &report.breakdown;
        let details = &breakdown.breakdown;
        let mut output = String::new();

        output.push_str("# ATS Score Report\n\n");

        if self.include_metadata {
            let resume_name = Path::new(&report.metadata.resume_file)
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| report.metadata.resume_file.clone());
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Mode:** {} | **Target:** {}\n\n",
                resume_name, breakdown.metadata.mode, breakdown.metadata.target_role
            ));
        }

        output.push_str(&format!(
            "**Overall Score:** {}/100 {}\n\n",
            breakdown.overall_score,
            Self::markdown_score_badge(breakdown.overall_score)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict()));

        output.push_str("## Category Scores\n\n");
        output.push_str("| Category | Score | Weight |\n");
        output.push_str("|----------|-------|--------|\n");
        for (label, score, weight) in category_rows(&breakdown.category_scores, &breakdown.category_weights) {
            output.push_str(&format!("| {} | {:.1} | {:.0}% |\n", label, score, weight * 100.0));
        }
        output.push('\n');

        let issues = &details.formatting.details.issues;
        if !issues.is_empty() {
            output.push_str("## Formatting Issues\n\n");
            for issue in issues {
                output.push_str(&format!("- {} (-{})\n", issue.message, issue.penalty));
            }
            output.push('\n');
        }

        let missing_core = &details.role_alignment.details.missing_core_skills;
        if !missing_core.is_empty() {
            output.push_str("## Missing Core Skills\n\n");
            for skill in missing_core {
                output.push_str(&format!("- `{}`\n", skill));
            }
            output.push('\n');
        }

        if self.detailed {
            let keywords = &details.keyword_relevance.details;
            output.push_str("## Keywords\n\n");
            output.push_str(&format!("- **Matched:** {}\n", join_terms(&keywords.matched_keywords)));
            output.push_str(&format!("- **Missing:** {}\n", join_terms(&keywords.missing_keywords)));
            output.push_str(&format!("- **Similarity:** {:.2}\n\n", keywords.similarity));

            let structure = &details.structure.details;
            output.push_str("## Sections\n\n");
            output.push_str(&format!("- **Present:** {}\n", join_display(&structure.present)));
            output.push_str(&format!("- **Missing:** {}\n", join_display(&structure.missing)));
            output.push_str(&format!("- **Optional:** {}\n\n", join_display(&structure.optional)));
        }

        if let Some(explanation) = &report.explanation {
            output.push_str("## Explanation\n\n");
            output.push_str(&format!("{}\n\n", explanation.explanation));
            if !explanation.suggestions.is_empty() {
                output.push_str("### Suggestions\n\n");
                for (i, suggestion) in explanation.suggestions.iter().enumerate() {
                    output.push_str(&format!("{}. {}\n", i + 1, suggestion));
                }
                output.push('\n');
            }
        }

        output.push_str("---\n");
        output.push_str(&format!("*Generated by ats-scorer v{}*\n", report.metadata.scorer_version));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata, detailed),
        }
    }

    pub fn generate_report(&self, report: &ScoreReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };
    format!("{}_ats_score{}.{}", base_name, timestamp_suffix, extension)
}

/// Where to write a report: `save` itself, or a suggested file name inside it
/// when `save` is an existing directory
pub fn resolve_save_path(save: &Path, format: &OutputFormat, resume_name: &str) -> PathBuf {
    if save.is_dir() {
        save.join(suggest_filename(format, resume_name, true))
    } else {
        save.to_path_buf()
    }
}
