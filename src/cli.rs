//! CLI interface for the ATS scorer

use crate::config::OutputFormat;
use crate::processing::breakdown::EvaluationMode;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ats-scorer")]
#[command(about = "Explainable ATS resume scoring")]
#[command(long_about = "Score a resume for ATS compatibility against a job description, a target role, or general best practice, with a per-category breakdown")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume
    Score {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Evaluation mode: job-description, target-role, general
        #[arg(short, long, default_value = "general")]
        mode: String,

        /// Path to job description file (TXT, MD), required in job-description mode
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Target role id (see `roles`), required in target-role mode
        #[arg(long)]
        role: Option<String>,

        /// Output format: console, json, markdown (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show matched keywords, skills and sections
        #[arg(short, long)]
        detailed: bool,

        /// Skip the explanation and suggestions
        #[arg(long)]
        no_explain: bool,
    },

    /// List selectable target roles
    Roles,

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Strict mode parsing for the command line; the engine itself falls back to general
pub fn parse_mode(mode: &str) -> Result<EvaluationMode, String> {
    match mode.trim().to_lowercase().as_str() {
        "job-description" | "jd" => Ok(EvaluationMode::JobDescription),
        "target-role" | "role" => Ok(EvaluationMode::TargetRole),
        "general" => Ok(EvaluationMode::General),
        _ => Err(format!(
            "Invalid mode: {}. Supported: job-description, target-role, general",
            mode
        )),
    }
}

/// Check that the fields a mode needs were supplied
pub fn validate_mode_inputs(
    mode: EvaluationMode,
    job: Option<&Path>,
    role: Option<&str>,
) -> Result<(), String> {
    match mode {
        EvaluationMode::JobDescription if job.is_none() => {
            Err("Job description is required for job-description mode (--job)".to_string())
        }
        EvaluationMode::TargetRole if role.map_or(true, |r| r.trim().is_empty()) => {
            Err("Target role is required for target-role mode (--role)".to_string())
        }
        _ => Ok(()),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
