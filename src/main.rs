//! ATS scorer: explainable resume scoring from the command line

use anyhow::{bail, Context};
use ats_scorer::cli::{self, Cli, Commands, ConfigAction};
use ats_scorer::config::Config;
use ats_scorer::explain::{ExplanationGenerator, TemplateExplainer};
use ats_scorer::input::InputManager;
use ats_scorer::output::{
    resolve_save_path, save_report_to_file, ReportGenerator, ReportMetadata, ScoreReport,
};
use ats_scorer::processing::analyzer::ScoringEngine;
use ats_scorer::processing::breakdown::{EvaluationMode, EvaluationParams};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Reading config file {}", path.display())),
        None => Config::load().context("Loading default configuration"),
    }
}

async fn run_command(command: Commands, config: Config, config_file: Option<PathBuf>) -> anyhow::Result<()> {
    match command {
        Commands::Score {
            resume,
            mode,
            job,
            role,
            output,
            save,
            detailed,
            no_explain,
        } => {
            let mode = cli::parse_mode(&mode).map_err(anyhow::Error::msg)?;
            cli::validate_mode_inputs(mode, job.as_deref(), role.as_deref()).map_err(anyhow::Error::msg)?;
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            let started = Instant::now();
            let mut input_manager =
                InputManager::new(config.input.max_file_size_bytes).with_cache(config.input.enable_cache);

            let resume_text = input_manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("Extracting resume text from {}", resume.display()))?;
            if resume_text.trim().is_empty() {
                bail!("No text could be extracted from {}", resume.display());
            }

            let params = match mode {
                EvaluationMode::JobDescription => {
                    let job_path = job.as_deref().context("Missing job description path")?;
                    cli::validate_file_extension(job_path, &["txt", "md", "markdown", "pdf"])
                        .map_err(anyhow::Error::msg)
                        .with_context(|| format!("Job description file {}", job_path.display()))?;
                    let job_text = input_manager
                        .extract_text(job_path)
                        .await
                        .with_context(|| format!("Extracting job description from {}", job_path.display()))?;
                    EvaluationParams::job_description(job_text)
                }
                EvaluationMode::TargetRole => EvaluationParams::target_role(role.unwrap_or_default()),
                EvaluationMode::General => EvaluationParams::general(),
            };

            let engine = ScoringEngine::new().context("Building scoring engine")?;
            let breakdown = engine.compute_score(&resume_text, &params);

            let explanation = if config.explanation.enabled && !no_explain {
                let explainer = TemplateExplainer::new(config.explanation.max_suggestions);
                Some(explainer.explain(&breakdown).context("Generating explanation")?)
            } else {
                None
            };

            let metadata = ReportMetadata::new(
                resume.display().to_string(),
                job.as_ref().map(|path| path.display().to_string()),
                started.elapsed().as_millis() as u64,
            );
            let report = ScoreReport::new(breakdown, explanation, metadata);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let rendered = generator
                .generate_report(&report, &output_format)
                .context("Rendering report")?;

            match save {
                Some(save) => {
                    let path = resolve_save_path(&save, &output_format, &resume.to_string_lossy());
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Saving report to {}", path.display()))?;
                    info!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Roles => {
            let engine = ScoringEngine::new().context("Building scoring engine")?;
            println!("Available target roles:\n");
            for role in engine.catalog().available_roles() {
                println!("  {:<22} {}", role.key, role.name);
            }
        }

        Commands::Config { action } => {
            let path = config_file.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("# {}\n", path.display());
                    println!("{}", config.to_toml()?);
                }
                Some(ConfigAction::Reset) => {
                    Config::default()
                        .save_to(&path)
                        .with_context(|| format!("Writing {}", path.display()))?;
                    println!("Configuration reset: {}", path.display());
                }
                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}
