//! Resume matcher: score resumes against job descriptions

use clap::Parser;
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::embedding::model2vec;
use resume_matcher::error::{MatcherError, Result};
use resume_matcher::input::file_detector::{JOB_EXTENSIONS, RESUME_EXTENSIONS};
use resume_matcher::input::manager::InputManager;
use resume_matcher::matching::engine::MatchEngine;
use resume_matcher::output::formatter::{self, ConsoleFormatter, JsonFormatter, OutputFormatter};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            job,
            output,
            detailed,
            save,
            no_semantic,
        } => {
            cli::validate_file_extension(&resume, &RESUME_EXTENSIONS)
                .map_err(|e| MatcherError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &JOB_EXTENSIONS)
                .map_err(|e| MatcherError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format = cli::parse_output_format(&output).map_err(MatcherError::InvalidInput)?;

            // Semantic availability is decided once, before any request.
            let embedder = if no_semantic {
                info!("Semantic matching disabled by flag");
                None
            } else {
                model2vec::init_capability(&config)
            };

            let mut input_manager = InputManager::new();

            let resume_text = input_manager.extract_text(&resume).await?;
            if resume_text.trim().is_empty() {
                return Err(MatcherError::EmptyDocument(format!(
                    "Could not extract text from resume file {}",
                    resume.display()
                )));
            }

            let job_text = input_manager.extract_text(&job).await?;
            if job_text.trim().is_empty() {
                return Err(MatcherError::MissingInput(
                    "Job description is empty".to_string(),
                ));
            }

            let engine = MatchEngine::new(embedder)?;
            let result = engine.score(&resume_text, &job_text);

            let detailed = detailed || config.output.detailed;
            let rendered = match output_format {
                OutputFormat::Console => ConsoleFormatter::new(config.output.color_output, detailed)
                    .format_report(&result)?,
                OutputFormat::Json => JsonFormatter::new(true).format_report(&result)?,
            };
            println!("{}", rendered);

            if let Some(path) = save {
                let path = path
                    .unwrap_or_else(|| PathBuf::from(formatter::default_save_name(&output_format)));
                // Saved reports are plain, never colored.
                let plain = match output_format {
                    OutputFormat::Console => {
                        ConsoleFormatter::new(false, detailed).format_report(&result)?
                    }
                    OutputFormat::Json => rendered,
                };
                tokio::fs::write(&path, plain).await?;
                info!("Report saved to {}", path.display());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Current Configuration\n");
                println!("Models Directory: {}", config.models_dir().display());
                println!("Embedding Model: {}", config.models.embedding_model);
                println!("Detailed Output: {}", config.output.detailed);
                println!("Color Output: {}", config.output.color_output);
            }

            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}
