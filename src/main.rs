//! resume-screener: resume screening and job-board application analysis

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_screener::board::{JobBoard, JobCatalog};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::input::InputManager;
use resume_screener::output::{
    save_report_to_file, suggest_filename, CandidateListing, JobResults, JobSummary, ReportGenerator,
};
use resume_screener::processing::Screener;
use resume_screener::queue::AnalysisQueue;
use resume_screener::store::{AnalysisRecord, AnalysisStore, CandidateRecord, CandidateStore, InsertOutcome};
use resume_screener::{Result, ScreenerError};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Screen {
            resume,
            job,
            job_file,
            detailed,
            output,
            save,
            no_store,
        } => {
            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Resume file: {}", e)))?;
            let output_format = resolve_format(output.as_deref(), &config)?;

            let mut input = InputManager::new();
            let job_description = match (job, job_file) {
                (Some(job), _) => Some(job),
                (None, Some(path)) => {
                    cli::validate_file_extension(&path, &["txt", "md", "markdown"])
                        .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;
                    Some(input.extract_text(&path).await?)
                }
                (None, None) => None,
            };

            let screener = Screener::from_config(&config)?;
            let report = screener.screen(&mut input, &resume, job_description.as_deref()).await;

            if no_store {
                info!("Candidate not stored (--no-store)");
            } else if report.profile.text.is_empty() {
                warn!("Nothing could be read from {}; candidate not stored", resume.display());
            } else {
                let mut store = CandidateStore::open(&config.candidates_path()).await?;
                match store.insert_unique(CandidateRecord::from_report(&report)) {
                    InsertOutcome::Inserted(id) => {
                        store.save().await?;
                        info!("Stored candidate #{} in {}", id, store.path().display());
                    }
                    InsertOutcome::Duplicate { existing_id } => {
                        warn!(
                            "A candidate with email {} is already stored as #{}; not recorded again",
                            report.profile.email, existing_id
                        );
                    }
                }
            }

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
            )
            .with_scoring(&config.scoring);
            let content = generator.formatter(output_format).format_screening(&report)?;

            let save = save.map(|path| {
                if path.is_dir() {
                    path.join(suggest_filename(output_format, &resume.to_string_lossy(), true))
                } else {
                    path
                }
            });
            emit(&content, save.as_deref())?;
        }

        Commands::Candidates { job, detailed, output } => {
            let output_format = resolve_format(output.as_deref(), &config)?;
            let store = CandidateStore::open(&config.candidates_path()).await?;

            let listing = CandidateListing::new(job.as_deref(), store.ranked(job.as_deref()));
            let generator =
                ReportGenerator::with_options(config.output.color_output, detailed || config.output.detailed)
                    .with_scoring(&config.scoring);
            emit(&generator.formatter(output_format).format_candidates(&listing)?, None)?;
        }

        Commands::Analyze {
            resume,
            board,
            job_id,
            output,
        } => {
            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Resume file: {}", e)))?;
            let output_format = resolve_format(output.as_deref(), &config)?;

            let board = load_board(&board).await?;
            let posting = board
                .posting(job_id)
                .ok_or_else(|| ScreenerError::NotFound(format!("job {}", job_id)))?;

            let screener = Screener::from_config(&config)?;
            let mut input = InputManager::new();
            let profile = screener.parser().try_parse_file(&mut input, &resume).await?;
            let evaluation = screener.evaluate_application(&profile, &posting.job_requirements());

            let record = AnalysisRecord {
                application_id: 0,
                job_id,
                student_id: 0,
                resume_path: resume.display().to_string(),
                score: evaluation.analysis.overall_score,
                predicted_field: evaluation.courses.field,
                recommended_skills: evaluation.recommended_skills,
                analysis: evaluation.analysis,
                analyzed_at: chrono::Utc::now(),
            };

            let results = JobResults::new(job_id, Some(&posting), vec![&record]);
            let generator =
                ReportGenerator::with_options(config.output.color_output, true).with_scoring(&config.scoring);
            emit(&generator.formatter(output_format).format_results(&results)?, None)?;
        }

        Commands::Queue {
            board,
            applications,
            all,
        } => {
            let board = Arc::new(load_board(&board).await?);
            let store = Arc::new(Mutex::new(AnalysisStore::open(&config.analyses_path()).await?));
            let screener = Arc::new(Screener::from_config(&config)?);

            let ids: Vec<u64> = if !applications.is_empty() {
                applications
            } else if all {
                board.applications.iter().map(|a| a.id).collect()
            } else {
                board.pending_applications().map(|a| a.id).collect()
            };

            if ids.is_empty() {
                println!("No applications to analyze.");
                return Ok(());
            }

            let catalog: Arc<dyn JobCatalog> = board.clone();
            let queue = AnalysisQueue::start(screener, catalog, Arc::clone(&store));

            for id in ids {
                if let Err(e) = queue.process_application(board.as_ref(), id) {
                    warn!("Not queued: {}", e);
                }
            }

            let total = queue.enqueued() as u64;
            let progress = ProgressBar::new(total);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .expect("static template")
                    .progress_chars("=> "),
            );
            progress.set_message("analyzing applications");

            while (queue.completed() as u64) < total {
                progress.set_position(queue.completed() as u64);
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            progress.finish_and_clear();

            let summary = queue.shutdown().await?;
            println!(
                "{} {} processed, {} skipped, {} failed",
                "Analysis complete:".green().bold(),
                summary.processed,
                summary.skipped,
                summary.failed
            );
            println!("Results stored in {}", store.lock().await.path().display());
        }

        Commands::Results {
            job_id,
            board,
            detailed,
            output,
        } => {
            let output_format = resolve_format(output.as_deref(), &config)?;
            let posting = match board {
                Some(path) => load_board(&path).await?.posting(job_id),
                None => None,
            };

            let store = AnalysisStore::open(&config.analyses_path()).await?;
            let results = JobResults::new(job_id, posting.as_ref(), store.ranked_for_job(job_id));

            let generator =
                ReportGenerator::with_options(config.output.color_output, detailed || config.output.detailed)
                    .with_scoring(&config.scoring);
            emit(&generator.formatter(output_format).format_results(&results)?, None)?;
        }

        Commands::Jobs { board, output } => {
            let output_format = resolve_format(output.as_deref(), &config)?;
            let board = load_board(&board).await?;
            let store = AnalysisStore::open(&config.analyses_path()).await?;

            let jobs = JobSummary::collect(&board, &store);
            let generator = ReportGenerator::from_config(&config.output);
            emit(&generator.formatter(output_format).format_jobs(&jobs)?, None)?;
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config)
                        .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                    println!("{}", "Current Configuration".bold());
                    println!("{}", path.display().to_string().dimmed());
                    println!();
                    println!("{}", content);
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("{} {}", "Configuration reset:".green(), path.display());
                }

                Some(ConfigAction::Set { key, value }) => {
                    let mut config = config;
                    config.set_value(&key, &value)?;
                    config.save_to(&path)?;
                    println!("{} {} = {}", "Updated".green(), key, value);
                }
            }
        }
    }

    Ok(())
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(ScreenerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

async fn load_board(path: &Path) -> Result<JobBoard> {
    let board = JobBoard::load(path)
        .await
        .with_context(|| format!("Failed to load job board manifest {}", path.display()))?;
    Ok(board)
}

fn emit(content: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(content, path)?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
