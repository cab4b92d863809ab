//! CLI interface for the resume screener

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Resume screening and job-board application analysis")]
#[command(long_about = "Extract contact details and skills from resumes, score them against job descriptions, rank candidates and analyze job-board applications in the background")]
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
    /// Screen a resume and store the candidate
    Screen {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Job description text or a preset title such as "Data Scientist"
        #[arg(short, long, conflicts_with = "job_file")]
        job: Option<String>,

        /// Read the job description from a file (TXT, MD)
        #[arg(long)]
        job_file: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Do not record the candidate in the store
        #[arg(long)]
        no_store: bool,
    },

    /// List stored candidates ranked by score
    Candidates {
        /// Only candidates screened against this job description
        #[arg(short, long)]
        job: Option<String>,

        /// Output detailed listing
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Analyze one resume against a job-board posting
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Job board manifest (JSON)
        #[arg(short, long)]
        board: PathBuf,

        /// Posting id
        #[arg(long)]
        job_id: u64,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Queue job-board applications for background analysis
    Queue {
        /// Job board manifest (JSON)
        #[arg(short, long)]
        board: PathBuf,

        /// Application ids to analyze; defaults to every pending application
        #[arg(short, long = "application")]
        applications: Vec<u64>,

        /// Analyze every application, whatever its status
        #[arg(long, conflicts_with = "applications")]
        all: bool,
    },

    /// Show analyzed applications for a posting
    Results {
        /// Posting id
        job_id: u64,

        /// Job board manifest, used for the posting title
        #[arg(short, long)]
        board: Option<PathBuf>,

        /// Output detailed results
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List postings on a job board
    Jobs {
        /// Job board manifest (JSON)
        #[arg(short, long)]
        board: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show configuration
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

    /// Print the configuration file location
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "scoring.core_weight")
        key: String,

        /// Configuration value
        value: String,
    },
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
