//! Job board loaded from a JSON manifest

use crate::board::{Application, ApplicationStatus, JobCatalog, JobPosting};
use crate::error::{Result, ScreenerError};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Postings and applications. Relative resume paths resolve against the
/// manifest's directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobBoard {
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl JobBoard {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let board = Self::from_json(&content, base_dir)?;

        info!(
            "Loaded job board with {} postings and {} applications",
            board.jobs.len(),
            board.applications.len()
        );
        Ok(board)
    }

    pub fn from_json(content: &str, base_dir: PathBuf) -> Result<Self> {
        let mut board: JobBoard = serde_json::from_str(content)?;
        board.base_dir = base_dir;
        board.validate()?;
        Ok(board)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for job in &self.jobs {
            if !seen.insert(job.id) {
                return Err(ScreenerError::InvalidInput(format!("Duplicate job id {}", job.id)));
            }
        }

        let mut seen = HashSet::new();
        for application in &self.applications {
            if !seen.insert(application.id) {
                return Err(ScreenerError::InvalidInput(format!(
                    "Duplicate application id {}",
                    application.id
                )));
            }
        }
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn active_postings(&self) -> impl Iterator<Item = &JobPosting> {
        self.jobs.iter().filter(|job| job.is_active)
    }

    pub fn applications_for(&self, job_id: u64) -> impl Iterator<Item = &Application> {
        self.applications.iter().filter(move |a| a.job_id == job_id)
    }

    pub fn pending_applications(&self) -> impl Iterator<Item = &Application> {
        self.applications
            .iter()
            .filter(|a| a.status == ApplicationStatus::Pending)
    }

    /// Resume path of an application, resolved against the manifest directory.
    pub fn resolve_resume_path(&self, application: &Application) -> PathBuf {
        let path = Path::new(&application.resume_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl JobCatalog for JobBoard {
    fn posting(&self, job_id: u64) -> Option<JobPosting> {
        self.jobs.iter().find(|job| job.id == job_id).cloned()
    }

    fn application(&self, application_id: u64) -> Option<Application> {
        self.applications
            .iter()
            .find(|a| a.id == application_id)
            .map(|a| Application {
                resume_path: self.resolve_resume_path(a).display().to_string(),
                ..a.clone()
            })
    }
}
