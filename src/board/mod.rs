//! Job-board postings and applications

pub mod manifest;

pub use manifest::JobBoard;

use crate::processing::JobRequirements;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Internship,
    Remote,
    Hybrid,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobType::FullTime => write!(f, "full-time"),
            JobType::PartTime => write!(f, "part-time"),
            JobType::Internship => write!(f, "internship"),
            JobType::Remote => write!(f, "remote"),
            JobType::Hybrid => write!(f, "hybrid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    /// Comma-separated skill list as entered by the employer
    #[serde(default)]
    pub required_skills: String,
    #[serde(default)]
    pub job_type: JobType,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl JobPosting {
    pub fn skill_list(&self) -> Vec<String> {
        JobRequirements::parse_skill_list(&self.required_skills)
    }

    pub fn job_requirements(&self) -> JobRequirements {
        JobRequirements {
            description: self.description.clone(),
            requirements: self.requirements.clone(),
            required_skills: self.skill_list(),
        }
    }

    /// Description, requirements and listed skills as one text.
    pub fn combined_description(&self) -> String {
        self.job_requirements().combined_text()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationStatus::Pending => write!(f, "pending"),
            ApplicationStatus::Reviewed => write!(f, "reviewed"),
            ApplicationStatus::Accepted => write!(f, "accepted"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: u64,
    pub job_id: u64,
    pub student_id: u64,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub student_email: Option<String>,
    pub resume_path: String,
    #[serde(default)]
    pub applied_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: ApplicationStatus,
}

/// Lookup of postings and applications by id.
pub trait JobCatalog: Send + Sync {
    fn posting(&self, job_id: u64) -> Option<JobPosting>;

    fn application(&self, application_id: u64) -> Option<Application>;
}
