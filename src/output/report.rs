//! Report views handed to the formatters

use crate::board::{JobBoard, JobPosting, JobType};
use crate::store::{AnalysisRecord, AnalysisStore, CandidateRecord};
use serde::{Deserialize, Serialize};

/// Ranked candidates for the admin view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateListing {
    pub job_filter: Option<String>,
    pub candidates: Vec<CandidateRecord>,
}

impl CandidateListing {
    pub fn new(job_filter: Option<&str>, candidates: Vec<&CandidateRecord>) -> Self {
        Self {
            job_filter: job_filter.map(str::to_string),
            candidates: candidates.into_iter().cloned().collect(),
        }
    }
}

/// Analyzed applications of one posting, best first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResults {
    pub job_id: u64,
    pub job_title: Option<String>,
    pub results: Vec<AnalysisRecord>,
}

impl JobResults {
    pub fn new(job_id: u64, posting: Option<&JobPosting>, results: Vec<&AnalysisRecord>) -> Self {
        Self {
            job_id,
            job_title: posting.map(|p| p.title.clone()),
            results: results.into_iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: u64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub is_active: bool,
    pub skills: Vec<String>,
    pub applications: usize,
    pub analyzed: usize,
}

impl JobSummary {
    /// One summary per posting, with application and analysis counts.
    pub fn collect(board: &JobBoard, store: &AnalysisStore) -> Vec<JobSummary> {
        board
            .jobs
            .iter()
            .map(|job| JobSummary {
                id: job.id,
                title: job.title.clone(),
                company: job.company.clone(),
                location: job.location.clone(),
                job_type: job.job_type,
                is_active: job.is_active,
                skills: job.skill_list(),
                applications: board.applications_for(job.id).count(),
                analyzed: store.ranked_for_job(job.id).len(),
            })
            .collect()
    }
}
