//! Screened candidates, ranked for the admin view

use crate::error::Result;
use crate::processing::resume_parser::UNKNOWN;
use crate::processing::scoring::UserLevel;
use crate::processing::vocabulary::Field;
use crate::processing::ScreeningReport;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub score: u8,
    pub timestamp: DateTime<Utc>,
    pub pages: usize,
    pub predicted_field: Field,
    pub job_description: Option<String>,
    pub user_level: UserLevel,
    pub skills: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub resume_path: String,
}

impl CandidateRecord {
    /// Record for a screening report; the id is assigned on insert.
    pub fn from_report(report: &ScreeningReport) -> Self {
        Self {
            id: 0,
            name: report.profile.name.clone(),
            email: report.profile.email.clone(),
            mobile: report.profile.mobile.clone(),
            score: report.score.total,
            timestamp: report.generated_at,
            pages: report.profile.pages,
            predicted_field: report.courses.field,
            job_description: report.job_description.clone(),
            user_level: report.level,
            skills: report.profile.skills.clone(),
            recommended_skills: report.recommended_skills.clone(),
            resume_path: report.resume_path.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(u64),
    /// A candidate with the same email is already stored
    Duplicate { existing_id: u64 },
}

pub struct CandidateStore {
    path: PathBuf,
    records: Vec<CandidateRecord>,
}

impl CandidateStore {
    pub async fn open(path: &Path) -> Result<Self> {
        let records = super::load_records(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&CandidateRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&CandidateRecord> {
        if email == UNKNOWN {
            return None;
        }
        self.records
            .iter()
            .find(|r| r.email.eq_ignore_ascii_case(email))
    }

    /// Insert unless a candidate with the same email exists.
    ///
    /// Records without a detected email never count as duplicates.
    pub fn insert_unique(&mut self, mut record: CandidateRecord) -> InsertOutcome {
        if let Some(existing) = self.find_by_email(&record.email) {
            info!("Candidate {} already stored as #{}", record.email, existing.id);
            return InsertOutcome::Duplicate {
                existing_id: existing.id,
            };
        }

        let id = self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        record.id = id;
        self.records.push(record);
        InsertOutcome::Inserted(id)
    }

    /// Candidates by score, highest first, optionally for one job description.
    pub fn ranked(&self, job_filter: Option<&str>) -> Vec<&CandidateRecord> {
        let mut ranked: Vec<&CandidateRecord> = self
            .records
            .iter()
            .filter(|r| match job_filter {
                Some(job) => r.job_description.as_deref() == Some(job),
                None => true,
            })
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        ranked
    }

    pub async fn save(&self) -> Result<()> {
        super::write_records(&self.path, &self.records).await
    }
}
