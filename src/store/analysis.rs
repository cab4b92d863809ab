//! Job-board analysis results, one per application

use crate::error::Result;
use crate::processing::vocabulary::Field;
use crate::processing::ApplicationAnalysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub application_id: u64,
    pub job_id: u64,
    pub student_id: u64,
    pub resume_path: String,
    pub score: u8,
    pub predicted_field: Field,
    pub recommended_skills: Vec<String>,
    pub analysis: ApplicationAnalysis,
    pub analyzed_at: DateTime<Utc>,
}

pub struct AnalysisStore {
    path: PathBuf,
    records: Vec<AnalysisRecord>,
}

impl AnalysisStore {
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

    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn get(&self, application_id: u64) -> Option<&AnalysisRecord> {
        self.records.iter().find(|r| r.application_id == application_id)
    }

    /// Store a result, replacing any earlier one for the same application.
    /// Returns `true` when a record was replaced.
    pub fn upsert(&mut self, mut record: AnalysisRecord) -> bool {
        record.analyzed_at = Utc::now();

        match self
            .records
            .iter_mut()
            .find(|r| r.application_id == record.application_id)
        {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.records.push(record);
                false
            }
        }
    }

    /// Analyses of one posting's applicants, best score first.
    pub fn ranked_for_job(&self, job_id: u64) -> Vec<&AnalysisRecord> {
        let mut ranked: Vec<&AnalysisRecord> = self.records.iter().filter(|r| r.job_id == job_id).collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.application_id.cmp(&b.application_id))
        });
        ranked
    }

    pub async fn save(&self) -> Result<()> {
        super::write_records(&self.path, &self.records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(application_id: u64, job_id: u64, score: u8) -> AnalysisRecord {
        let mut analysis = ApplicationAnalysis::failed("placeholder");
        analysis.overall_score = score;

        AnalysisRecord {
            application_id,
            job_id,
            student_id: 7,
            resume_path: "resume.pdf".to_string(),
            score,
            predicted_field: Field::WebDevelopment,
            recommended_skills: vec!["docker".to_string()],
            analysis,
            analyzed_at: Utc::now() - Duration::days(1),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_and_refreshes_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AnalysisStore::open(&dir.path().join("analyses.json")).await.unwrap();

        let before = Utc::now();
        assert!(!store.upsert(record(1, 10, 30)));
        assert!(store.upsert(record(1, 10, 75)));

        assert_eq!(store.len(), 1);
        let stored = store.get(1).unwrap();
        assert_eq!(stored.score, 75);
        assert!(stored.analyzed_at >= before);
    }

    #[tokio::test]
    async fn test_ranked_for_job() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AnalysisStore::open(&dir.path().join("analyses.json")).await.unwrap();

        store.upsert(record(1, 10, 30));
        store.upsert(record(2, 10, 90));
        store.upsert(record(3, 11, 99));

        let ids: Vec<u64> = store.ranked_for_job(10).iter().map(|r| r.application_id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(store.ranked_for_job(12).is_empty());
    }

    #[tokio::test]
    async fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analyses.json");

        let mut store = AnalysisStore::open(&path).await.unwrap();
        store.upsert(record(4, 10, 61));
        store.save().await.unwrap();

        let reopened = AnalysisStore::open(&path).await.unwrap();
        assert_eq!(reopened.get(4).map(|r| r.score), Some(61));
    }
}
