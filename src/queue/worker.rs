use crate::board::JobCatalog;
use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::extract_from_bytes;
use crate::processing::{ApplicationAnalysis, ResumeProfile, Screener};
use crate::queue::{QueueSummary, QueuedApplication};
use crate::store::{AnalysisRecord, AnalysisStore};
use chrono::Utc;
use log::{debug, error, info, warn};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

pub(super) struct WorkerContext {
    pub screener: Arc<Screener>,
    pub catalog: Arc<dyn JobCatalog>,
    pub store: Arc<Mutex<AnalysisStore>>,
    pub completed: Arc<AtomicUsize>,
}

enum ItemOutcome {
    Processed,
    Skipped,
    Failed,
}

pub(super) async fn run(mut rx: mpsc::UnboundedReceiver<QueuedApplication>, ctx: WorkerContext) -> QueueSummary {
    let mut summary = QueueSummary::default();

    while let Some(item) = rx.recv().await {
        let application_id = item.application_id;

        match process(&ctx, item).await {
            Ok(ItemOutcome::Processed) => summary.processed += 1,
            Ok(ItemOutcome::Skipped) => summary.skipped += 1,
            Ok(ItemOutcome::Failed) => summary.failed += 1,
            Err(e) => {
                error!("Analysis of application {} failed: {}", application_id, e);
                summary.failed += 1;
            }
        }

        ctx.completed.fetch_add(1, Ordering::SeqCst);
    }

    summary
}

async fn process(ctx: &WorkerContext, item: QueuedApplication) -> Result<ItemOutcome> {
    let Some(posting) = ctx.catalog.posting(item.job_id) else {
        warn!(
            "Skipping application {}: job {} not found",
            item.application_id, item.job_id
        );
        return Ok(ItemOutcome::Skipped);
    };

    debug!(
        "Analyzing application {} for '{}'",
        item.application_id, posting.title
    );

    let parsed = parse_resume(Arc::clone(&ctx.screener), item.resume_path.clone()).await;

    let (record, outcome) = match parsed {
        Ok(profile) => {
            let evaluation = ctx
                .screener
                .evaluate_application(&profile, &posting.job_requirements());

            info!(
                "Application {} scored {} ({:.1}% match)",
                item.application_id, evaluation.analysis.overall_score, evaluation.analysis.match_percentage
            );

            let record = AnalysisRecord {
                application_id: item.application_id,
                job_id: item.job_id,
                student_id: item.student_id,
                resume_path: item.resume_path.display().to_string(),
                score: evaluation.analysis.overall_score,
                predicted_field: evaluation.courses.field,
                recommended_skills: evaluation.recommended_skills,
                analysis: evaluation.analysis,
                analyzed_at: Utc::now(),
            };
            (record, ItemOutcome::Processed)
        }
        Err(e) => {
            warn!(
                "Could not read resume {} for application {}: {}",
                item.resume_path.display(),
                item.application_id,
                e
            );

            let fallback = ctx.screener.recommender().recommend_courses(&BTreeSet::new());
            let record = AnalysisRecord {
                application_id: item.application_id,
                job_id: item.job_id,
                student_id: item.student_id,
                resume_path: item.resume_path.display().to_string(),
                score: 0,
                predicted_field: fallback.field,
                recommended_skills: Vec::new(),
                analysis: ApplicationAnalysis::failed(&e.to_string()),
                analyzed_at: Utc::now(),
            };
            (record, ItemOutcome::Failed)
        }
    };

    let mut store = ctx.store.lock().await;
    store.upsert(record);
    store.save().await?;

    Ok(outcome)
}

/// Read and parse a resume on the blocking pool. A crashed parsing task
/// counts as an unreadable document.
async fn parse_resume(screener: Arc<Screener>, path: PathBuf) -> Result<ResumeProfile> {
    tokio::task::spawn_blocking(move || -> Result<ResumeProfile> {
        let bytes = std::fs::read(&path)?;
        let extracted = extract_from_bytes(FileType::from_path(&path), &bytes)?;
        Ok(screener.parser().parse_text(extracted))
    })
    .await
    .unwrap_or_else(|e| Err(ScreenerError::Queue(format!("resume parsing task failed: {}", e))))
}
