//! Background analysis of job-board applications

mod worker;

use crate::board::{Application, JobCatalog};
use crate::error::{Result, ScreenerError};
use crate::processing::Screener;
use crate::store::AnalysisStore;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

/// One application waiting for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedApplication {
    pub application_id: u64,
    pub job_id: u64,
    pub student_id: u64,
    pub resume_path: PathBuf,
}

impl From<&Application> for QueuedApplication {
    fn from(application: &Application) -> Self {
        Self {
            application_id: application.id,
            job_id: application.job_id,
            student_id: application.student_id,
            resume_path: PathBuf::from(&application.resume_path),
        }
    }
}

/// Outcome counts once the queue has drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl QueueSummary {
    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }
}

/// FIFO queue drained by a single spawned worker.
pub struct AnalysisQueue {
    tx: mpsc::UnboundedSender<QueuedApplication>,
    worker: JoinHandle<QueueSummary>,
    enqueued: AtomicUsize,
    completed: Arc<AtomicUsize>,
}

impl AnalysisQueue {
    /// Spawn the worker. Must be called from within a tokio runtime.
    pub fn start(
        screener: Arc<Screener>,
        catalog: Arc<dyn JobCatalog>,
        store: Arc<Mutex<AnalysisStore>>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let completed = Arc::new(AtomicUsize::new(0));

        let worker = tokio::spawn(worker::run(
            rx,
            worker::WorkerContext {
                screener,
                catalog,
                store,
                completed: Arc::clone(&completed),
            },
        ));
        debug!("Analysis worker started");

        Self {
            tx,
            worker,
            enqueued: AtomicUsize::new(0),
            completed,
        }
    }

    pub fn enqueue(&self, item: QueuedApplication) -> Result<()> {
        let application_id = item.application_id;
        self.tx
            .send(item)
            .map_err(|_| ScreenerError::Queue("analysis worker has stopped".to_string()))?;

        self.enqueued.fetch_add(1, Ordering::SeqCst);
        debug!("Queued application {}", application_id);
        Ok(())
    }

    /// Look up an application and queue it for analysis.
    pub fn process_application(&self, catalog: &dyn JobCatalog, application_id: u64) -> Result<()> {
        let application = catalog
            .application(application_id)
            .ok_or_else(|| ScreenerError::NotFound(format!("application {}", application_id)))?;

        self.enqueue(QueuedApplication::from(&application))
    }

    pub fn enqueued(&self) -> usize {
        self.enqueued.load(Ordering::SeqCst)
    }

    /// Items the worker has finished, whatever their outcome.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Stop accepting work, wait for the worker to drain the queue.
    pub async fn shutdown(self) -> Result<QueueSummary> {
        drop(self.tx);

        let summary = self
            .worker
            .await
            .map_err(|e| ScreenerError::Queue(format!("analysis worker panicked: {}", e)))?;

        info!(
            "Analysis queue drained: {} processed, {} skipped, {} failed",
            summary.processed, summary.skipped, summary.failed
        );
        Ok(summary)
    }
}
