//! Single-job lifecycle control.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use gametl_core::config::TranslatorConfig;
use gametl_core::job::{JobStatus, JobSummary, TranslationEngine};
use gametl_core::progress::RunId;
use gametl_core::{GametlError, Result};
use tokio::sync::watch;

use crate::progress_hub::SharedProgress;

pub const NO_FILE_SELECTED: &str = "Please select a file first.";

/// Starts and stops the translation job, one run at a time.
///
/// `Idle -> Running` happens in [`start`](Self::start) before the engine is
/// called; `Running -> Idle` happens only when the engine call resolves
/// (or the `start` future is dropped), never in [`stop`](Self::stop).
pub struct JobController {
    engine: Arc<dyn TranslationEngine>,
    progress: SharedProgress,
    status: watch::Sender<JobStatus>,
    last_run: AtomicU64,
}

impl JobController {
    pub fn new(engine: Arc<dyn TranslationEngine>, progress: SharedProgress) -> Self {
        let (status, _) = watch::channel(JobStatus::Idle);
        Self {
            engine,
            progress,
            status,
            last_run: AtomicU64::new(0),
        }
    }

    pub fn status(&self) -> JobStatus {
        *self.status.borrow()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<JobStatus> {
        self.status.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.status().is_running()
    }

    pub fn progress(&self) -> SharedProgress {
        Arc::clone(&self.progress)
    }

    /// Runs one job to completion.
    ///
    /// Rejects an empty `file_path` and a second concurrent start without
    /// touching any state. Progress from earlier runs is cleared before the
    /// engine sees the job.
    pub async fn start(&self, config: &TranslatorConfig, file_path: &str) -> Result<JobSummary> {
        if file_path.trim().is_empty() {
            return Err(GametlError::validation(NO_FILE_SELECTED));
        }

        let mut claimed = None;
        self.status.send_if_modified(|status| {
            if status.is_running() {
                return false;
            }
            let run_id = RunId(self.last_run.fetch_add(1, Ordering::SeqCst) + 1);
            self.engine.prepare_run(run_id);
            *status = JobStatus::Running { run_id };
            claimed = Some(run_id);
            true
        });
        let run_id = claimed.ok_or(GametlError::JobAlreadyRunning)?;
        let _idle = IdleOnDrop {
            status: &self.status,
        };

        self.progress.write().await.begin_run(run_id);

        let started_at = Utc::now();
        tracing::info!("Job {} started on {}", run_id, file_path);

        let result = self
            .engine
            .start_translation(config, Path::new(file_path), run_id)
            .await;
        let finished_at = Utc::now();

        match result {
            Ok(report) => {
                tracing::info!(
                    "Job {} completed: {}/{} batches{}",
                    run_id,
                    report.completed_batches,
                    report.total_batches,
                    if report.cancelled { " (stopped)" } else { "" }
                );
                Ok(JobSummary {
                    run_id,
                    started_at,
                    finished_at,
                    report,
                })
            }
            Err(e) => {
                tracing::error!("Job {} failed: {}", run_id, e);
                Err(e)
            }
        }
    }

    /// Asks the engine to stop the running job and returns without waiting
    /// for it to wind down.
    pub async fn stop(&self) -> Result<()> {
        let run_id = self.status().run_id().ok_or(GametlError::JobNotRunning)?;
        tracing::info!("Stopping job {}", run_id);
        self.engine.stop_translation().await
    }
}

/// Returns the controller to `Idle` however the run ends.
struct IdleOnDrop<'a> {
    status: &'a watch::Sender<JobStatus>,
}

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.status.send_replace(JobStatus::Idle);
    }
}
