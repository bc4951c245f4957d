//! Translation engine boundary.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;

use crate::config::TranslatorConfig;
use crate::error::Result;
use crate::progress::RunId;

/// What the engine reports when a job run completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationReport {
    pub total_batches: usize,
    pub completed_batches: usize,
    /// The run ended because of `stop_translation`.
    pub cancelled: bool,
    /// Where the translated file was written; `None` when cancelled.
    pub output_path: Option<PathBuf>,
}

/// The external worker pool that performs the translation.
///
/// Progress is published through the engine's [`ProgressEmitter`](crate::progress::ProgressEmitter),
/// tagged with the `run_id` passed to `start_translation`.
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    /// Registers `run_id` as the next run. Called before the job is reported
    /// as running, so a stop arriving before `start_translation` still
    /// cancels that run.
    fn prepare_run(&self, _run_id: RunId) {}

    /// Runs one job to completion (or cancellation).
    async fn start_translation(
        &self,
        config: &TranslatorConfig,
        file_path: &Path,
        run_id: RunId,
    ) -> Result<TranslationReport>;

    /// Signals the running job to stop. Returns without waiting for it.
    async fn stop_translation(&self) -> Result<()>;
}
