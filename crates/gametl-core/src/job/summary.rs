use chrono::{DateTime, Utc};
use serde::Serialize;

use super::engine::TranslationReport;
use crate::progress::RunId;

/// Notice shown to the operator when a job run resolves successfully.
pub const COMPLETION_NOTICE: &str = "Translation finished!";

/// Result of one successful `JobController::start` call.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub report: TranslationReport,
}

impl JobSummary {
    pub fn notice(&self) -> &'static str {
        COMPLETION_NOTICE
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
