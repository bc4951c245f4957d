use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one engine worker. `0` is used for job-level status.
pub type WorkerId = usize;

/// Identifier of a single job run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// One progress/log emission from the translation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub thread_id: WorkerId,
    pub current: usize,
    /// `0` means the amount of work is not known yet.
    pub total: usize,
    #[serde(default)]
    pub message: String,
    /// Concatenate `message` directly instead of as a new status line.
    #[serde(default)]
    pub append: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<RunId>,
}

impl ProgressEvent {
    /// A discrete status line.
    pub fn status(
        thread_id: WorkerId,
        current: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            thread_id,
            current,
            total,
            message: message.into(),
            append: false,
            run_id: None,
        }
    }

    /// Text appended to the worker's log as-is (streamed output, retries).
    pub fn chunk(
        thread_id: WorkerId,
        current: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            append: true,
            ..Self::status(thread_id, current, total, message)
        }
    }

    /// A counter update that leaves the log alone.
    pub fn counters(thread_id: WorkerId, current: usize, total: usize) -> Self {
        Self::status(thread_id, current, total, String::new())
    }

    pub fn with_run(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }
}
