use serde::Serialize;

use crate::progress::RunId;

/// Lifecycle state of the job controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Idle,
    Running { run_id: RunId },
}

impl JobStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    pub fn run_id(&self) -> Option<RunId> {
        match self {
            Self::Idle => None,
            Self::Running { run_id } => Some(*run_id),
        }
    }
}
