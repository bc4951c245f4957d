//! Job lifecycle domain module.

mod engine;
mod state;
mod summary;

pub use engine::{TranslationEngine, TranslationReport};
pub use state::JobStatus;
pub use summary::{COMPLETION_NOTICE, JobSummary};
