//! Progress domain module.
//!
//! - `event`: Engine emissions (`ProgressEvent`, `RunId`)
//! - `state`: Derived per-worker state (`ThreadState`)
//! - `aggregator`: Per-worker merge rules (`ProgressAggregator`)
//! - `emitter`: Engine-side channel trait (`ProgressEmitter`)

mod aggregator;
mod emitter;
mod event;
mod state;

pub use aggregator::ProgressAggregator;
pub use emitter::ProgressEmitter;
pub use event::{ProgressEvent, RunId, WorkerId};
pub use state::{RECORD_SEPARATOR, STATUS_MARKER, ThreadState, percentage};

/// Name of the event channel progress is published on.
pub const PROGRESS_CHANNEL: &str = "progress";
