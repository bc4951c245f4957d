//! Per-worker merge of engine progress events.

use std::collections::BTreeMap;

use super::event::{ProgressEvent, RunId, WorkerId};
use super::state::ThreadState;

/// Authoritative per-worker progress and log state for the current job run.
///
/// Every worker id is tracked independently: counters are replaced by the
/// most recent event (no monotonicity is enforced, engine-side progress can
/// restart within a batch) and non-empty messages are merged into the log.
#[derive(Debug, Default, Clone)]
pub struct ProgressAggregator {
    threads: BTreeMap<WorkerId, ThreadState>,
    active_run: Option<RunId>,
}

impl ProgressAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all per-worker state.
    pub fn reset(&mut self) {
        self.threads.clear();
    }

    /// Clears all per-worker state and starts accepting events of `run_id`.
    ///
    /// Tagged events from any other run are discarded from now on.
    pub fn begin_run(&mut self, run_id: RunId) {
        self.reset();
        self.active_run = Some(run_id);
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.active_run
    }

    /// Merges one event. Returns `false` when the event belongs to another run.
    pub fn apply(&mut self, event: &ProgressEvent) -> bool {
        if let (Some(event_run), Some(active)) = (event.run_id, self.active_run) {
            if event_run != active {
                tracing::debug!(
                    "Discarding progress event of {} for thread {} (active: {})",
                    event_run,
                    event.thread_id,
                    active
                );
                return false;
            }
        }

        let state = self.threads.entry(event.thread_id).or_default();
        state.current = event.current;
        state.total = event.total;

        if !event.message.is_empty() {
            if event.append {
                state.append_chunk(&event.message);
            } else {
                state.append_status_line(&event.message);
            }
        }
        true
    }

    /// Percentage for `thread_id`; `0` for workers not seen yet.
    pub fn percentage(&self, thread_id: WorkerId) -> u8 {
        self.threads
            .get(&thread_id)
            .map(ThreadState::percentage)
            .unwrap_or(0)
    }

    pub fn thread(&self, thread_id: WorkerId) -> Option<&ThreadState> {
        self.threads.get(&thread_id)
    }

    /// Accumulated log for `thread_id`; empty for workers not seen yet.
    pub fn log(&self, thread_id: WorkerId) -> &str {
        self.threads
            .get(&thread_id)
            .map(|state| state.log.as_str())
            .unwrap_or("")
    }

    /// All workers seen in this run, in ascending id order.
    pub fn threads(&self) -> impl Iterator<Item = (WorkerId, &ThreadState)> {
        self.threads.iter().map(|(id, state)| (*id, state))
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_last_write_wins() {
        let mut aggregator = ProgressAggregator::new();

        aggregator.apply(&ProgressEvent::counters(3, 40, 50));
        aggregator.apply(&ProgressEvent::counters(3, 10, 50));

        let state = aggregator.thread(3).unwrap();
        assert_eq!(state.current, 10);
        assert_eq!(state.total, 50);
        assert_eq!(aggregator.percentage(3), 20);
    }

    #[test]
    fn test_status_then_chunk_log_format() {
        let mut aggregator = ProgressAggregator::new();

        aggregator.apply(&ProgressEvent::status(1, 0, 10, "A"));
        aggregator.apply(&ProgressEvent::chunk(1, 0, 10, "B"));

        assert_eq!(aggregator.log(1), "\n> A\nB");
    }

    #[test]
    fn test_empty_message_only_updates_counters() {
        let mut aggregator = ProgressAggregator::new();

        aggregator.apply(&ProgressEvent::status(2, 0, 4, "Processing 1-4"));
        aggregator.apply(&ProgressEvent::counters(2, 4, 4));
        aggregator.apply(&ProgressEvent::chunk(2, 4, 4, ""));

        assert_eq!(aggregator.log(2), "\n> Processing 1-4\n");
        assert_eq!(aggregator.percentage(2), 100);
    }

    #[test]
    fn test_threads_are_independent() {
        let mut aggregator = ProgressAggregator::new();

        aggregator.apply(&ProgressEvent::chunk(7, 1, 2, "seven"));
        aggregator.apply(&ProgressEvent::chunk(0, 5, 9, "zero"));
        aggregator.apply(&ProgressEvent::chunk(7, 2, 2, "!"));

        assert_eq!(aggregator.log(7), "seven!");
        assert_eq!(aggregator.log(0), "zero");
        assert_eq!(aggregator.percentage(0), 56);

        let ids: Vec<WorkerId> = aggregator.threads().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 7]);
    }

    #[test]
    fn test_percentage_edges() {
        let mut aggregator = ProgressAggregator::new();
        assert_eq!(aggregator.percentage(42), 0);

        aggregator.apply(&ProgressEvent::counters(1, 25, 50));
        assert_eq!(aggregator.percentage(1), 50);

        aggregator.apply(&ProgressEvent::counters(1, 0, 10));
        assert_eq!(aggregator.percentage(1), 0);

        aggregator.apply(&ProgressEvent::counters(1, 10, 10));
        assert_eq!(aggregator.percentage(1), 100);

        aggregator.apply(&ProgressEvent::counters(1, 7, 0));
        assert_eq!(aggregator.percentage(1), 0);
    }

    #[test]
    fn test_reset_clears_previous_logs() {
        let mut aggregator = ProgressAggregator::new();
        aggregator.apply(&ProgressEvent::chunk(1, 0, 1, "old log text"));

        aggregator.begin_run(RunId(2));
        assert!(aggregator.is_empty());
        assert_eq!(aggregator.log(1), "");

        aggregator.apply(&ProgressEvent::chunk(1, 0, 1, "new").with_run(RunId(2)));
        assert_eq!(aggregator.log(1), "new");
    }

    #[test]
    fn test_events_from_other_runs_are_discarded() {
        let mut aggregator = ProgressAggregator::new();
        aggregator.begin_run(RunId(5));

        let stale = ProgressEvent::status(1, 3, 3, "Done.").with_run(RunId(4));
        assert!(!aggregator.apply(&stale));
        assert!(aggregator.thread(1).is_none());

        let untagged = ProgressEvent::status(1, 0, 3, "external");
        assert!(aggregator.apply(&untagged));
        assert_eq!(aggregator.len(), 1);
    }
}
