use super::event::ProgressEvent;

/// Outbound side of the `"progress"` event channel.
///
/// Emitting must never block the caller; events with nobody listening are
/// dropped.
pub trait ProgressEmitter: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}
