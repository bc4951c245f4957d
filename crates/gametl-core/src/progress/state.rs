use serde::Serialize;

/// Record separator written before a status line.
pub const RECORD_SEPARATOR: &str = "\n";
/// Marker prefixed to every status line.
pub const STATUS_MARKER: &str = "> ";

/// Aggregated state of a single worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThreadState {
    pub current: usize,
    pub total: usize,
    pub log: String,
}

impl ThreadState {
    /// Completion of the current unit of work, rounded to a whole percent.
    ///
    /// Yields `0` while `total` is unknown and never exceeds `100`.
    pub fn percentage(&self) -> u8 {
        percentage(self.current, self.total)
    }

    pub(crate) fn append_chunk(&mut self, text: &str) {
        self.log.push_str(text);
    }

    pub(crate) fn append_status_line(&mut self, text: &str) {
        self.log.reserve(RECORD_SEPARATOR.len() + STATUS_MARKER.len() + text.len() + 1);
        self.log.push_str(RECORD_SEPARATOR);
        self.log.push_str(STATUS_MARKER);
        self.log.push_str(text);
        self.log.push('\n');
    }
}

/// `round(100 * current / total)`, or `0` when `total` is `0`.
pub fn percentage(current: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = (current as f64 * 100.0 / total as f64).round();
    ratio.clamp(0.0, 100.0) as u8
}
