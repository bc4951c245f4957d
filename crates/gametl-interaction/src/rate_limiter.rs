//! Request pacing shared by every worker of the engine.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Spaces request start times at least `delay` apart across all callers.
///
/// Each caller reserves the next free start time under the lock and then
/// sleeps until then outside the lock, so waiting workers queue up in order.
#[derive(Debug, Default)]
pub struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for this caller's turn. `delay_secs <= 0` disables pacing.
    pub async fn wait(&self, delay_secs: f64) {
        if !delay_secs.is_finite() || delay_secs <= 0.0 {
            return;
        }
        let delay = Duration::from_secs_f64(delay_secs);

        let target = {
            let mut last = self.last_request.lock().await;
            let now = Instant::now();
            let target = match *last {
                Some(previous) if now < previous + delay => previous + delay,
                _ => now,
            };
            *last = Some(target);
            target
        };

        tokio::time::sleep_until(target).await;
    }
}
