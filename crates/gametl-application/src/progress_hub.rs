//! The `"progress"` event channel between the engine and the aggregator.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use gametl_core::progress::{PROGRESS_CHANNEL, ProgressAggregator, ProgressEmitter, ProgressEvent};
use tokio::sync::{RwLock, mpsc};
use tokio_util::sync::CancellationToken;

/// Aggregator shared between the event pump and readers.
pub type SharedProgress = Arc<RwLock<ProgressAggregator>>;

#[derive(Default)]
struct HubState {
    sender: Option<mpsc::UnboundedSender<ProgressEvent>>,
    token: Option<CancellationToken>,
    generation: u64,
}

/// Engine-facing emitter with at most one active subscription.
///
/// `emit` never blocks: events go into an unbounded channel drained by the
/// subscription's pump task, one event at a time, in emission order.
/// Events emitted while nobody is subscribed are dropped.
#[derive(Clone, Default)]
pub struct ProgressHub {
    state: Arc<Mutex<HubState>>,
}

impl ProgressHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes every subsequent event to `handler`, tearing down the
    /// previous subscription first.
    ///
    /// Must be called inside a tokio runtime.
    pub fn subscribe<H, Fut>(&self, mut handler: H) -> Subscription
    where
        H: FnMut(ProgressEvent) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (sender, mut events) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        let generation = {
            let mut state = lock(&self.state);
            if let Some(previous) = state.token.take() {
                previous.cancel();
            }
            state.generation += 1;
            state.sender = Some(sender);
            state.token = Some(token.clone());
            state.generation
        };
        tracing::debug!("Subscribed to {} (generation {})", PROGRESS_CHANNEL, generation);

        let pump_token = token.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = pump_token.cancelled() => break,
                    event = events.recv() => match event {
                        Some(event) => handler(event).await,
                        None => break,
                    },
                }
            }
        });

        Subscription {
            state: Arc::clone(&self.state),
            token,
            generation,
        }
    }

    /// Subscribes `progress` so every event is merged into it.
    pub fn attach(&self, progress: SharedProgress) -> Subscription {
        self.subscribe(move |event| {
            let progress = Arc::clone(&progress);
            async move {
                progress.write().await.apply(&event);
            }
        })
    }

    pub fn is_subscribed(&self) -> bool {
        lock(&self.state).sender.is_some()
    }
}

impl ProgressEmitter for ProgressHub {
    fn emit(&self, event: ProgressEvent) {
        let state = lock(&self.state);
        match &state.sender {
            Some(sender) => {
                if sender.send(event).is_err() {
                    tracing::trace!("{} pump is gone, event dropped", PROGRESS_CHANNEL);
                }
            }
            None => tracing::trace!("No {} subscriber, event dropped", PROGRESS_CHANNEL),
        }
    }
}

/// Handle of the active subscription; dropping it unsubscribes.
pub struct Subscription {
    state: Arc<Mutex<HubState>>,
    token: CancellationToken,
    generation: u64,
}

impl Subscription {
    pub fn cancel(&self) {
        self.token.cancel();
        let mut state = lock(&self.state);
        // A newer subscription owns the hub now
        if state.generation == self.generation {
            state.sender = None;
            state.token = None;
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock(state: &Mutex<HubState>) -> MutexGuard<'_, HubState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_events_reach_aggregator_in_order() {
        let hub = ProgressHub::new();
        let progress: SharedProgress = Arc::default();
        let _subscription = hub.attach(Arc::clone(&progress));

        hub.emit(ProgressEvent::status(1, 0, 2, "A"));
        hub.emit(ProgressEvent::chunk(1, 1, 2, "B"));
        settle().await;

        let progress = progress.read().await;
        assert_eq!(progress.log(1), "\n> A\nB");
        assert_eq!(progress.percentage(1), 50);
    }

    #[tokio::test]
    async fn test_new_subscription_replaces_previous() {
        let hub = ProgressHub::new();
        let first: SharedProgress = Arc::default();
        let second: SharedProgress = Arc::default();

        let old = hub.attach(Arc::clone(&first));
        let _new = hub.attach(Arc::clone(&second));
        assert!(old.is_cancelled());

        hub.emit(ProgressEvent::status(3, 1, 1, "only second"));
        settle().await;

        assert!(first.read().await.is_empty());
        assert_eq!(second.read().await.len(), 1);

        // Dropping the stale handle must not detach the new one
        drop(old);
        assert!(hub.is_subscribed());
    }

    #[tokio::test]
    async fn test_drop_unsubscribes() {
        let hub = ProgressHub::new();
        let progress: SharedProgress = Arc::default();

        let subscription = hub.attach(Arc::clone(&progress));
        drop(subscription);
        assert!(!hub.is_subscribed());

        hub.emit(ProgressEvent::status(1, 0, 1, "lost"));
        settle().await;
        assert!(progress.read().await.is_empty());
    }
}
