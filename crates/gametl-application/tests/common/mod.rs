#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use gametl_core::catalog::ModelSource;
use gametl_core::config::{ConfigRepository, KeyValueCache, TranslatorConfig};
use gametl_core::job::{TranslationEngine, TranslationReport};
use gametl_application::SharedProgress;
use gametl_core::progress::{ProgressAggregator, ProgressEmitter, ProgressEvent, RunId};
use gametl_core::{GametlError, Result};
use tokio::sync::Notify;

/// Polls `progress` until `check` holds or two seconds pass.
pub async fn wait_until<F>(progress: &SharedProgress, check: F)
where
    F: Fn(&ProgressAggregator) -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        if check(&*progress.read().await) {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "progress condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    pub stored: Mutex<Option<TranslatorConfig>>,
    pub saves: Mutex<Vec<TranslatorConfig>>,
    pub fail_load: AtomicBool,
    pub fail_save: AtomicBool,
}

impl MemoryRepository {
    pub fn with_stored(config: TranslatorConfig) -> Self {
        let repo = Self::default();
        *repo.stored.lock().unwrap() = Some(config);
        repo
    }

    pub fn failing() -> Self {
        let repo = Self::default();
        repo.fail_load.store(true, Ordering::SeqCst);
        repo.fail_save.store(true, Ordering::SeqCst);
        repo
    }

    pub fn saves(&self) -> Vec<TranslatorConfig> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigRepository for MemoryRepository {
    async fn load(&self) -> Result<Option<TranslatorConfig>> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(GametlError::persistence("store offline"));
        }
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save(&self, config: &TranslatorConfig) -> Result<()> {
        // Yield so queued writes interleave with callers
        tokio::task::yield_now().await;
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(GametlError::persistence("store offline"));
        }
        self.saves.lock().unwrap().push(config.clone());
        *self.stored.lock().unwrap() = Some(config.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCache {
    pub entries: Mutex<HashMap<String, String>>,
    pub writes: AtomicUsize,
}

impl KeyValueCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct StaticModelSource {
    pub result: Result<Vec<String>>,
    pub calls: AtomicUsize,
}

impl StaticModelSource {
    pub fn ok(models: &[&str]) -> Self {
        Self {
            result: Ok(models.iter().map(|m| m.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn err(err: GametlError) -> Self {
        Self {
            result: Err(err),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ModelSource for StaticModelSource {
    async fn fetch_models(&self, _base_url: &str, _api_key: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Engine that emits one event per run and, when `hold` is set, blocks
/// until `stop_translation` or `finish` is called.
pub struct ScriptedEngine {
    emitter: std::sync::Arc<dyn ProgressEmitter>,
    hold: bool,
    failure: Option<GametlError>,
    release: Notify,
    stopped: AtomicBool,
    pub starts: AtomicUsize,
    pub stops: AtomicUsize,
}

impl ScriptedEngine {
    pub fn new(emitter: std::sync::Arc<dyn ProgressEmitter>) -> Self {
        Self {
            emitter,
            hold: false,
            failure: None,
            release: Notify::new(),
            stopped: AtomicBool::new(false),
            starts: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
        }
    }

    pub fn holding(mut self) -> Self {
        self.hold = true;
        self
    }

    pub fn failing_with(mut self, err: GametlError) -> Self {
        self.failure = Some(err);
        self
    }

    pub fn finish(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl TranslationEngine for ScriptedEngine {
    async fn start_translation(
        &self,
        _config: &TranslatorConfig,
        _file_path: &Path,
        run_id: RunId,
    ) -> Result<TranslationReport> {
        self.stopped.store(false, Ordering::SeqCst);
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.emitter
            .emit(ProgressEvent::status(1, 0, 1, format!("work of {}", run_id)).with_run(run_id));

        if self.hold {
            self.release.notified().await;
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let cancelled = self.stopped.load(Ordering::SeqCst);
        self.emitter
            .emit(ProgressEvent::counters(1, 1, 1).with_run(run_id));
        Ok(TranslationReport {
            total_batches: 1,
            completed_batches: if cancelled { 0 } else { 1 },
            cancelled,
            output_path: None,
        })
    }

    async fn stop_translation(&self) -> Result<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.stopped.store(true, Ordering::SeqCst);
        self.release.notify_one();
        Ok(())
    }
}
