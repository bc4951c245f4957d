//! Process-wide configuration with dual persistence.

use std::sync::Arc;

use gametl_core::Result;
use gametl_core::config::{
    CONFIG_CACHE_KEY, ConfigRepository, KeyValueCache, ParamName, TranslatorConfig,
};
use gametl_core::selection::FileSelection;
use tokio::sync::{mpsc, oneshot, watch};

enum PersistCommand {
    Save(TranslatorConfig),
    Flush(oneshot::Sender<()>),
}

/// Owns the single [`TranslatorConfig`] value.
///
/// Every mutation persists the whole value exactly once: the fallback cache
/// is written before the mutating call returns, the durable repository is
/// written by a background task in mutation order. Durable failures are
/// logged and never reach the caller.
pub struct ConfigStore {
    current: watch::Sender<TranslatorConfig>,
    cache: Arc<dyn KeyValueCache>,
    repository: Arc<dyn ConfigRepository>,
    writer: mpsc::UnboundedSender<PersistCommand>,
}

impl ConfigStore {
    /// Creates a store holding the defaults.
    ///
    /// Spawns the durable writer, so it must be called inside a tokio runtime.
    pub fn new(repository: Arc<dyn ConfigRepository>, cache: Arc<dyn KeyValueCache>) -> Self {
        let (writer, commands) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(Arc::clone(&repository), commands));

        let (current, _) = watch::channel(TranslatorConfig::default());
        Self {
            current,
            cache,
            repository,
            writer,
        }
    }

    /// Restores the configuration: durable store first, then the fallback
    /// cache, then defaults. Never fails and does not persist anything.
    pub async fn load(&self) -> TranslatorConfig {
        let loaded = match self.repository.load().await {
            Ok(Some(config)) => Some(config),
            Ok(None) => {
                tracing::debug!("No durable configuration found, trying cache");
                self.load_from_cache()
            }
            Err(e) => {
                tracing::warn!("Durable configuration unavailable, using cache: {}", e);
                self.load_from_cache()
            }
        };

        let config = loaded.unwrap_or_default();
        self.current.send_replace(config.clone());
        config
    }

    fn load_from_cache(&self) -> Option<TranslatorConfig> {
        let raw = self.cache.get(CONFIG_CACHE_KEY)?;
        match TranslatorConfig::from_json(&raw) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring unreadable cached configuration: {}", e);
                None
            }
        }
    }

    pub fn get(&self) -> TranslatorConfig {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TranslatorConfig> {
        self.current.subscribe()
    }

    /// Replaces the whole configuration.
    pub fn set(&self, config: TranslatorConfig) {
        self.current.send_modify(|current| {
            *current = config;
            self.persist(current);
        });
    }

    /// Mutates the configuration in place and returns the new value.
    pub fn update<F>(&self, f: F) -> TranslatorConfig
    where
        F: FnOnce(&mut TranslatorConfig),
    {
        self.current.send_modify(|current| {
            f(current);
            self.persist(current);
        });
        self.get()
    }

    /// Like [`update`](Self::update), but nothing changes or persists when
    /// `f` fails.
    pub fn try_update<F>(&self, f: F) -> Result<TranslatorConfig>
    where
        F: FnOnce(&mut TranslatorConfig) -> Result<()>,
    {
        let mut outcome = Ok(());
        self.current.send_if_modified(|current| {
            let mut next = current.clone();
            match f(&mut next) {
                Ok(()) => {
                    *current = next;
                    self.persist(current);
                    true
                }
                Err(e) => {
                    outcome = Err(e);
                    false
                }
            }
        });
        outcome.map(|()| self.get())
    }

    /// Applies `f` and persists only when it reports a change.
    pub fn update_if<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut TranslatorConfig) -> bool,
    {
        self.current.send_if_modified(|current| {
            let changed = f(current);
            if changed {
                self.persist(current);
            }
            changed
        })
    }

    /// Records a selected input file. `Nothing` leaves `last_file` unchanged.
    pub fn select_file(&self, selection: &FileSelection) -> bool {
        match selection.path() {
            Some(path) => {
                let path = path.to_string_lossy().into_owned();
                self.update(|config| config.last_file = path);
                true
            }
            None => false,
        }
    }

    pub fn set_param_enabled(&self, param: ParamName, enabled: bool) -> TranslatorConfig {
        self.update(|config| config.set_param_enabled(param, enabled))
    }

    /// Waits until every durable write queued so far has been attempted.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.writer.send(PersistCommand::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }

    /// Cache write now, durable write queued. Runs under the watch lock so
    /// the queue order matches the mutation order.
    fn persist(&self, config: &TranslatorConfig) {
        match config.to_json() {
            Ok(json) => {
                if let Err(e) = self.cache.set(CONFIG_CACHE_KEY, &json) {
                    tracing::warn!("Failed to write configuration cache: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize configuration: {}", e),
        }

        if self
            .writer
            .send(PersistCommand::Save(config.clone()))
            .is_err()
        {
            tracing::warn!("Configuration writer stopped, durable save skipped");
        }
    }
}

async fn run_writer(
    repository: Arc<dyn ConfigRepository>,
    mut commands: mpsc::UnboundedReceiver<PersistCommand>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            PersistCommand::Save(config) => {
                if let Err(e) = repository.save(&config).await {
                    tracing::warn!("Failed to save configuration: {}", e);
                }
            }
            PersistCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
