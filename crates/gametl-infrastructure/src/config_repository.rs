//! Durable configuration store backed by a JSON file.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use gametl_core::config::{ConfigRepository, TranslatorConfig};
use gametl_core::{GametlError, Result};

use crate::storage::AtomicJsonFile;

/// Keeps the [`TranslatorConfig`] in a single JSON document.
///
/// File IO runs on the blocking pool so callers on the async runtime are
/// never stalled by fsync.
#[derive(Clone)]
pub struct JsonConfigRepository {
    file: Arc<AtomicJsonFile<TranslatorConfig>>,
}

impl JsonConfigRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}

#[async_trait]
impl ConfigRepository for JsonConfigRepository {
    async fn load(&self) -> Result<Option<TranslatorConfig>> {
        let file = Arc::clone(&self.file);
        let loaded = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| GametlError::internal(format!("config load task failed: {}", e)))??;
        Ok(loaded)
    }

    async fn save(&self, config: &TranslatorConfig) -> Result<()> {
        let file = Arc::clone(&self.file);
        let config = config.clone();
        tokio::task::spawn_blocking(move || file.save(&config))
            .await
            .map_err(|e| GametlError::internal(format!("config save task failed: {}", e)))??;
        tracing::debug!("Saved configuration to {}", self.file.path().display());
        Ok(())
    }
}
