//! Model catalog with the auto-select rule.

use std::sync::Arc;

use gametl_core::Result;
use gametl_core::catalog::{ModelSource, filter_models};
use tokio::sync::RwLock;

use crate::config_store::ConfigStore;

/// Fetches model ids for the configured endpoint and keeps the last list.
pub struct ModelCatalogService {
    source: Arc<dyn ModelSource>,
    config: Arc<ConfigStore>,
    models: RwLock<Vec<String>>,
}

impl ModelCatalogService {
    pub fn new(source: Arc<dyn ModelSource>, config: Arc<ConfigStore>) -> Self {
        Self {
            source,
            config,
            models: RwLock::new(Vec::new()),
        }
    }

    /// One round-trip to the endpoint named by the current configuration.
    ///
    /// On success the list replaces the cached one and, when no model is
    /// selected yet, its first entry becomes the selection. On failure the
    /// cached list is kept and the error is returned as-is.
    pub async fn fetch(&self) -> Result<Vec<String>> {
        let config = self.config.get();
        let models = match self
            .source
            .fetch_models(&config.base_url, &config.api_key)
            .await
        {
            Ok(models) => models,
            Err(e) => {
                tracing::warn!("Model fetch from {} failed: {}", config.base_url, e);
                return Err(e);
            }
        };

        tracing::info!("Fetched {} models from {}", models.len(), config.base_url);
        *self.models.write().await = models.clone();

        if let Some(first) = models.first() {
            let selected = self.config.update_if(|config| {
                if config.model.is_empty() {
                    config.model = first.clone();
                    true
                } else {
                    false
                }
            });
            if selected {
                tracing::info!("Selected model {}", first);
            }
        }
        Ok(models)
    }

    /// The last successfully fetched list.
    pub async fn models(&self) -> Vec<String> {
        self.models.read().await.clone()
    }

    pub async fn filter(&self, query: &str) -> Vec<String> {
        filter_models(query, &self.models.read().await)
    }

    /// Filters by the text currently in the `model` field.
    pub async fn live_filter(&self) -> Vec<String> {
        let query = self.config.get().model;
        self.filter(&query).await
    }
}
