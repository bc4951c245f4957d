use std::sync::Arc;

use gametl_application::{
    ConfigStore, JobController, ModelCatalogService, ProgressHub, SharedProgress,
};
use gametl_core::catalog::ModelSource;
use gametl_core::config::{ConfigRepository, KeyValueCache};
use gametl_core::job::TranslationEngine;
use gametl_infrastructure::{FileKeyValueCache, GametlPaths, JsonConfigRepository};
use gametl_interaction::{BatchTranslationEngine, OpenAiModelSource, WorkFiles};

use crate::app::AppState;

/// Composition root: wires the concrete stores, clients and engine into the
/// application services and restores the saved configuration.
pub async fn bootstrap(paths: GametlPaths) -> AppState {
    let repository: Arc<dyn ConfigRepository> =
        Arc::new(JsonConfigRepository::new(paths.config_file()));
    let cache: Arc<dyn KeyValueCache> = Arc::new(FileKeyValueCache::new(paths.cache_dir()));

    let config = Arc::new(ConfigStore::new(repository, cache));
    let loaded = config.load().await;
    tracing::info!(
        "[Bootstrap] Configuration loaded (model: {}, threads: {})",
        loaded.model,
        loaded.threads
    );

    let hub = ProgressHub::new();
    let progress: SharedProgress = Arc::default();

    let engine = Arc::new(BatchTranslationEngine::new(
        Arc::new(hub.clone()),
        WorkFiles::from_paths(&paths),
    ));
    let engine_port: Arc<dyn TranslationEngine> = engine.clone();
    let jobs = Arc::new(JobController::new(engine_port, Arc::clone(&progress)));

    let progress_feed = hub.attach(Arc::clone(&progress));

    let model_source: Arc<dyn ModelSource> = Arc::new(OpenAiModelSource::new());
    let catalog = Arc::new(ModelCatalogService::new(model_source, Arc::clone(&config)));

    AppState {
        paths,
        config,
        catalog,
        progress,
        engine,
        jobs,
        _progress_feed: progress_feed,
    }
}
