use std::sync::Arc;

use gametl_application::{
    ConfigStore, JobController, ModelCatalogService, SharedProgress, Subscription,
};
use gametl_infrastructure::GametlPaths;
use gametl_interaction::BatchTranslationEngine;

/// Services shared by every command.
pub struct AppState {
    pub paths: GametlPaths,
    pub config: Arc<ConfigStore>,
    pub catalog: Arc<ModelCatalogService>,
    pub progress: SharedProgress,
    pub engine: Arc<BatchTranslationEngine>,
    pub jobs: Arc<JobController>,
    /// Keeps `progress` fed from the engine's event channel.
    pub _progress_feed: Subscription,
}
