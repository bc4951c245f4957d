mod common;

use std::sync::Arc;

use common::{MemoryCache, MemoryRepository, StaticModelSource};
use gametl_application::{ConfigStore, ModelCatalogService};
use gametl_core::GametlError;

fn config_store() -> (Arc<ConfigStore>, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::default());
    let store = ConfigStore::new(repo.clone(), Arc::new(MemoryCache::default()));
    (Arc::new(store), repo)
}

#[tokio::test]
async fn test_fetch_selects_first_model_when_none_selected() {
    let (config, repo) = config_store();
    config.update(|c| c.model.clear());
    let catalog = ModelCatalogService::new(
        Arc::new(StaticModelSource::ok(&["codestral-latest", "mistral-large-latest"])),
        config.clone(),
    );

    let models = catalog.fetch().await.unwrap();

    assert_eq!(models.len(), 2);
    assert_eq!(config.get().model, "codestral-latest");
    config.flush().await;
    assert_eq!(repo.saves().len(), 2);
}

#[tokio::test]
async fn test_fetch_never_overwrites_selection() {
    let (config, _) = config_store();
    let catalog = ModelCatalogService::new(
        Arc::new(StaticModelSource::ok(&["codestral-latest"])),
        config.clone(),
    );

    catalog.fetch().await.unwrap();

    assert_eq!(config.get().model, "mistral-large-latest");
}

#[tokio::test]
async fn test_empty_catalog_leaves_model_empty() {
    let (config, _) = config_store();
    config.update(|c| c.model.clear());
    let catalog = ModelCatalogService::new(Arc::new(StaticModelSource::ok(&[])), config.clone());

    assert!(catalog.fetch().await.unwrap().is_empty());
    assert_eq!(config.get().model, "");
}

#[tokio::test]
async fn test_fetch_error_is_surfaced_and_list_kept() {
    let (config, _) = config_store();
    let source = Arc::new(StaticModelSource::err(GametlError::connection(
        "Failed to fetch models: 404 Not Found",
    )));
    let catalog = ModelCatalogService::new(source.clone(), config);

    let err = catalog.fetch().await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to fetch models: 404 Not Found");
    assert!(catalog.models().await.is_empty());
    assert_eq!(source.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_live_filter_uses_model_field() {
    let (config, _) = config_store();
    let catalog = ModelCatalogService::new(
        Arc::new(StaticModelSource::ok(&[
            "MISTRAL-small",
            "gpt-4",
            "mistral-large-latest",
        ])),
        config.clone(),
    );
    catalog.fetch().await.unwrap();

    config.update(|c| c.model = "mis".to_string());
    assert_eq!(
        catalog.live_filter().await,
        vec!["MISTRAL-small", "mistral-large-latest"]
    );
    assert_eq!(catalog.filter("").await.len(), 3);
    assert!(catalog.filter("claude").await.is_empty());
}
