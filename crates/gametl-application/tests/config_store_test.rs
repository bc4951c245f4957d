mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use common::{MemoryCache, MemoryRepository};
use gametl_application::ConfigStore;
use gametl_core::config::{
    CONFIG_CACHE_KEY, ConfigField, KeyValueCache, OptionalParam, ParamName, TranslatorConfig,
};
use gametl_core::selection::FileSelection;
use gametl_infrastructure::{FileKeyValueCache, GametlPaths, JsonConfigRepository};

fn store(repo: &Arc<MemoryRepository>, cache: &Arc<MemoryCache>) -> ConfigStore {
    ConfigStore::new(repo.clone(), cache.clone())
}

#[tokio::test]
async fn test_load_defaults_when_nothing_stored() {
    let repo = Arc::new(MemoryRepository::default());
    let cache = Arc::new(MemoryCache::default());
    let store = store(&repo, &cache);

    assert_eq!(store.load().await, TranslatorConfig::default());

    // Loading restores state without persisting it
    store.flush().await;
    assert!(repo.saves().is_empty());
    assert_eq!(cache.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_load_prefers_durable_store() {
    let mut durable = TranslatorConfig::default();
    durable.model = "from-durable".to_string();
    let repo = Arc::new(MemoryRepository::with_stored(durable.clone()));
    let cache = Arc::new(MemoryCache::default());
    cache
        .set(CONFIG_CACHE_KEY, r#"{"model":"from-cache"}"#)
        .unwrap();

    let store = store(&repo, &cache);
    assert_eq!(store.load().await.model, "from-durable");
    assert_eq!(store.get(), durable);
}

#[tokio::test]
async fn test_durable_failure_falls_back_to_cache() {
    let repo = Arc::new(MemoryRepository::failing());
    let cache = Arc::new(MemoryCache::default());

    {
        let store = store(&repo, &cache);
        store.update(|config| config.threads = 5);
        store.update(|config| config.api_key = "sk-last".to_string());
        store.flush().await;
    }

    let store = store(&repo, &cache);
    let loaded = store.load().await;
    assert_eq!(loaded.threads, 5);
    assert_eq!(loaded.api_key, "sk-last");
    assert!(repo.saves().is_empty());
}

#[tokio::test]
async fn test_unreadable_cache_keeps_defaults() {
    let repo = Arc::new(MemoryRepository::failing());
    let cache = Arc::new(MemoryCache::default());
    cache.set(CONFIG_CACHE_KEY, "{broken").unwrap();

    let store = store(&repo, &cache);
    assert_eq!(store.load().await, TranslatorConfig::default());
}

#[tokio::test]
async fn test_every_mutation_saves_once_in_order() {
    let repo = Arc::new(MemoryRepository::default());
    let cache = Arc::new(MemoryCache::default());
    let store = store(&repo, &cache);

    for threads in 1..=5 {
        store.update(|config| config.threads = threads);
    }
    store.set_param_enabled(ParamName::TopK, false);
    store.flush().await;

    let saves = repo.saves();
    assert_eq!(saves.len(), 6);
    let threads: Vec<usize> = saves.iter().map(|c| c.threads).collect();
    assert_eq!(threads, vec![1, 2, 3, 4, 5, 5]);
    assert_eq!(saves.last().unwrap().top_k, OptionalParam::Disabled);
    assert_eq!(cache.writes.load(Ordering::SeqCst), 6);

    // The cache already holds the newest value
    let cached = TranslatorConfig::from_json(&cache.get(CONFIG_CACHE_KEY).unwrap()).unwrap();
    assert_eq!(cached, store.get());
}

#[tokio::test]
async fn test_failed_edit_changes_and_saves_nothing() {
    let repo = Arc::new(MemoryRepository::default());
    let cache = Arc::new(MemoryCache::default());
    let store = store(&repo, &cache);

    let err = store
        .try_update(|config| ConfigField::BatchSize.apply(config, "zero"))
        .unwrap_err();
    assert!(err.is_validation());

    let updated = store
        .try_update(|config| ConfigField::BatchSize.apply(config, "25"))
        .unwrap();
    assert_eq!(updated.batch_size, 25);

    store.flush().await;
    assert_eq!(repo.saves().len(), 1);
}

#[tokio::test]
async fn test_subscribers_observe_latest_value() {
    let repo = Arc::new(MemoryRepository::default());
    let cache = Arc::new(MemoryCache::default());
    let store = store(&repo, &cache);
    let mut updates = store.subscribe();

    store.update(|config| config.delay = 0.5);

    updates.changed().await.unwrap();
    assert_eq!(updates.borrow().delay, 0.5);
}

#[tokio::test]
async fn test_select_file() {
    let repo = Arc::new(MemoryRepository::default());
    let cache = Arc::new(MemoryCache::default());
    let store = store(&repo, &cache);

    assert!(store.select_file(&FileSelection::Selected("/data/lines.txt".into())));
    assert_eq!(store.get().last_file, "/data/lines.txt");

    assert!(!store.select_file(&FileSelection::Nothing));
    assert_eq!(store.get().last_file, "/data/lines.txt");

    store.flush().await;
    assert_eq!(repo.saves().len(), 1);
}

#[tokio::test]
async fn test_round_trip_through_files() {
    let home = tempfile::TempDir::new().unwrap();
    let paths = GametlPaths::under(home.path());
    let repo = Arc::new(JsonConfigRepository::new(paths.config_file()));
    let cache = Arc::new(FileKeyValueCache::new(paths.cache_dir()));

    let mut saved = TranslatorConfig::default();
    saved.model = "open-mistral-nemo".to_string();
    saved.temperature = OptionalParam::Disabled;
    {
        let store = ConfigStore::new(repo.clone(), cache.clone());
        store.set(saved.clone());
        store.flush().await;
    }

    let store = ConfigStore::new(repo, cache.clone());
    assert_eq!(store.load().await, saved);

    // The durable file going bad leaves the cache copy in charge
    std::fs::write(paths.config_file(), "{ torn").unwrap();
    assert_eq!(store.load().await, saved);
}
