use gametl_core::config::{ConfigRepository, OptionalParam, TranslatorConfig};
use gametl_infrastructure::{GametlPaths, JsonConfigRepository};
use tempfile::TempDir;

#[tokio::test]
async fn test_load_without_file_is_none() {
    let home = TempDir::new().unwrap();
    let paths = GametlPaths::under(home.path());
    let repo = JsonConfigRepository::new(paths.config_file());

    assert!(repo.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_then_load_round_trips() {
    let home = TempDir::new().unwrap();
    let paths = GametlPaths::under(home.path());
    let repo = JsonConfigRepository::new(paths.config_file());

    let mut config = TranslatorConfig::default();
    config.api_key = "sk-test".to_string();
    config.threads = 6;
    config.top_k = OptionalParam::Disabled;
    config.temperature = OptionalParam::Enabled(0.0);

    repo.save(&config).await.unwrap();

    assert_eq!(repo.load().await.unwrap(), Some(config));
}

#[tokio::test]
async fn test_partial_document_merges_over_defaults() {
    let home = TempDir::new().unwrap();
    let paths = GametlPaths::under(home.path());
    std::fs::create_dir_all(paths.config_dir()).unwrap();
    std::fs::write(paths.config_file(), r#"{ "model": "open-mistral-nemo" }"#).unwrap();

    let repo = JsonConfigRepository::new(paths.config_file());
    let loaded = repo.load().await.unwrap().unwrap();

    assert_eq!(loaded.model, "open-mistral-nemo");
    assert_eq!(loaded.batch_size, 50);
}

#[tokio::test]
async fn test_corrupt_document_is_persistence_error() {
    let home = TempDir::new().unwrap();
    let paths = GametlPaths::under(home.path());
    std::fs::create_dir_all(paths.config_dir()).unwrap();
    std::fs::write(paths.config_file(), "threads = 4").unwrap();

    let repo = JsonConfigRepository::new(paths.config_file());
    let err = repo.load().await.unwrap_err();
    assert!(err.is_persistence());
}
