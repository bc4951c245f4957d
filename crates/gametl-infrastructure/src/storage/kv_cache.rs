//! File-backed key-value cache.

use std::path::PathBuf;

use gametl_core::config::KeyValueCache;
use gametl_core::{GametlError, Result};

use super::atomic_json::{FileLock, read_non_empty, write_atomic};

/// Stores each entry as `<dir>/<key>.json`, holding the raw value string.
///
/// Reads never fail: a missing or unreadable entry is reported as absent.
#[derive(Debug, Clone)]
pub struct FileKeyValueCache {
    dir: PathBuf,
}

impl FileKeyValueCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(GametlError::validation(format!(
                "invalid cache key: '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueCache for FileKeyValueCache {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key).ok()?;
        match read_non_empty(&path) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        let _lock = FileLock::acquire(&path)?;
        write_atomic(&path, value.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gametl_core::config::CONFIG_CACHE_KEY;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let cache = FileKeyValueCache::new(dir.path().to_path_buf());
        assert_eq!(cache.get(CONFIG_CACHE_KEY), None);
    }

    #[test]
    fn test_set_overwrites_whole_value() {
        let dir = TempDir::new().unwrap();
        let cache = FileKeyValueCache::new(dir.path().join("cache"));

        cache.set(CONFIG_CACHE_KEY, r#"{"threads":2}"#).unwrap();
        cache.set(CONFIG_CACHE_KEY, r#"{"threads":3}"#).unwrap();

        assert_eq!(
            cache.get(CONFIG_CACHE_KEY).as_deref(),
            Some(r#"{"threads":3}"#)
        );
        assert!(dir.path().join("cache/wuwa_config.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let cache = FileKeyValueCache::new(dir.path().to_path_buf());

        assert!(cache.set("../escape", "x").unwrap_err().is_validation());
        assert_eq!(cache.get("../escape"), None);
    }
}
