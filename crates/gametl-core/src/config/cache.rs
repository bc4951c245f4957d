//! Fallback key-value cache trait.

use crate::error::Result;

/// Namespace key under which the serialized configuration is cached.
pub const CONFIG_CACHE_KEY: &str = "wuwa_config";

/// A small, always-available string store used when the durable
/// configuration store is unreachable.
///
/// Operations are synchronous; implementations must be fast enough to call
/// on every configuration edit.
pub trait KeyValueCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}
