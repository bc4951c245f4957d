//! Durable configuration store trait.

use async_trait::async_trait;

use super::model::TranslatorConfig;
use crate::error::Result;

/// The primary persistence backend for [`TranslatorConfig`].
///
/// Saving always replaces the whole stored object.
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Loads the stored configuration merged over defaults.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(config))`: A configuration was stored
    /// - `Ok(None)`: Nothing has been stored yet
    /// - `Err(GametlError)`: The store is unreadable or its content is corrupt
    async fn load(&self) -> Result<Option<TranslatorConfig>>;

    /// Replaces the stored configuration.
    async fn save(&self, config: &TranslatorConfig) -> Result<()>;
}
