use async_trait::async_trait;

use crate::error::Result;

/// The engine's model-listing endpoint.
#[async_trait]
pub trait ModelSource: Send + Sync {
    /// Fetches the available model ids in a single round-trip.
    ///
    /// # Errors
    ///
    /// - `GametlError::Auth` when the credentials are rejected
    /// - `GametlError::Connection` for every other failure, carrying the
    ///   underlying message
    async fn fetch_models(&self, base_url: &str, api_key: &str) -> Result<Vec<String>>;
}
