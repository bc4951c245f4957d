//! Model listing against an OpenAI-compatible endpoint.

use async_trait::async_trait;
use gametl_core::catalog::ModelSource;
use gametl_core::{GametlError, Result};
use reqwest::Client;
use serde_json::Value;

use crate::http::{endpoint, map_status_error, map_transport_error};

/// [`ModelSource`] that calls `GET {base_url}/models` with bearer auth.
#[derive(Clone, Default)]
pub struct OpenAiModelSource {
    client: Client,
}

impl OpenAiModelSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelSource for OpenAiModelSource {
    async fn fetch_models(&self, base_url: &str, api_key: &str) -> Result<Vec<String>> {
        let url = endpoint(base_url, "models");
        tracing::debug!("Fetching model list from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error("Failed to fetch models", status, &body));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| GametlError::connection(format!("Failed to parse model list: {}", e)))?;

        Ok(parse_model_list(&json))
    }
}

/// Extracts model ids from `{"data":[{"id":..}]}` or a bare `[{"id":..}]`.
///
/// Entries without a string `id` are skipped; the result is sorted.
pub fn parse_model_list(json: &Value) -> Vec<String> {
    let entries = match json.get("data") {
        Some(data) => data.as_array(),
        None => json.as_array(),
    };

    let mut models: Vec<String> = entries
        .into_iter()
        .flatten()
        .filter_map(|item| item.get("id").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    models.sort();
    models
}
