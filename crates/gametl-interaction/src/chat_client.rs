//! Chat-completions client used for batch translation.

use futures::StreamExt;
use gametl_core::config::TranslatorConfig;
use gametl_core::{GametlError, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::http::{endpoint, map_status_error, map_transport_error};
use crate::sse::{SseData, SseLineBuffer, delta_content};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<i32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(config: &'a TranslatorConfig, prompt: &'a str) -> Self {
        Self {
            model: &config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &config.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            stream: config.stream,
            temperature: config.temperature.value(),
            max_tokens: config.max_tokens.value(),
            top_p: config.top_p.value(),
            top_k: config.top_k.value(),
        }
    }
}

/// Sends one prompt per call to `POST {base_url}/chat/completions`.
#[derive(Clone, Default)]
pub struct ChatClient {
    client: Client,
}

impl ChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Returns the full assistant message for `prompt`.
    ///
    /// With `config.stream` the response is read as server-sent events and
    /// every content delta is handed to `on_delta` as it arrives.
    pub async fn complete(
        &self,
        config: &TranslatorConfig,
        prompt: &str,
        on_delta: &mut (dyn FnMut(&str) + Send),
    ) -> Result<String> {
        let request = ChatCompletionRequest::new(config, prompt);

        let response = self
            .client
            .post(endpoint(&config.base_url, "chat/completions"))
            .header("Authorization", format!("Bearer {}", config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error("API Status", status, &body));
        }

        if config.stream {
            read_stream(response, on_delta).await
        } else {
            let json: Value = response.json().await.map_err(|e| {
                GametlError::connection(format!("Failed to parse completion: {}", e))
            })?;
            Ok(json["choices"][0]["message"]["content"]
                .as_str()
                .unwrap_or_default()
                .to_string())
        }
    }
}

async fn read_stream(
    response: reqwest::Response,
    on_delta: &mut (dyn FnMut(&str) + Send),
) -> Result<String> {
    let mut content = String::new();
    let mut buffer = SseLineBuffer::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_transport_error)?;
        for data in buffer.push(&chunk) {
            match data {
                SseData::Done => return Ok(content),
                SseData::Json(json) => {
                    if let Some(delta) = delta_content(&json) {
                        content.push_str(delta);
                        on_delta(delta);
                    }
                }
            }
        }
    }

    for data in buffer.finish() {
        match data {
            SseData::Done => break,
            SseData::Json(json) => {
                if let Some(delta) = delta_content(&json) {
                    content.push_str(delta);
                    on_delta(delta);
                }
            }
        }
    }
    Ok(content)
}
