//! Field-by-name access to [`TranslatorConfig`] for operator edits.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

use super::model::TranslatorConfig;
use super::param::OptionalParam;
use crate::error::{GametlError, Result};

/// Every editable configuration field, addressed by its stored name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ConfigField {
    BaseUrl,
    ApiKey,
    Model,
    SystemPrompt,
    Temperature,
    MaxTokens,
    TopP,
    TopK,
    Stream,
    Threads,
    BatchSize,
    Delay,
    LastFile,
}

impl ConfigField {
    /// Renders the field's current value.
    ///
    /// Disabled optional parameters render as `off`; the API key is masked.
    pub fn read(&self, config: &TranslatorConfig) -> String {
        match self {
            Self::BaseUrl => config.base_url.clone(),
            Self::ApiKey => mask_secret(&config.api_key),
            Self::Model => config.model.clone(),
            Self::SystemPrompt => config.system_prompt.clone(),
            Self::Temperature => render_param(config.temperature),
            Self::MaxTokens => render_param(config.max_tokens),
            Self::TopP => render_param(config.top_p),
            Self::TopK => render_param(config.top_k),
            Self::Stream => config.stream.to_string(),
            Self::Threads => config.threads.to_string(),
            Self::BatchSize => config.batch_size.to_string(),
            Self::Delay => config.delay.to_string(),
            Self::LastFile => config.last_file.clone(),
        }
    }

    /// Parses `raw` and writes it into `config`.
    ///
    /// The config is left untouched when parsing or validation fails.
    /// `off`/`null` disables an optional parameter.
    pub fn apply(&self, config: &mut TranslatorConfig, raw: &str) -> Result<()> {
        let mut next = config.clone();
        match self {
            Self::BaseUrl => next.base_url = raw.trim().to_string(),
            Self::ApiKey => next.api_key = raw.trim().to_string(),
            Self::Model => next.model = raw.trim().to_string(),
            Self::SystemPrompt => next.system_prompt = raw.to_string(),
            Self::Temperature => next.temperature = parse_param(self, raw)?,
            Self::MaxTokens => next.max_tokens = parse_param(self, raw)?,
            Self::TopP => next.top_p = parse_param(self, raw)?,
            Self::TopK => next.top_k = parse_param(self, raw)?,
            Self::Stream => next.stream = parse_value(self, raw)?,
            Self::Threads => next.threads = parse_value(self, raw)?,
            Self::BatchSize => next.batch_size = parse_value(self, raw)?,
            Self::Delay => next.delay = parse_value(self, raw)?,
            Self::LastFile => next.last_file = raw.trim().to_string(),
        }
        next.validate()?;
        *config = next;
        Ok(())
    }
}

fn parse_value<T: FromStr>(field: &ConfigField, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| GametlError::validation(format!("invalid value for {}: '{}'", field, raw)))
}

fn parse_param<T: FromStr>(field: &ConfigField, raw: &str) -> Result<OptionalParam<T>> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("off") || trimmed.eq_ignore_ascii_case("null") {
        return Ok(OptionalParam::Disabled);
    }
    parse_value(field, trimmed).map(OptionalParam::Enabled)
}

fn render_param<T: Copy + ToString>(param: OptionalParam<T>) -> String {
    param
        .value()
        .map(|value| value.to_string())
        .unwrap_or_else(|| "off".to_string())
}

fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let skip = secret.chars().count().saturating_sub(4);
    let tail: String = secret.chars().skip(skip).collect();
    format!("****{}", tail)
}
