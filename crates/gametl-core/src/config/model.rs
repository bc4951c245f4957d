//! Translator configuration model.

use serde::{Deserialize, Serialize};

use super::param::{OptionalParam, ParamName};
use crate::error::{GametlError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";
pub const DEFAULT_MODEL: &str = "mistral-large-latest";
pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TOP_P: f64 = 1.0;
pub const DEFAULT_TOP_K: i32 = -1;
pub const DEFAULT_THREADS: usize = 1;
pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_DELAY_SECS: f64 = 1.3;

/// Built-in system prompt sent with every batch unless the operator edits it.
pub const DEFAULT_SYSTEM_PROMPT: &str = "# ROLE: Master of Game Localization (English to Vietnamese)

# CONTEXT: Game translation, Vietnamese language.

## 1. TRANSCREATION & STYLE (THE 'SMOOTH' FACTOR):
- TRANSLATE NATURALLY: DO NOT TRANSLATE WORD-FOR-WORD. Rewrite the sentence so that it sounds natural, like standard Vietnamese.
- EVOCATIVE PROSE: Use rich, sharp, and mysterious vocabulary fitting for a dying world. Avoid passive voice (e.g., 'Bị/Được') unless necessary.
- CONTEXTUAL ADAPTATION: If a sentence is an idiom or joke, replace it with a Vietnamese equivalent that carries the same vibe.

## 2. PRONOUNS & VIBE:
- Choose the appropriate personal pronoun depending on the context and gender.
- Character Voice: A child should sound innocent, a general should sound stern, and a villain should sound menacing.

## 3. FINAL EXECUTION:
Translate ALL lines, without omitting anything. Make the translation smooth, impressive, and engaging. Start now.";

/// The configuration handed to the translation engine for a job.
///
/// Deserialization is tolerant: any missing field keeps its default, which
/// is how a stored configuration gets merged over the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub temperature: OptionalParam<f64>,
    pub max_tokens: OptionalParam<u32>,
    pub top_p: OptionalParam<f64>,
    pub top_k: OptionalParam<i32>,
    pub stream: bool,
    pub threads: usize,
    pub batch_size: usize,
    /// Seconds between request starts, shared by all workers.
    pub delay: f64,
    /// Most recently selected input file; empty when none is selected.
    pub last_file: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: OptionalParam::Enabled(DEFAULT_TEMPERATURE),
            max_tokens: OptionalParam::Enabled(DEFAULT_MAX_TOKENS),
            top_p: OptionalParam::Enabled(DEFAULT_TOP_P),
            top_k: OptionalParam::Enabled(DEFAULT_TOP_K),
            stream: true,
            threads: DEFAULT_THREADS,
            batch_size: DEFAULT_BATCH_SIZE,
            delay: DEFAULT_DELAY_SECS,
            last_file: String::new(),
        }
    }
}

impl TranslatorConfig {
    /// Parses a stored JSON document, filling every missing field with its default.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Checks the worker-pool sizing and pacing bounds.
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(GametlError::validation("threads must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(GametlError::validation("batch_size must be at least 1"));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(GametlError::validation(
                "delay must be a non-negative number of seconds",
            ));
        }
        Ok(())
    }

    pub fn has_selected_file(&self) -> bool {
        !self.last_file.trim().is_empty()
    }

    /// Switches one optional sampling parameter on or off.
    pub fn set_param_enabled(&mut self, param: ParamName, enabled: bool) {
        match param {
            ParamName::Temperature => self.temperature = self.temperature.toggled(enabled),
            ParamName::MaxTokens => self.max_tokens = self.max_tokens.toggled(enabled),
            ParamName::TopP => self.top_p = self.top_p.toggled(enabled),
            ParamName::TopK => self.top_k = self.top_k.toggled(enabled),
        }
    }

    pub fn is_param_enabled(&self, param: ParamName) -> bool {
        match param {
            ParamName::Temperature => self.temperature.is_enabled(),
            ParamName::MaxTokens => self.max_tokens.is_enabled(),
            ParamName::TopP => self.top_p.is_enabled(),
            ParamName::TopK => self.top_k.is_enabled(),
        }
    }
}
