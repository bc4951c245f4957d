//! Translator configuration domain module.
//!
//! - `model`: The configuration record and its defaults (`TranslatorConfig`)
//! - `param`: Optional sampling parameters (`OptionalParam`, `ParamName`)
//! - `field`: Field-by-name edits (`ConfigField`)
//! - `repository`: Durable store trait (`ConfigRepository`)
//! - `cache`: Fallback cache trait (`KeyValueCache`)

mod cache;
mod field;
mod model;
mod param;
mod repository;

pub use cache::{CONFIG_CACHE_KEY, KeyValueCache};
pub use field::ConfigField;
pub use model::{
    DEFAULT_BASE_URL, DEFAULT_BATCH_SIZE, DEFAULT_DELAY_SECS, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE, DEFAULT_THREADS, DEFAULT_TOP_K, DEFAULT_TOP_P,
    TranslatorConfig,
};
pub use param::{OptionalParam, ParamName, ToggleDefault};
pub use repository::ConfigRepository;
