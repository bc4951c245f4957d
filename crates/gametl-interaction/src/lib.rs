//! Engine-side interaction with an OpenAI-compatible endpoint.
//!
//! - `model_client`: `GET /models` listing ([`OpenAiModelSource`])
//! - `chat_client`: `POST /chat/completions`, plain and SSE-streamed
//! - `line_format`: the `ID:::text` record format
//! - `rate_limiter`: request pacing shared by all workers
//! - `engine`: the batch worker pool ([`BatchTranslationEngine`])

pub mod chat_client;
pub mod engine;
mod http;
pub mod line_format;
pub mod model_client;
pub mod rate_limiter;
mod sse;

pub use chat_client::ChatClient;
pub use engine::{BatchTranslationEngine, WorkFiles};
pub use model_client::{OpenAiModelSource, parse_model_list};
pub use rate_limiter::RateLimiter;
