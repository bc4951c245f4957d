//! Storage layer for atomic file operations.

mod atomic_json;
mod kv_cache;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use kv_cache::FileKeyValueCache;
