pub mod catalog;
pub mod config;
pub mod error;
pub mod job;
pub mod progress;
pub mod selection;

// Re-export common error type
pub use error::{GametlError, Result};
