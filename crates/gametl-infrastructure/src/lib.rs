//! Filesystem-backed persistence for gametl.

pub mod config_repository;
pub mod paths;
pub mod storage;

pub use crate::config_repository::JsonConfigRepository;
pub use crate::paths::{GametlPaths, PathError};
pub use crate::storage::{AtomicJsonError, AtomicJsonFile, FileKeyValueCache};
