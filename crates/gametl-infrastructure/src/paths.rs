//! Unified path management for gametl files.
//!
//! Every file the application reads or writes is resolved here so the CLI,
//! the engine and the stores agree on locations across platforms.

use std::path::PathBuf;

const APP_DIR: &str = "gametl";

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const OUTPUT_FILE_NAME: &str = "tran.txt";
pub const TEMP_FILE_NAME: &str = "temp_translating.txt";
pub const THREAD_LOG_FILE_NAME: &str = "thread.txt";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// A platform directory could not be determined.
    DirNotFound(&'static str),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::DirNotFound(kind) => write!(f, "Cannot find {} directory", kind),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for gametl_core::GametlError {
    fn from(err: PathError) -> Self {
        gametl_core::GametlError::io(err.to_string())
    }
}

/// Resolved gametl directories.
///
/// # Directory Structure
///
/// ```text
/// <config_dir>/gametl/
/// └── config.json            # Durable configuration
///
/// <cache_dir>/gametl/
/// └── wuwa_config.json       # Fallback configuration cache
///
/// <data_dir>/gametl/
/// ├── tran.txt               # Finished translation
/// ├── temp_translating.txt   # Partial output, rewritten after every batch
/// ├── thread.txt             # Batch dispatch log
/// └── logs/
///     └── gametl.log.YYYY-MM-DD
/// ```
///
/// With a home override every directory lives under that one root instead:
/// `<home>/config`, `<home>/cache`, `<home>/data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GametlPaths {
    config_dir: PathBuf,
    cache_dir: PathBuf,
    data_dir: PathBuf,
}

impl GametlPaths {
    /// Resolves the platform directories, or places everything under `home`.
    pub fn new(home: Option<PathBuf>) -> Result<Self, PathError> {
        match home {
            Some(home) => Ok(Self::under(home)),
            None => Ok(Self {
                config_dir: dirs::config_dir()
                    .ok_or(PathError::DirNotFound("config"))?
                    .join(APP_DIR),
                cache_dir: dirs::cache_dir()
                    .ok_or(PathError::DirNotFound("cache"))?
                    .join(APP_DIR),
                data_dir: dirs::data_dir()
                    .ok_or(PathError::DirNotFound("data"))?
                    .join(APP_DIR),
            }),
        }
    }

    /// All directories under a single root.
    pub fn under(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            config_dir: home.join("config"),
            cache_dir: home.join("cache"),
            data_dir: home.join("data"),
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone()
    }

    /// Directory holding the engine's work files.
    pub fn work_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn output_file(&self) -> PathBuf {
        self.data_dir.join(OUTPUT_FILE_NAME)
    }

    pub fn temp_file(&self) -> PathBuf {
        self.data_dir.join(TEMP_FILE_NAME)
    }

    pub fn thread_log_file(&self) -> PathBuf {
        self.data_dir.join(THREAD_LOG_FILE_NAME)
    }
}
