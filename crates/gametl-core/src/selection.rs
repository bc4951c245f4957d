//! Input file selection boundary.

use std::path::{Path, PathBuf};

/// Extensions offered for selection.
pub const INPUT_EXTENSIONS: [&str; 2] = ["txt", "csv"];

/// Outcome of asking the operator for an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelection {
    Selected(PathBuf),
    Nothing,
}

impl FileSelection {
    /// Accepts `candidate` only when it has one of the offered extensions.
    pub fn from_candidate(candidate: Option<PathBuf>) -> Self {
        match candidate {
            Some(path) if is_supported_input(&path) => Self::Selected(path),
            _ => Self::Nothing,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Selected(path) => Some(path),
            Self::Nothing => None,
        }
    }
}

pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            INPUT_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}
