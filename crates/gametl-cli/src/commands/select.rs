use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use gametl_core::selection::{FileSelection, INPUT_EXTENSIONS};

use crate::app::AppState;

pub fn select(state: &AppState, path: PathBuf) -> Result<()> {
    let selection = selection_for(path);
    if state.config.select_file(&selection) {
        if let Some(path) = selection.path() {
            println!("Selected {}", path.display().to_string().green());
        }
    } else {
        println!(
            "Nothing selected (expected an existing .{} file).",
            INPUT_EXTENSIONS.join(" or .")
        );
    }
    Ok(())
}

/// Only existing files are offered, stored as absolute paths.
fn selection_for(path: PathBuf) -> FileSelection {
    let candidate = if path.is_file() {
        Some(std::fs::canonicalize(&path).unwrap_or(path))
    } else {
        None
    };
    FileSelection::from_candidate(candidate)
}
