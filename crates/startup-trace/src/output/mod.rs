//! Output writers for run and summary reports.
//!
//! This module handles writing data to disk in various formats:
//! - JSON run and summary reports
//! - Fixed-format text reports
//! - Colored terminal summaries

pub mod json;
pub mod terminal;
pub mod text;

// Re-export main functions
pub use json::{read_run_report, read_summary_report, write_run_report, write_summary_report};
pub use terminal::render_terminal_summary;
pub use text::{render_run_report, render_summary_report, write_text};

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create the parent directories of `path` if they are missing
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
