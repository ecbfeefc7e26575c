//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Note that a marker missing from a trace is never an error: extraction
//! reports absence through the shape of its output.

use thiserror::Error;

/// Invalid extraction configuration (a programmer error, raised up front)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("App package id cannot be empty")]
    EmptyPackageId,

    #[error("Custom marker at position {0} has an empty name")]
    EmptyMarkerName(usize),

    #[error("Paired marker '{name}' has an empty {side} marker")]
    EmptyPairedSide { name: String, side: &'static str },

    #[error("Paired marker {start} -> {end} has an empty name")]
    EmptyPairedName { start: String, end: String },

    #[error("Invalid paired marker '{0}' (expected start:end:name)")]
    InvalidPairedSyntax(String),

    #[error("Failed to compile trace pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Failed to read marker config: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON marker config: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid TOML marker config: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Unsupported marker config format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
