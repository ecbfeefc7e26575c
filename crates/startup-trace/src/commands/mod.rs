//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod models;
pub mod summarize;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, validate_args};
pub use models::{AnalyzeArgs, MarkerArgs, SummarizeArgs};
pub use summarize::execute_summarize;
pub use utils::{build_extraction_config, display_schema, display_version, validate_marker_config_file};
