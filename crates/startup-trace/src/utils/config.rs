//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Trace timestamps above this value are taken to be microseconds, not seconds
pub const MICROSECOND_THRESHOLD: f64 = 1_000_000.0;
pub const MICROSECONDS_PER_SECOND: f64 = 1_000_000.0;

/// Decimal places kept for every timestamp, offset and statistic
pub const METRIC_PRECISION: i32 = 3;

// Report file names written by the analyze command
pub const RUN_REPORT_TEXT: &str = "report.txt";
pub const RUN_REPORT_JSON: &str = "report.json";
pub const SUMMARY_REPORT_TEXT: &str = "summary_report.txt";
pub const SUMMARY_REPORT_JSON: &str = "summary.json";

/// Directory name for a single iteration's reports (1-based)
pub fn iteration_dir_name(iteration: usize) -> String {
    format!("iteration_{}", iteration)
}

// Environment variables read by the CLI (also loadable from .env)
pub const ENV_PACKAGE: &str = "STARTUP_TRACE_PACKAGE";
pub const ENV_MARKERS: &str = "STARTUP_TRACE_MARKERS";
pub const ENV_MARKER_CONFIG: &str = "STARTUP_TRACE_MARKER_CONFIG";

/// Separator for `start:end:name` paired marker arguments
pub const PAIRED_MARKER_SEPARATOR: char = ':';
