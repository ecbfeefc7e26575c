//! JSON report output.
//!
//! Writes run reports and summary reports to JSON files with pretty
//! formatting, and reads them back for the summarize command.

use crate::aggregator::schema::SummaryReport;
use crate::parser::schema::RunReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a single iteration's run report
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_run_report(report: &RunReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_json(report, output_path.as_ref())
}

/// Write the cross-run summary report
pub fn write_summary_report(
    report: &SummaryReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_json(report, output_path.as_ref())
}

/// Read a run report from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_run_report(input_path: impl AsRef<Path>) -> Result<RunReport, OutputError> {
    let report: RunReport = read_json(input_path.as_ref())?;

    debug!(
        "Run report loaded: version {}, iteration {}, {} metrics",
        report.version,
        report.iteration,
        report.metrics.len()
    );

    Ok(report)
}

/// Read a summary report from a JSON file
pub fn read_summary_report(input_path: impl AsRef<Path>) -> Result<SummaryReport, OutputError> {
    read_json(input_path.as_ref())
}

fn write_json<T: Serialize>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    info!("Writing JSON report to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(OutputError::SerializationFailed)?;

    debug!(
        "JSON report written ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

fn read_json<T: DeserializeOwned>(input_path: &Path) -> Result<T, OutputError> {
    debug!("Reading JSON report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    serde_json::from_reader(file).map_err(OutputError::SerializationFailed)
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
