//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Resolves the marker configuration
//! 2. Extracts a metric set from every trace (one trace per iteration)
//! 3. Writes per-iteration text and JSON reports
//! 4. Aggregates all metric sets into a cross-run summary
//! 5. Writes the summary reports

use crate::aggregator::{SummaryAggregator, SummaryReport};
use crate::commands::models::AnalyzeArgs;
use crate::commands::utils::build_extraction_config;
use crate::output::{
    render_run_report, render_summary_report, render_terminal_summary, write_run_report,
    write_summary_report, write_text,
};
use crate::parser::schema::{ExtractionConfig, MetricSet, RunReport};
use crate::parser::TraceMetricExtractor;
use crate::utils::config::{
    iteration_dir_name, RUN_REPORT_JSON, RUN_REPORT_TEXT, SCHEMA_VERSION, SUMMARY_REPORT_JSON,
    SUMMARY_REPORT_TEXT,
};
use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Analyze command arguments
///
/// # Returns
/// The cross-run summary, after every report has been written
///
/// # Errors
/// * Invalid marker configuration
/// * Unreadable trace files
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<SummaryReport> {
    let start_time = Instant::now();

    let config = build_extraction_config(&args.marker_args, None)?;
    info!(
        "Analyzing {} trace(s) for package: {}",
        args.traces.len(),
        config.package_id
    );

    let extractor =
        TraceMetricExtractor::new(config.clone()).context("Failed to compile trace patterns")?;

    let mut runs: Vec<MetricSet> = Vec::with_capacity(args.traces.len());

    for (index, trace_path) in args.traces.iter().enumerate() {
        let iteration = index + 1;
        info!("Iteration {}: {}", iteration, trace_path.display());

        let metrics = extract_trace(&extractor, trace_path)?;
        if metrics.is_empty() {
            warn!(
                "No startup metrics found in {}",
                trace_path.display()
            );
        } else {
            debug!("Iteration {} produced {} metrics", iteration, metrics.len());
        }

        let report = RunReport {
            version: SCHEMA_VERSION.to_string(),
            package_id: config.package_id.clone(),
            iteration,
            source: Some(trace_path.display().to_string()),
            metrics,
            generated_at: Utc::now().to_rfc3339(),
        };

        write_iteration_outputs(&args.output_dir, &report, &config)?;
        runs.push(report.metrics);
    }

    info!("Aggregating {} run(s)...", runs.len());
    let summary = SummaryAggregator::new(config).aggregate(&runs);

    if summary.runs_with_metrics == 0 {
        warn!("No trace produced any startup metric; check the package id and trace format");
    }

    write_summary_outputs(&args.output_dir, &summary)?;

    if args.print_summary {
        println!("{}", render_terminal_summary(&summary));
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(summary)
}

/// Read one trace dump and extract its metrics
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
fn extract_trace(extractor: &TraceMetricExtractor, trace_path: &Path) -> Result<MetricSet> {
    let bytes = fs::read(trace_path)
        .with_context(|| format!("Failed to read trace {}", trace_path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(extractor.extract(&text))
}

/// Write `iteration_N/report.txt` and `iteration_N/report.json`.
///
/// **Private** - internal helper for execute_analyze
fn write_iteration_outputs(
    output_dir: &Path,
    report: &RunReport,
    config: &ExtractionConfig,
) -> Result<()> {
    let dir = output_dir.join(iteration_dir_name(report.iteration));

    let text_path = dir.join(RUN_REPORT_TEXT);
    write_text(&render_run_report(report, config), &text_path)
        .context("Failed to write run report text")?;

    let json_path = dir.join(RUN_REPORT_JSON);
    write_run_report(report, &json_path).context("Failed to write run report JSON")?;

    info!("✓ Iteration {} reports written to: {}", report.iteration, dir.display());
    Ok(())
}

/// Write `summary_report.txt` and `summary.json`.
///
/// **Public** - shared with the summarize command
pub fn write_summary_outputs(output_dir: &Path, summary: &SummaryReport) -> Result<()> {
    let text_path = output_dir.join(SUMMARY_REPORT_TEXT);
    write_text(&render_summary_report(summary), &text_path)
        .context("Failed to write summary report text")?;
    info!("✓ Summary written to: {}", text_path.display());

    let json_path = output_dir.join(SUMMARY_REPORT_JSON);
    write_summary_report(summary, &json_path).context("Failed to write summary JSON")?;
    info!("✓ Summary JSON written to: {}", json_path.display());

    Ok(())
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.traces.is_empty() {
        anyhow::bail!("At least one trace file is required");
    }

    if let Some(missing) = args.traces.iter().find(|p| !p.is_file()) {
        anyhow::bail!("Trace file not found: {}", missing.display());
    }

    if args.output_dir.as_os_str().is_empty() {
        anyhow::bail!("Output directory cannot be empty");
    }

    if args.output_dir.is_file() {
        anyhow::bail!(
            "Output directory is an existing file: {}",
            args.output_dir.display()
        );
    }

    Ok(())
}
