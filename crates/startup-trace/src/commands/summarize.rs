//! Summarize command implementation.
//!
//! Re-aggregates JSON run reports written by earlier `analyze` runs, e.g.
//! to merge iterations captured on different days.

use crate::aggregator::{SummaryAggregator, SummaryReport};
use crate::commands::analyze::write_summary_outputs;
use crate::commands::models::SummarizeArgs;
use crate::commands::utils::build_extraction_config;
use crate::output::{read_run_report, render_summary_report, render_terminal_summary};
use crate::parser::schema::{MetricSet, RunReport};
use anyhow::{Context, Result};
use log::{info, warn};

/// Execute the summarize command
///
/// # Errors
/// * Unreadable or malformed run reports
/// * Invalid marker configuration
/// * File write errors
pub fn execute_summarize(args: SummarizeArgs) -> Result<SummaryReport> {
    if args.reports.is_empty() {
        anyhow::bail!("At least one run report is required");
    }

    let reports = args
        .reports
        .iter()
        .map(|path| {
            read_run_report(path)
                .with_context(|| format!("Failed to read run report {}", path.display()))
        })
        .collect::<Result<Vec<RunReport>>>()?;

    let fallback_package = reports.first().map(|r| r.package_id.clone());
    let config = build_extraction_config(&args.marker_args, fallback_package)?;

    for report in &reports {
        if report.package_id != config.package_id {
            warn!(
                "Run report for iteration {} was captured for {}, summarizing as {}",
                report.iteration, report.package_id, config.package_id
            );
        }
    }

    info!("Aggregating {} run report(s)...", reports.len());
    let runs: Vec<MetricSet> = reports.into_iter().map(|r| r.metrics).collect();
    let summary = SummaryAggregator::new(config).aggregate(&runs);

    match &args.output_dir {
        Some(dir) => write_summary_outputs(dir, &summary)?,
        None => print!("{}", render_summary_report(&summary)),
    }

    if args.print_summary {
        println!("{}", render_terminal_summary(&summary));
    }

    Ok(summary)
}
