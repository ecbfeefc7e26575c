//! Terminal output rendering for summary reports.
//!
//! Provides a compact, colored view of the cross-run statistics: one line
//! per metric with its median and spread.

use crate::aggregator::schema::{MetricSummary, SummaryReport};
use colored::*;

/// Render a human-readable summary of a summary report for the terminal
pub fn render_terminal_summary(report: &SummaryReport) -> String {
    let mut out = String::new();

    out.push_str(&render_header(report));
    out.push_str(&render_lifecycle(report));
    out.push_str(&render_markers(report));
    out.push_str(&render_paired(report));
    out.push_str(&render_status(report));

    out
}

fn render_header(report: &SummaryReport) -> String {
    let mut out = String::new();
    out.push_str("\n📊 ");
    out.push_str(&"App Startup Summary".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!("Package: {}\n", report.package_id));
    out.push_str(&format!(
        "Runs:    {} ({} with metrics)\n",
        report.total_runs, report.runs_with_metrics
    ));
    out.push_str("---------------------------------------------------\n");
    out
}

fn render_lifecycle(report: &SummaryReport) -> String {
    let mut out = String::from("\nLifecycle:\n");
    for lifecycle in &report.lifecycle {
        out.push_str(&render_metric(
            &format!("Time to {}", lifecycle.event.label()),
            &lifecycle.time_to,
        ));
    }
    out
}

fn render_markers(report: &SummaryReport) -> String {
    let mut out = String::new();
    if !report.markers.is_empty() {
        out.push_str("\nCustom Markers:\n");
        for marker in &report.markers {
            out.push_str(&render_metric(&format!("Time to {}", marker.name), &marker.time_to));
        }
    }
    out
}

fn render_paired(report: &SummaryReport) -> String {
    let mut out = String::new();
    if !report.paired_markers.is_empty() {
        out.push_str("\nPaired Markers:\n");
        for pair in &report.paired_markers {
            out.push_str(&render_metric(&pair.name, &pair.duration));
        }
    }
    out
}

fn render_metric(label: &str, metric: &MetricSummary) -> String {
    match &metric.stats {
        Some(stats) => format!(
            "  ✅ {}: {} (min {:.3}s, max {:.3}s, n={})\n",
            label,
            format!("{:.3}s", stats.median).bold(),
            stats.min,
            stats.max,
            metric.samples
        ),
        None => format!("  ➖ {}: {}\n", label, "no data".dimmed()),
    }
}

fn render_status(report: &SummaryReport) -> String {
    let mut out = String::new();
    out.push_str("\n---------------------------------------------------\n");
    let status_msg = if report.total_runs == 0 {
        "⚠️  STATUS: NO RUNS".yellow().bold()
    } else if report.runs_with_metrics == 0 {
        "❌ STATUS: NO METRICS EXTRACTED".red().bold()
    } else if report.runs_with_metrics < report.total_runs {
        format!(
            "⚠️  STATUS: {} of {} runs produced metrics",
            report.runs_with_metrics, report.total_runs
        )
        .yellow()
        .bold()
    } else {
        "✅ STATUS: ALL RUNS PRODUCED METRICS".green().bold()
    };
    out.push_str(&status_msg.to_string());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::SummaryAggregator;
    use crate::parser::schema::{ExtractionConfig, MetricSet};

    #[test]
    fn test_terminal_summary_lists_medians() {
        colored::control::set_override(false);
        let config = ExtractionConfig::new("com.example.app", vec!["ready".to_string()], vec![])
            .unwrap();
        let mut run = MetricSet::new();
        run.insert("timeToResume", 0.75);
        let report = SummaryAggregator::new(config).aggregate(&[run, MetricSet::new()]);

        let out = render_terminal_summary(&report);
        assert!(out.contains("Package: com.example.app"));
        assert!(out.contains("Time to Activity Resume: 0.750s (min 0.750s, max 0.750s, n=1)"));
        assert!(out.contains("Time to ready: no data"));
        assert!(out.contains("1 of 2 runs produced metrics"));
    }
}
