//! Fixed-format text reports.
//!
//! Rendering is a presentation concern only; nothing in the crate parses
//! these reports back.

use crate::aggregator::schema::{MarkerSummary, MetricSummary, SummaryReport};
use crate::parser::schema::{
    duration_key, relative_key, timestamp_key, ExtractionConfig, LifecycleEvent, MetricSet,
    RunReport, APP_START_KEY,
};
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const LIFECYCLE_HEADER: &str = "== Android Activity Lifecycle Events ==";
pub const MARKERS_HEADER: &str = "== Custom Performance Markers ==";
pub const PAIRED_HEADER: &str = "== Paired Marker Durations ==";
pub const OTHER_HEADER: &str = "== Other Metrics ==";

const NOT_FOUND: &str = "Not found";
const NO_DATA: &str = "No data available";

/// Render one iteration's metrics as a text report
pub fn render_run_report(report: &RunReport, config: &ExtractionConfig) -> String {
    let metrics = &report.metrics;
    let mut out = String::new();

    out.push_str("Startup Trace Report\n");
    out.push_str(&format!("Package: {}\n", report.package_id));
    out.push_str(&format!("Iteration: {}\n", report.iteration));
    if let Some(source) = &report.source {
        out.push_str(&format!("Trace: {}\n", source));
    }
    out.push_str(&format!("Generated: {}\n", report.generated_at));
    out.push('\n');

    out.push_str(&format!("{}\n", LIFECYCLE_HEADER));
    out.push_str(&format!(
        "App Start: {}\n",
        format_timestamp(metrics.get(APP_START_KEY))
    ));
    for event in LifecycleEvent::ALL {
        out.push_str(&format!(
            "{}: {}\n",
            event.label(),
            format_event(metrics, &event.timestamp_key(), &event.relative_key())
        ));
    }
    out.push('\n');

    out.push_str(&format!("{}\n", MARKERS_HEADER));
    if config.markers.is_empty() {
        out.push_str("(no custom markers configured)\n");
    }
    for marker in &config.markers {
        out.push_str(&format!(
            "{}: {}\n",
            marker,
            format_event(metrics, &timestamp_key(marker), &relative_key(marker))
        ));
    }
    out.push('\n');

    out.push_str(&format!("{}\n", PAIRED_HEADER));
    if config.paired_markers.is_empty() {
        out.push_str("(no paired markers configured)\n");
    }
    for pair in &config.paired_markers {
        let value = match metrics.get(&duration_key(&pair.name)) {
            Some(duration) => format!("{:.3}s", duration),
            None => format!(
                "{} (start: {}, end: {})",
                NOT_FOUND,
                found_label(metrics, &pair.start),
                found_label(metrics, &pair.end)
            ),
        };
        out.push_str(&format!(
            "{} ({} -> {}): {}\n",
            pair.name, pair.start, pair.end, value
        ));
    }

    out
}

/// Render the cross-run summary as a text report
pub fn render_summary_report(report: &SummaryReport) -> String {
    let runs = report.total_runs;
    let mut out = String::new();

    out.push_str("Startup Trace Summary Report\n");
    out.push_str(&format!("Package: {}\n", report.package_id));
    out.push_str(&format!(
        "Runs: {} ({} with metrics)\n",
        report.total_runs, report.runs_with_metrics
    ));
    out.push_str(&format!("Generated: {}\n", report.generated_at));
    out.push('\n');

    out.push_str(&format!("{}\n", LIFECYCLE_HEADER));
    push_stats(&mut out, "App Start Timestamp", &report.app_start, runs);
    for lifecycle in &report.lifecycle {
        push_stats(
            &mut out,
            &format!("{} Timestamp", lifecycle.event.label()),
            &lifecycle.timestamp,
            runs,
        );
        push_stats(
            &mut out,
            &format!("Time to {}", lifecycle.event.label()),
            &lifecycle.time_to,
            runs,
        );
    }
    out.push('\n');

    out.push_str(&format!("{}\n", MARKERS_HEADER));
    for marker in &report.markers {
        push_marker(&mut out, marker, runs);
    }
    out.push('\n');

    out.push_str(&format!("{}\n", PAIRED_HEADER));
    for pair in &report.paired_markers {
        out.push_str(&format!(
            "{} ({} -> {}):\n",
            pair.name, pair.start.name, pair.end.name
        ));
        push_marker(&mut out, &pair.start, runs);
        push_marker(&mut out, &pair.end, runs);
        push_stats(&mut out, &format!("{} Duration", pair.name), &pair.duration, runs);
    }

    if !report.other.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", OTHER_HEADER));
        for metric in &report.other {
            push_stats(&mut out, &metric.key, metric, runs);
        }
    }

    out
}

/// Write rendered text to a file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_text(content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing text report to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    Ok(())
}

fn format_timestamp(value: Option<f64>) -> String {
    match value {
        Some(ts) => format!("{:.3}s", ts),
        None => NOT_FOUND.to_string(),
    }
}

fn format_event(metrics: &MetricSet, absolute_key: &str, relative: &str) -> String {
    match (metrics.get(absolute_key), metrics.get(relative)) {
        (Some(ts), Some(offset)) => format!("{:.3}s (+{:.3}s from app start)", ts, offset),
        (Some(ts), None) => format!("{:.3}s (app start unknown)", ts),
        (None, _) => NOT_FOUND.to_string(),
    }
}

fn found_label(metrics: &MetricSet, marker: &str) -> &'static str {
    if metrics.contains(&timestamp_key(marker)) {
        "found"
    } else {
        "not found"
    }
}

fn push_marker(out: &mut String, marker: &MarkerSummary, runs: usize) {
    push_stats(out, &format!("{} Timestamp", marker.name), &marker.timestamp, runs);
    push_stats(out, &format!("Time to {}", marker.name), &marker.time_to, runs);
}

fn push_stats(out: &mut String, label: &str, metric: &MetricSummary, runs: usize) {
    out.push_str(&format!("{}:\n", label));
    match &metric.stats {
        Some(stats) => {
            out.push_str(&format!("  Min: {:.3}s\n", stats.min));
            out.push_str(&format!("  Max: {:.3}s\n", stats.max));
            out.push_str(&format!("  Avg: {:.3}s\n", stats.avg));
            out.push_str(&format!("  Median: {:.3}s\n", stats.median));
            out.push_str(&format!("  Samples: {}/{}\n", metric.samples, runs));
        }
        None => {
            out.push_str(&format!("  {}\n", NO_DATA));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::SummaryAggregator;
    use crate::parser::schema::PairedMarkerSpec;

    fn config() -> ExtractionConfig {
        ExtractionConfig::new(
            "com.example.app",
            vec!["app_js_initialized".to_string()],
            vec![PairedMarkerSpec::new("a", "b", "ab")],
        )
        .unwrap()
    }

    fn report(metrics: MetricSet) -> RunReport {
        RunReport {
            version: "1.0.0".to_string(),
            package_id: "com.example.app".to_string(),
            iteration: 1,
            source: None,
            metrics,
            generated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_run_report_sections_and_values() {
        let mut metrics = MetricSet::new();
        metrics.insert("appStartTimestamp", 123.456);
        metrics.insert("app_js_initializedTimestamp", 124.1);
        metrics.insert("timeToapp_js_initialized", 0.644);
        metrics.insert("aTimestamp", 124.0);

        let text = render_run_report(&report(metrics), &config());

        assert!(text.contains(LIFECYCLE_HEADER));
        assert!(text.contains(MARKERS_HEADER));
        assert!(text.contains(PAIRED_HEADER));
        assert!(text.contains("App Start: 123.456s"));
        assert!(text.contains("app_js_initialized: 124.100s (+0.644s from app start)"));
        assert!(text.contains("Activity Resume: Not found"));
        assert!(text.contains("ab (a -> b): Not found (start: found, end: not found)"));
    }

    #[test]
    fn test_summary_report_marks_missing_data() {
        let summary = SummaryAggregator::new(config()).aggregate(&[]);
        let text = render_summary_report(&summary);

        assert!(text.contains("Runs: 0 (0 with metrics)"));
        assert!(text.contains("Time to app_js_initialized:\n  No data available"));
        assert!(text.contains("ab Duration:\n  No data available"));
    }

    #[test]
    fn test_summary_report_stats_lines() {
        let runs: Vec<MetricSet> = [1.0, 1.2, 0.8]
            .iter()
            .map(|v| {
                let mut m = MetricSet::new();
                m.insert("timeToResume", *v);
                m
            })
            .collect();
        let summary = SummaryAggregator::new(config()).aggregate(&runs);
        let text = render_summary_report(&summary);

        assert!(text.contains(
            "Time to Activity Resume:\n  Min: 0.800s\n  Max: 1.200s\n  Avg: 1.000s\n  Median: 1.000s\n  Samples: 3/3"
        ));
    }
}
