//! Cross-run aggregation of metric sets.
//!
//! The orchestrator keeps every run's `MetricSet` in memory and hands the
//! full list over once all iterations are done. Aggregation never fails:
//! sparse input only shows up as metrics with fewer samples or no data.

use super::schema::{LifecycleSummary, MarkerSummary, MetricSummary, PairedSummary, SummaryReport};
use super::stats::AggregateStats;
use crate::parser::schema::{
    duration_key, relative_key, timestamp_key, ExtractionConfig, LifecycleEvent, MetricSet,
    APP_START_KEY,
};
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Group every metric's values across runs
///
/// A run that did not produce a metric contributes nothing to it, so the
/// value lists have varying lengths.
pub fn collect_values(runs: &[MetricSet]) -> BTreeMap<String, Vec<f64>> {
    let mut values: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for run in runs {
        for (key, value) in run.iter() {
            values.entry(key.to_string()).or_default().push(value);
        }
    }
    values
}

/// Statistics for every metric produced by at least one run
pub fn aggregate_metrics(runs: &[MetricSet]) -> BTreeMap<String, AggregateStats> {
    collect_values(runs)
        .into_iter()
        .filter_map(|(key, values)| AggregateStats::from_values(&values).map(|s| (key, s)))
        .collect()
}

/// Builds grouped summary reports for a marker configuration
#[derive(Debug, Clone)]
pub struct SummaryAggregator {
    config: ExtractionConfig,
}

impl SummaryAggregator {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Aggregate all runs into a grouped `SummaryReport`
    ///
    /// Every declared metric appears, with `stats: None` when no run
    /// produced it. Metrics produced by some run but not declared by the
    /// configuration are listed under `other`.
    pub fn aggregate(&self, runs: &[MetricSet]) -> SummaryReport {
        debug!("Aggregating {} runs", runs.len());

        let values = collect_values(runs);
        let mut covered: BTreeSet<String> = BTreeSet::new();

        let app_start = summarize_declared(&values, &mut covered, APP_START_KEY.to_string());

        let lifecycle = LifecycleEvent::ALL
            .iter()
            .map(|event| LifecycleSummary {
                event: *event,
                timestamp: summarize_declared(&values, &mut covered, event.timestamp_key()),
                time_to: summarize_declared(&values, &mut covered, event.relative_key()),
            })
            .collect();

        let markers = self
            .config
            .markers
            .iter()
            .map(|name| summarize_marker(&values, &mut covered, name))
            .collect();

        let paired_markers = self
            .config
            .paired_markers
            .iter()
            .map(|pair| PairedSummary {
                name: pair.name.clone(),
                start: summarize_marker(&values, &mut covered, &pair.start),
                end: summarize_marker(&values, &mut covered, &pair.end),
                duration: summarize_declared(&values, &mut covered, duration_key(&pair.name)),
            })
            .collect();

        let other = values
            .keys()
            .filter(|key| !covered.contains(*key))
            .map(|key| summarize_key(&values, key))
            .collect::<Vec<_>>();

        if !other.is_empty() {
            debug!("{} metrics not covered by the marker configuration", other.len());
        }

        SummaryReport {
            version: SCHEMA_VERSION.to_string(),
            package_id: self.config.package_id.clone(),
            total_runs: runs.len(),
            runs_with_metrics: runs.iter().filter(|r| !r.is_empty()).count(),
            app_start,
            lifecycle,
            markers,
            paired_markers,
            other,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

fn summarize_key(values: &BTreeMap<String, Vec<f64>>, key: &str) -> MetricSummary {
    let samples = values.get(key).map(Vec::as_slice).unwrap_or(&[]);
    MetricSummary {
        key: key.to_string(),
        samples: samples.len(),
        stats: AggregateStats::from_values(samples),
    }
}

/// Summarize a key the configuration declares, marking it as covered
fn summarize_declared(
    values: &BTreeMap<String, Vec<f64>>,
    covered: &mut BTreeSet<String>,
    key: String,
) -> MetricSummary {
    let summary = summarize_key(values, &key);
    covered.insert(key);
    summary
}

fn summarize_marker(
    values: &BTreeMap<String, Vec<f64>>,
    covered: &mut BTreeSet<String>,
    name: &str,
) -> MarkerSummary {
    MarkerSummary {
        name: name.to_string(),
        timestamp: summarize_declared(values, covered, timestamp_key(name)),
        time_to: summarize_declared(values, covered, relative_key(name)),
    }
}
