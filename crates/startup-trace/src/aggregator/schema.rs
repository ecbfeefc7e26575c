//! Schema definitions for cross-run summary reports.

use super::stats::AggregateStats;
use crate::parser::schema::LifecycleEvent;
use serde::{Deserialize, Serialize};

/// Complete summary of all runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Schema version for the summary format
    pub version: String,

    /// Package that was measured
    pub package_id: String,

    /// Number of run metric sets aggregated
    pub total_runs: usize,

    /// Runs that produced at least one metric
    pub runs_with_metrics: usize,

    /// App-start anchor timestamp
    pub app_start: MetricSummary,

    /// Activity lifecycle milestones
    pub lifecycle: Vec<LifecycleSummary>,

    /// Custom markers, in configured order
    pub markers: Vec<MarkerSummary>,

    /// Paired markers, in configured order
    pub paired_markers: Vec<PairedSummary>,

    /// Metrics produced by some run but not covered by a group above
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other: Vec<MetricSummary>,

    /// Timestamp when the summary was generated
    pub generated_at: String,
}

/// Statistics for one metric key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Metric key (e.g. `timeToResume`)
    pub key: String,

    /// Number of runs that produced this metric
    pub samples: usize,

    /// `None` when no run produced the metric ("no data available")
    pub stats: Option<AggregateStats>,
}

impl MetricSummary {
    pub fn has_data(&self) -> bool {
        self.stats.is_some()
    }
}

/// Absolute and relative statistics for a lifecycle milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleSummary {
    pub event: LifecycleEvent,
    pub timestamp: MetricSummary,
    pub time_to: MetricSummary,
}

/// Absolute and relative statistics for a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSummary {
    pub name: String,
    pub timestamp: MetricSummary,
    pub time_to: MetricSummary,
}

/// Start, end and duration statistics for a paired marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedSummary {
    pub name: String,
    pub start: MarkerSummary,
    pub end: MarkerSummary,
    pub duration: MetricSummary,
}
