//! Aggregation of per-run metric sets into cross-run statistics.
//!
//! This module transforms the metric sets of all iterations into:
//! - Per-metric min/max/avg/median
//! - A grouped summary report (lifecycle, markers, paired markers)

pub mod schema;
pub mod stats;
pub mod summary;

// Re-export main types and functions
pub use schema::{LifecycleSummary, MarkerSummary, MetricSummary, PairedSummary, SummaryReport};
pub use stats::AggregateStats;
pub use summary::{aggregate_metrics, collect_values, SummaryAggregator};
