//! Trace parsing, marker configuration and metric schema.
//!
//! This module handles:
//! - Ordered fallback patterns over atrace/logcat text
//! - Timestamp normalization
//! - Extracting a `MetricSet` from one trace capture
//! - Loading marker configuration

pub mod extractor;
pub mod markers;
pub mod patterns;
pub mod schema;
pub mod timestamp;

// Re-export main types
pub use extractor::{extract_metrics, TraceMetricExtractor};
pub use markers::{load_marker_config, parse_paired_marker, split_marker_list, MarkerConfig};
pub use patterns::{resolve_first_match, TracePattern};
pub use schema::{ExtractionConfig, LifecycleEvent, MetricSet, PairedMarkerSpec, RunReport};
