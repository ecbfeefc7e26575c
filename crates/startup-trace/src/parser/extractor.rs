//! Trace metric extraction.
//!
//! Turns one raw trace capture into one `MetricSet`:
//! 1. Resolve the app-start anchor (t=0)
//! 2. Resolve each Activity lifecycle milestone
//! 3. Resolve each custom marker
//! 4. Resolve both sides of each paired marker and derive durations
//! 5. Derive `timeTo*` offsets from the anchor
//!
//! Extraction never fails on trace input. Anything that cannot be found
//! is simply left out of the result.

use super::patterns::{
    anchor_patterns, lifecycle_patterns, marker_patterns, resolve_first_match, TracePattern,
};
use super::schema::{
    duration_key, relative_key, timestamp_key, ExtractionConfig, LifecycleEvent, MetricSet,
    APP_START_KEY,
};
use super::timestamp::{relative_offset, round_to_precision};
use crate::utils::error::ConfigError;
use log::debug;
use std::collections::HashMap;

/// Extracts startup metrics from trace text
///
/// Patterns are compiled once from an `ExtractionConfig` and reused for
/// every capture. The extractor holds no mutable state, so a single
/// instance can serve many iterations, or many threads.
#[derive(Debug, Clone)]
pub struct TraceMetricExtractor {
    config: ExtractionConfig,
    anchor: Vec<TracePattern>,
    lifecycle: Vec<(LifecycleEvent, Vec<TracePattern>)>,
    markers: HashMap<String, Vec<TracePattern>>,
}

impl TraceMetricExtractor {
    /// Validate the configuration and compile its pattern chains
    ///
    /// # Errors
    /// * `ConfigError` - blank package id or marker names, or a pattern
    ///   that fails to compile
    pub fn new(config: ExtractionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let anchor = anchor_patterns(&config.package_id)?;

        let lifecycle = LifecycleEvent::ALL
            .iter()
            .map(|event| {
                let patterns = lifecycle_patterns(
                    event.trace_method(),
                    &config.package_id,
                    *event == LifecycleEvent::ActivityDrawn,
                )?;
                Ok((*event, patterns))
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        let mut markers = HashMap::new();
        let marker_names = config.markers.iter().chain(
            config
                .paired_markers
                .iter()
                .flat_map(|pair| [&pair.start, &pair.end]),
        );
        for name in marker_names {
            if !markers.contains_key(name) {
                markers.insert(name.clone(), marker_patterns(name)?);
            }
        }

        debug!(
            "Compiled patterns for {} lifecycle events and {} markers",
            lifecycle.len(),
            markers.len()
        );

        Ok(Self {
            config,
            anchor,
            lifecycle,
            markers,
        })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract the metric set for one trace capture
    ///
    /// Pure function of the trace text and this extractor's configuration:
    /// the same input always yields the same `MetricSet`.
    pub fn extract(&self, trace_text: &str) -> MetricSet {
        let mut metrics = MetricSet::new();

        let anchor = resolve_first_match(&self.anchor, trace_text);
        match anchor {
            Some(ts) => metrics.insert(APP_START_KEY, ts),
            None => debug!("No app start anchor found; relative metrics will be skipped"),
        }

        for (event, patterns) in &self.lifecycle {
            let Some(ts) = resolve_first_match(patterns, trace_text) else {
                debug!("Lifecycle event {} not found", event.key_stem());
                continue;
            };
            metrics.insert(event.timestamp_key(), ts);
            if let Some(offset) = relative_offset(ts, anchor) {
                metrics.insert(event.relative_key(), offset);
            }
        }

        // Each distinct marker is resolved once, even if it is also a paired side
        let resolved: HashMap<&str, f64> = self
            .markers
            .iter()
            .filter_map(|(name, patterns)| {
                let found = resolve_first_match(patterns, trace_text);
                if found.is_none() {
                    debug!("Marker '{}' not found", name);
                }
                found.map(|ts| (name.as_str(), ts))
            })
            .collect();
        let resolve = |name: &str| resolved.get(name).copied();

        for marker in &self.config.markers {
            if let Some(ts) = resolve(marker.as_str()) {
                record_marker(&mut metrics, marker, ts, anchor);
            }
        }

        for pair in &self.config.paired_markers {
            let start = resolve(pair.start.as_str());
            let end = resolve(pair.end.as_str());

            if let Some(ts) = start {
                record_marker(&mut metrics, &pair.start, ts, anchor);
            }
            if let Some(ts) = end {
                record_marker(&mut metrics, &pair.end, ts, anchor);
            }

            // Not clamped: a negative value means the end matched earlier text
            if let (Some(start), Some(end)) = (start, end) {
                metrics.insert(duration_key(&pair.name), round_to_precision(end - start));
            }
        }

        debug!("Extracted {} metrics", metrics.len());
        metrics
    }
}

/// Record a marker's absolute timestamp and, with an anchor, its offset
fn record_marker(metrics: &mut MetricSet, name: &str, ts: f64, anchor: Option<f64>) {
    metrics.insert(timestamp_key(name), ts);
    if let Some(offset) = relative_offset(ts, anchor) {
        metrics.insert(relative_key(name), offset);
    }
}

/// Convenience wrapper: validate `config`, compile it and extract once
///
/// Prefer building a `TraceMetricExtractor` when processing many traces.
pub fn extract_metrics(trace_text: &str, config: &ExtractionConfig) -> Result<MetricSet, ConfigError> {
    let extractor = TraceMetricExtractor::new(config.clone())?;
    Ok(extractor.extract(trace_text))
}
