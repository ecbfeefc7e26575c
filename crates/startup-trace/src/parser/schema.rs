//! Data model for extraction: marker specs, metric sets and run reports.
//!
//! Metric keys follow fixed naming conventions so that reports stay
//! comparable across runs:
//! - `<event>Timestamp` - absolute time of a lifecycle event or marker
//! - `timeTo<event>` - offset from the app-start anchor
//! - `<pair>Duration` - end minus start of a paired marker

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Anchor key every relative offset is measured from
pub const APP_START_KEY: &str = "appStartTimestamp";

/// Key for the absolute timestamp of a lifecycle event or marker
pub fn timestamp_key(name: &str) -> String {
    format!("{}Timestamp", name)
}

/// Key for the offset of an event or marker from app start
pub fn relative_key(name: &str) -> String {
    format!("timeTo{}", name)
}

/// Key for the duration of a paired marker
pub fn duration_key(name: &str) -> String {
    format!("{}Duration", name)
}

/// Activity lifecycle milestones searched for in every trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleEvent {
    ActivityCreate,
    ActivityStart,
    ActivityResume,
    ActivityDrawn,
}

impl LifecycleEvent {
    /// All milestones, in report order
    pub const ALL: [LifecycleEvent; 4] = [
        Self::ActivityCreate,
        Self::ActivityStart,
        Self::ActivityResume,
        Self::ActivityDrawn,
    ];

    /// Stem used for the absolute timestamp key
    pub fn key_stem(self) -> &'static str {
        match self {
            Self::ActivityCreate => "activityCreate",
            Self::ActivityStart => "activityStart",
            Self::ActivityResume => "activityResume",
            Self::ActivityDrawn => "activityDrawn",
        }
    }

    /// Short stem used for the `timeTo*` key (`timeToResume`, ...)
    pub fn relative_stem(self) -> &'static str {
        match self {
            Self::ActivityCreate => "Create",
            Self::ActivityStart => "Start",
            Self::ActivityResume => "Resume",
            Self::ActivityDrawn => "Drawn",
        }
    }

    /// Framework method that marks this milestone in the trace
    pub fn trace_method(self) -> &'static str {
        match self {
            Self::ActivityCreate => "performCreate",
            Self::ActivityStart => "performStart",
            Self::ActivityResume => "performResume",
            Self::ActivityDrawn => "reportFullyDrawn",
        }
    }

    /// Human-readable label for reports
    pub fn label(self) -> &'static str {
        match self {
            Self::ActivityCreate => "Activity Create",
            Self::ActivityStart => "Activity Start",
            Self::ActivityResume => "Activity Resume",
            Self::ActivityDrawn => "Activity Fully Drawn",
        }
    }

    pub fn timestamp_key(self) -> String {
        timestamp_key(self.key_stem())
    }

    pub fn relative_key(self) -> String {
        relative_key(self.relative_stem())
    }
}

/// Two markers whose timestamp difference is the duration of an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedMarkerSpec {
    /// Marker that opens the operation
    pub start: String,

    /// Marker that closes the operation
    pub end: String,

    /// Label for the derived duration (`<name>Duration`)
    pub name: String,
}

impl PairedMarkerSpec {
    pub fn new(start: impl Into<String>, end: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            name: name.into(),
        }
    }

    /// Check that none of the three identifiers is blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyPairedName {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }
        if self.start.trim().is_empty() {
            return Err(ConfigError::EmptyPairedSide {
                name: self.name.clone(),
                side: "start",
            });
        }
        if self.end.trim().is_empty() {
            return Err(ConfigError::EmptyPairedSide {
                name: self.name.clone(),
                side: "end",
            });
        }
        Ok(())
    }
}

/// Immutable configuration for one extraction session
///
/// Passed explicitly to the extractor and the aggregator; there is no
/// process-wide marker state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Package id used to scope lifecycle lines to the target app
    pub package_id: String,

    /// Custom markers, in report order
    #[serde(default)]
    pub markers: Vec<String>,

    /// Paired markers, in report order
    #[serde(default)]
    pub paired_markers: Vec<PairedMarkerSpec>,
}

impl ExtractionConfig {
    /// Build and validate a configuration
    ///
    /// # Errors
    /// * `ConfigError::EmptyPackageId` - blank package id
    /// * `ConfigError::EmptyMarkerName` - blank custom marker
    /// * `ConfigError::EmptyPairedSide` / `EmptyPairedName` - blank paired marker field
    pub fn new(
        package_id: impl Into<String>,
        markers: Vec<String>,
        paired_markers: Vec<PairedMarkerSpec>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            package_id: package_id.into(),
            markers,
            paired_markers,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package_id.trim().is_empty() {
            return Err(ConfigError::EmptyPackageId);
        }

        if let Some(index) = self.markers.iter().position(|m| m.trim().is_empty()) {
            return Err(ConfigError::EmptyMarkerName(index));
        }

        for pair in &self.paired_markers {
            pair.validate()?;
        }

        Ok(())
    }
}

/// Per-run mapping of metric key to value (seconds)
///
/// A key is absent when the value could not be resolved from the trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSet(BTreeMap<String, f64>);

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate metrics in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, f64)> for MetricSet {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Per-iteration report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Package that was measured
    pub package_id: String,

    /// 1-based iteration number
    pub iteration: usize,

    /// Trace file the metrics came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Extracted metrics
    pub metrics: MetricSet,

    /// Timestamp when the report was generated
    pub generated_at: String,
}
