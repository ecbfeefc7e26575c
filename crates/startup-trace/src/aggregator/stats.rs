//! Descriptive statistics over one metric's values across runs.

use crate::parser::timestamp::round_to_precision;
use serde::{Deserialize, Serialize};

/// Min/max/avg/median of one metric across the runs that produced it
///
/// Every field is rounded to the report precision (3 decimals).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub median: f64,
}

impl AggregateStats {
    /// Compute statistics, or `None` when there are no values
    ///
    /// An empty input means "no data", never zero.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let sum: f64 = sorted.iter().sum();
        let avg = sum / sorted.len() as f64;

        Some(Self {
            min: round_to_precision(sorted[0]),
            max: round_to_precision(sorted[sorted.len() - 1]),
            avg: round_to_precision(avg),
            median: round_to_precision(median(&sorted)),
        })
    }
}

/// Median of an already sorted, non-empty slice
///
/// Even lengths average the two middle values.
fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(AggregateStats::from_values(&[3.0, 1.0, 2.0]).unwrap().median, 2.0);
        assert_eq!(
            AggregateStats::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap().median,
            2.5
        );
    }

    #[test]
    fn test_time_to_resume_scenario() {
        let stats = AggregateStats::from_values(&[1.0, 1.2, 0.8]).unwrap();
        assert_eq!(
            stats,
            AggregateStats {
                min: 0.8,
                max: 1.2,
                avg: 1.0,
                median: 1.0,
            }
        );
    }

    #[test]
    fn test_single_value() {
        let stats = AggregateStats::from_values(&[0.644]).unwrap();
        assert_eq!(stats.min, 0.644);
        assert_eq!(stats.max, 0.644);
        assert_eq!(stats.avg, 0.644);
        assert_eq!(stats.median, 0.644);
    }

    #[test]
    fn test_empty_is_no_data() {
        assert!(AggregateStats::from_values(&[]).is_none());
    }

    #[test]
    fn test_negative_values() {
        let stats = AggregateStats::from_values(&[-1.5, 0.5]).unwrap();
        assert_eq!(stats.min, -1.5);
        assert_eq!(stats.max, 0.5);
        assert_eq!(stats.avg, -0.5);
        assert_eq!(stats.median, -0.5);
    }
}
