//! Timestamp parsing and unit normalization.
//!
//! Trace timestamp columns are normally seconds, but some captures write
//! microseconds. Anything above `MICROSECOND_THRESHOLD` is converted.

use crate::utils::config::{METRIC_PRECISION, MICROSECONDS_PER_SECOND, MICROSECOND_THRESHOLD};

/// Round a value to the precision used throughout reports (3 decimals)
pub fn round_to_precision(value: f64) -> f64 {
    let factor = 10f64.powi(METRIC_PRECISION);
    (value * factor).round() / factor
}

/// Convert a raw timestamp to seconds
///
/// Values above the microsecond threshold are divided by 1,000,000 and
/// rounded; everything else is returned untouched.
pub fn normalize_timestamp(raw: f64) -> f64 {
    if raw > MICROSECOND_THRESHOLD {
        round_to_precision(raw / MICROSECONDS_PER_SECOND)
    } else {
        raw
    }
}

/// Parse a captured timestamp field into normalized seconds
///
/// Returns `None` for unparsable, non-finite and zero values. Zero cannot
/// be told apart from "not found".
pub fn parse_timestamp(field: &str) -> Option<f64> {
    let raw = field.trim().parse::<f64>().ok()?;
    if !raw.is_finite() {
        return None;
    }

    let seconds = normalize_timestamp(raw);
    if seconds == 0.0 {
        None
    } else {
        Some(seconds)
    }
}

/// Offset of `timestamp` from `anchor`, if both are present and non-zero
pub fn relative_offset(timestamp: f64, anchor: Option<f64>) -> Option<f64> {
    let anchor = anchor.filter(|a| *a != 0.0)?;
    if timestamp == 0.0 {
        return None;
    }
    Some(round_to_precision(timestamp - anchor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_microseconds_are_converted() {
        assert_eq!(normalize_timestamp(1_500_000.0), 1.5);
        assert_eq!(normalize_timestamp(2_345_678.9), 2.346);
    }

    #[test]
    fn test_seconds_are_untouched() {
        assert_eq!(normalize_timestamp(123.456789), 123.456789);
        assert_eq!(normalize_timestamp(1_000_000.0), 1_000_000.0);
    }

    #[test]
    fn test_parse_timestamp_rejects_zero_and_garbage() {
        assert_eq!(parse_timestamp("0"), None);
        assert_eq!(parse_timestamp("0.000"), None);
        assert_eq!(parse_timestamp("abc"), None);
        assert_eq!(parse_timestamp("1500000"), Some(1.5));
        assert_eq!(parse_timestamp(" 12.5 "), Some(12.5));
    }

    #[test]
    fn test_relative_offset() {
        assert_eq!(relative_offset(124.1, Some(123.456)), Some(0.644));
        assert_eq!(relative_offset(124.1, None), None);
        assert_eq!(relative_offset(124.1, Some(0.0)), None);
        assert_eq!(relative_offset(0.0, Some(1.0)), None);
    }

    #[test]
    fn test_relative_offset_can_be_negative() {
        assert_eq!(relative_offset(10.0, Some(10.25)), Some(-0.25));
    }
}
