//! Ordered fallback patterns for locating events in trace text.
//!
//! Every lookup target (the app-start anchor, each lifecycle milestone,
//! each marker) owns an ordered list of patterns, most specific first.
//! `resolve_first_match` applies the list: the first pattern that matches
//! anywhere wins, and within it only the first occurrence counts.
//!
//! Two timestamp layouts are recognized on a line:
//! - atrace/ftrace: `... [002] ...1 123.456789: tracing_mark_write: B|123|name`
//! - logcat `-v monotonic`: `   123.456  1234  1234 I Tag: message`
//!
//! An integer atrace column (`1500000: ...`) is only accepted at the start
//! of a line, so a mid-line `step 3: ready` is never read as a timestamp.

use super::timestamp::parse_timestamp;
use log::debug;
use regex::Regex;

/// Leading timestamp of a line, in either supported layout.
///
/// `mono` captures the logcat column, `ts` the atrace column and `int` an
/// integer atrace column at line start.
const TIMESTAMP_PREFIX: &str = concat!(
    r"(?m)(?:^[ \t]*(?P<mono>\d+\.\d+)[ \t]",
    r"|(?:^|[ \t])(?P<ts>\d+\.\d+):[ \t]",
    r"|^[ \t]*(?P<int>\d+):[ \t])"
);

// Characters allowed between the timestamp and the payload
const SAME_LINE: &str = r"[^\n]*?";

/// Escaped package id that must not continue into a longer name
///
/// `com.example.app` matches `com.example.app/.Main` and `com.example.app-123`
/// but not `com.example.appstore`.
fn package_bounded(package_id: &str) -> String {
    format!(r"{}(?:[^\w\n]|$)", regex::escape(package_id))
}

fn timestamp_field<'t>(caps: &regex::Captures<'t>) -> Option<regex::Match<'t>> {
    caps.name("mono")
        .or_else(|| caps.name("ts"))
        .or_else(|| caps.name("int"))
}

/// How a pattern finds its line
#[derive(Debug, Clone)]
enum Matcher {
    /// Timestamp followed, on the same line, by a payload expression
    Payload(Regex),

    /// First timestamped line containing `needle` anywhere (any line if `None`)
    Line {
        needle: Option<String>,
        timestamp: Regex,
    },
}

/// One entry in an ordered fallback chain
#[derive(Debug, Clone)]
pub struct TracePattern {
    name: String,
    matcher: Matcher,
}

impl TracePattern {
    /// Pattern matching a timestamp followed by `payload` on the same line
    ///
    /// `payload` is a regular expression; escape literal names with
    /// `regex::escape` before passing them in.
    pub fn payload(name: impl Into<String>, payload: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("{}{}{}", TIMESTAMP_PREFIX, SAME_LINE, payload))?;
        Ok(Self {
            name: name.into(),
            matcher: Matcher::Payload(regex),
        })
    }

    /// Pattern matching `scope` before the timestamp and `payload` after it
    ///
    /// atrace puts the emitting task name ahead of the timestamp, so this is
    /// how a line gets scoped to a package when the payload itself does not
    /// mention it.
    pub fn scoped(
        name: impl Into<String>,
        scope: &str,
        payload: &str,
    ) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(
            r"(?m)^[^\n]*?{}{}(?:[ \t])(?P<ts>\d+\.\d+):[ \t]{}{}",
            scope, SAME_LINE, SAME_LINE, payload
        ))?;
        Ok(Self {
            name: name.into(),
            matcher: Matcher::Payload(regex),
        })
    }

    /// Pattern matching the first timestamped line containing `needle`
    pub fn line_containing(
        name: impl Into<String>,
        needle: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            matcher: Matcher::Line {
                needle: Some(needle.into()),
                timestamp: Regex::new(TIMESTAMP_PREFIX)?,
            },
        })
    }

    /// Pattern matching the first timestamped line of the trace
    pub fn any_line(name: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            matcher: Matcher::Line {
                needle: None,
                timestamp: Regex::new(TIMESTAMP_PREFIX)?,
            },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Timestamp of the first occurrence of this pattern, in seconds
    ///
    /// Only the first occurrence is considered; if its timestamp is zero or
    /// unparsable the pattern counts as not matched.
    pub fn find_timestamp(&self, text: &str) -> Option<f64> {
        match &self.matcher {
            Matcher::Payload(regex) => {
                let caps = regex.captures(text)?;
                parse_timestamp(timestamp_field(&caps)?.as_str())
            }
            Matcher::Line { needle, timestamp } => {
                let line = text.lines().find(|line| {
                    needle.as_deref().map_or(true, |n| line.contains(n))
                        && timestamp.is_match(line)
                })?;
                let caps = timestamp.captures(line)?;
                parse_timestamp(timestamp_field(&caps)?.as_str())
            }
        }
    }
}

/// Resolve a target by trying `patterns` in order
///
/// The first pattern that matches anywhere in `text` wins, regardless of
/// where later patterns would have matched.
pub fn resolve_first_match(patterns: &[TracePattern], text: &str) -> Option<f64> {
    patterns.iter().find_map(|pattern| {
        let found = pattern.find_timestamp(text);
        if let Some(ts) = found {
            debug!("Pattern '{}' matched at {}", pattern.name(), ts);
        }
        found
    })
}

/// Fallback chain for the app-start anchor (t=0)
pub fn anchor_patterns(package_id: &str) -> Result<Vec<TracePattern>, regex::Error> {
    let pkg = package_bounded(package_id);

    Ok(vec![
        TracePattern::payload(
            "startup_marker",
            r"tracing_mark_write:[ \t]*[BSIN]\|\d+\|Startup(?:[|\s]|$)",
        )?,
        TracePattern::payload("application_start", r"\bAPPLICATION_START\b")?,
        TracePattern::payload(
            "activity_manager_start",
            &format!(r"Activity(?:Task)?Manager{}\bSTART\b{}{}", SAME_LINE, SAME_LINE, pkg),
        )?,
        TracePattern::payload(
            "activity_manager_start_proc",
            &format!(r"Start proc \d+:{}", pkg),
        )?,
        TracePattern::payload("launching", &format!(r"launching:[ \t]*{}", pkg))?,
        TracePattern::payload(
            "activity_manager_displayed",
            &format!(r"Activity(?:Task)?Manager{}Displayed[ \t]+{}", SAME_LINE, pkg),
        )?,
        TracePattern::line_containing("package_line", package_id)?,
        TracePattern::any_line("first_timestamp")?,
    ])
}

/// Fallback chain for an Activity lifecycle milestone of `package_id`
pub fn lifecycle_patterns(
    method: &str,
    package_id: &str,
    include_fully_drawn_log: bool,
) -> Result<Vec<TracePattern>, regex::Error> {
    let pkg = package_bounded(package_id);
    let method = regex::escape(method);

    let mut patterns = vec![
        TracePattern::payload(
            format!("{}_with_package", method),
            &format!(r"\b{}\b{}{}", method, SAME_LINE, pkg),
        )?,
        TracePattern::scoped(
            format!("{}_in_package_task", method),
            &pkg,
            &format!(r"\b{}\b", method),
        )?,
    ];

    if include_fully_drawn_log {
        patterns.push(TracePattern::payload(
            "fully_drawn_log",
            &format!(r"Fully drawn[ \t]+{}", pkg),
        )?);
    }

    Ok(patterns)
}

/// Fallback chain for a custom marker
///
/// Structured `tracing_mark_write` slices first, then a word-bounded
/// mention, then a bare substring.
pub fn marker_patterns(marker: &str) -> Result<Vec<TracePattern>, regex::Error> {
    let m = regex::escape(marker);

    Ok(vec![
        TracePattern::payload(
            format!("{}_trace_mark", marker),
            &format!(r"tracing_mark_write:[ \t]*[BSIN]\|\d+\|{}(?:[|\s]|$)", m),
        )?,
        TracePattern::payload(
            format!("{}_word", marker),
            &format!(r"(?:[^\w\n]|\b){}(?:[^\w]|$)", m),
        )?,
        TracePattern::payload(format!("{}_substring", marker), &m)?,
    ])
}
