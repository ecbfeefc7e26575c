//! Startup Trace library
//!
//! Extracts Android app-startup metrics from atrace/logcat text dumps and
//! aggregates them across iterations. This exposes the internal modules for testing.

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
