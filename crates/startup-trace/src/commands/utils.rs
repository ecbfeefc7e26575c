use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::Path;

use crate::commands::models::MarkerArgs;
use crate::parser::schema::ExtractionConfig;
use crate::parser::{load_marker_config, MarkerConfig};
use crate::utils::config::SCHEMA_VERSION;

/// Resolve the marker selection into a validated extraction config
///
/// Package precedence: command line, then marker-config file, then
/// `fallback_package` (the package recorded in existing run reports).
pub fn build_extraction_config(
    args: &MarkerArgs,
    fallback_package: Option<String>,
) -> Result<ExtractionConfig> {
    let mut file_config = match &args.marker_config {
        Some(path) => load_marker_config(path)
            .with_context(|| format!("Failed to load marker config {}", path.display()))?,
        None => MarkerConfig::default(),
    };

    file_config.merge(args.markers.clone(), args.paired_markers.clone());

    let package = args
        .package
        .clone()
        .or_else(|| file_config.package.clone())
        .or(fallback_package);

    let config = file_config
        .into_extraction_config(package)
        .context("Invalid marker configuration")?;

    debug!(
        "Extraction config: package {}, {} markers, {} paired markers",
        config.package_id,
        config.markers.len(),
        config.paired_markers.len()
    );

    Ok(config)
}

/// Validate a marker-config file
pub fn validate_marker_config_file(file_path: &Path, package: Option<String>) -> Result<()> {
    println!("Validating marker config: {}", file_path.display());

    let config = load_marker_config(file_path)
        .with_context(|| format!("Failed to load marker config {}", file_path.display()))?;
    config.validate_markers().context("Invalid marker configuration")?;

    let package = package.or_else(|| config.package.clone());

    println!("✓ Valid marker config");
    match &package {
        Some(package) => println!("  Package: {}", package),
        None => {
            warn!("No package declared; pass --package when analyzing");
            println!("  Package: (not set)");
        }
    }
    println!("  Custom Markers: {}", config.markers.len());
    for marker in &config.markers {
        println!("    - {}", marker);
    }
    println!("  Paired Markers: {}", config.paired_markers.len());
    for pair in &config.paired_markers {
        println!("    - {}: {} -> {}", pair.name, pair.start, pair.end);
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Startup Trace Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Run Report (iteration_N/report.json):");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  package_id: string       - Measured app package");
        println!("  iteration: number        - 1-based iteration number");
        println!("  source: string?          - Trace file the metrics came from");
        println!("  metrics: object          - Metric key -> seconds");
        println!("    appStartTimestamp      - App-start anchor");
        println!("    <event>Timestamp       - Absolute lifecycle/marker time");
        println!("    timeTo<event>          - Offset from app start");
        println!("    <pair>Duration         - Paired marker end - start");
        println!("  generated_at: string     - ISO 8601 timestamp");
        println!();
        println!("Summary Report (summary.json):");
        println!("  total_runs: number       - Runs aggregated");
        println!("  runs_with_metrics: number - Runs that produced any metric");
        println!("  app_start / lifecycle / markers / paired_markers / other");
        println!("    key: string            - Metric key");
        println!("    samples: number        - Runs that produced the metric");
        println!("    stats: object?         - min/max/avg/median, null when no data");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Startup Trace v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Android app-startup metrics from atrace/logcat dumps.");
}
