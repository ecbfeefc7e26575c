//! Startup Trace CLI
//!
//! Measures Android app startup from atrace/logcat dumps.
//! Writes per-iteration reports and a cross-run summary.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use startup_trace::commands::{
    display_schema, display_version, execute_analyze, execute_summarize, validate_args,
    validate_marker_config_file, AnalyzeArgs, MarkerArgs, SummarizeArgs,
};
use startup_trace::parser::schema::PairedMarkerSpec;
use startup_trace::parser::{parse_paired_marker, split_marker_list};
use startup_trace::utils::config::{ENV_MARKERS, ENV_MARKER_CONFIG, ENV_PACKAGE};

/// Startup Trace - App startup metrics for Android
#[derive(Parser, Debug)]
#[command(name = "startup-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Marker selection flags shared by analyze and summarize
#[derive(clap::Args, Debug)]
struct MarkerFlags {
    /// App package id (e.g. com.example.app)
    #[arg(short, long, env = ENV_PACKAGE)]
    package: Option<String>,

    /// Custom markers, comma-separated or repeated
    #[arg(short, long, env = ENV_MARKERS)]
    markers: Vec<String>,

    /// Paired marker as start:end[:name], repeatable
    #[arg(long = "paired", value_parser = parse_paired_marker)]
    paired: Vec<PairedMarkerSpec>,

    /// Marker config file (.json or .toml)
    #[arg(short = 'c', long, env = ENV_MARKER_CONFIG)]
    marker_config: Option<PathBuf>,
}

impl From<MarkerFlags> for MarkerArgs {
    fn from(flags: MarkerFlags) -> Self {
        Self {
            package: flags.package,
            markers: flags
                .markers
                .iter()
                .flat_map(|m| split_marker_list(m))
                .collect(),
            paired_markers: flags.paired,
            marker_config: flags.marker_config,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract startup metrics from trace dumps (one per iteration)
    Analyze {
        /// Trace files, in iteration order
        #[arg(required = true, num_args = 1..)]
        traces: Vec<PathBuf>,

        #[command(flatten)]
        markers: MarkerFlags,

        /// Directory for iteration_N/ reports and the summary
        #[arg(short, long, default_value = "startup-reports")]
        output_dir: PathBuf,

        /// Print a colored summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Aggregate previously written JSON run reports
    Summarize {
        /// iteration_N/report.json files
        #[arg(required = true, num_args = 1..)]
        reports: Vec<PathBuf>,

        #[command(flatten)]
        markers: MarkerFlags,

        /// Directory for the summary reports (printed to stdout if omitted)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print a colored summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a marker config file
    Validate {
        /// Path to marker config file
        #[arg(short, long)]
        file: PathBuf,

        /// Package id to check the config against
        #[arg(short, long, env = ENV_PACKAGE)]
        package: Option<String>,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            traces,
            markers,
            output_dir,
            summary,
        } => {
            let args = AnalyzeArgs {
                marker_args: markers.into(),
                traces,
                output_dir,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Summarize {
            reports,
            markers,
            output_dir,
            summary,
        } => {
            let args = SummarizeArgs {
                marker_args: markers.into(),
                reports,
                output_dir,
                print_summary: summary,
            };

            execute_summarize(args)?;
        }

        Commands::Validate { file, package } => {
            validate_marker_config_file(&file, package)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
