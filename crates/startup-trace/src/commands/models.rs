use crate::parser::schema::PairedMarkerSpec;
use std::path::PathBuf;

/// Marker selection shared by the analyze and summarize commands
///
/// CLI markers are merged on top of the marker-config file, and the CLI
/// package wins over the one named in the file.
#[derive(Debug, Clone, Default)]
pub struct MarkerArgs {
    /// App package id
    pub package: Option<String>,

    /// Custom markers from the command line
    pub markers: Vec<String>,

    /// Paired markers from the command line
    pub paired_markers: Vec<PairedMarkerSpec>,

    /// Optional marker-config file (JSON or TOML)
    pub marker_config: Option<PathBuf>,
}

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Marker selection
    pub marker_args: MarkerArgs,

    /// Trace dumps, one per iteration, in iteration order
    pub traces: Vec<PathBuf>,

    /// Directory receiving `iteration_N/` reports and the summary
    pub output_dir: PathBuf,

    /// Print a colored summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            marker_args: MarkerArgs::default(),
            traces: Vec::new(),
            output_dir: PathBuf::from("startup-reports"),
            print_summary: false,
        }
    }
}

/// Arguments for the summarize command
#[derive(Debug, Clone, Default)]
pub struct SummarizeArgs {
    /// Marker selection; the package defaults to the one in the reports
    pub marker_args: MarkerArgs,

    /// JSON run reports written by earlier analyze runs
    pub reports: Vec<PathBuf>,

    /// Directory for `summary_report.txt` and `summary.json`; printed to stdout when unset
    pub output_dir: Option<PathBuf>,

    /// Print a colored summary to stdout
    pub print_summary: bool,
}
