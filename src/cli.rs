use std::path::PathBuf;

use clap::Parser;

use crate::config::MAX_DPI;

/// Output file used when none is given.
pub const DEFAULT_OUTPUT: &str = "violin_plot.png";

/// Shown with `--help` and with every usage error, such as a missing file.
const USAGE: &str = "violin-compare [OPTIONS] <MINICORE_FILE> <COMPOSITECORE_FILE> [OUTPUT_FILE]

Example: violin-compare Minicore Compositecore violin_plot.png";

#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Compare two sample files with a violin plot",
    long_about = None,
    arg_required_else_help = true,
    override_usage = USAGE
)]
pub struct CliArgs {
    /// Minicore samples, one number per line
    pub minicore_file: PathBuf,

    /// Compositecore samples, one number per line
    pub compositecore_file: PathBuf,

    /// Where to write the PNG
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output_file: PathBuf,

    /// JSON plot configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output resolution, overrides the configuration
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DPI)))]
    pub dpi: Option<u32>,

    /// Seed for the horizontal jitter, overrides the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write per-group summary statistics as JSON
    #[arg(long, value_name = "FILE")]
    pub stats_json: Option<PathBuf>,

    /// Also write the labeled table as CSV
    #[arg(long, value_name = "FILE")]
    pub table_csv: Option<PathBuf>,

    /// Open an interactive viewer after saving
    #[arg(long)]
    pub show: bool,
}
