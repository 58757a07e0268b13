//! CLI argument parsing for Linkage Reducer

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{MarkerOrder, ReduceConfig};

/// Output format for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "linkage-reducer")]
#[command(version)]
#[command(
    about = "Deduplicate linkage checker filter baselines into one filter document",
    long_about = None
)]
pub struct Cli {
    /// Baseline file: LinkageCheckerFilters root with module comments
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// File to write the reduced LinkageCheckerFilter document to
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Order of module markers inside each provenance comment
    #[arg(long = "marker-order", value_enum, default_value = "first-seen")]
    pub marker_order: MarkerOrder,

    /// Summary format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Reduction settings selected on the command line
    pub fn reduce_config(&self) -> ReduceConfig {
        ReduceConfig::default().with_marker_order(self.marker_order)
    }
}
