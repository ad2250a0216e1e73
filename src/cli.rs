//! CLI argument parsing for fimcheck

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for comparison reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary lines on stdout, CSV line on stderr (default)
    Text,
    /// JSON document on stdout
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "fimcheck")]
#[command(version)]
#[command(about = "Validate approximate frequent itemsets against exact results", long_about = None)]
pub struct Cli {
    /// Print debug traces to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare sample results against exact results
    Compare {
        /// Accuracy guarantee of the sampling algorithm
        #[arg(value_name = "EPSILON", allow_negative_numbers = true)]
        epsilon: f64,

        /// Minimum frequency threshold
        #[arg(value_name = "MINFREQ", allow_negative_numbers = true)]
        min_freq: f64,

        /// Exact results, ITEMS<TAB>FREQ per line
        #[arg(value_name = "LARGERESULTS", value_parser = existing_file)]
        large: PathBuf,

        /// Sample results, ITEMS(FREQ, LOWER, UPPER) per line
        #[arg(value_name = "SAMPLERESULTS", value_parser = existing_file)]
        sample: PathBuf,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,

        /// Explain the guarantee verdict on stderr
        #[arg(long)]
        explain: bool,
    },

    /// Sort items within each sample itemset and lines by descending frequency
    Sort {
        /// Sample results to canonicalize
        #[arg(value_name = "FILE", value_parser = existing_file)]
        file: PathBuf,
    },
}

/// Accept only paths naming an existing regular file
fn existing_file(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("{} does not exist, or is not a file", arg))
    }
}
