//! CLI argument parsing for `cpk`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{BatchConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "cpk")]
#[command(version)]
#[command(about = "Process capability metrics (Cp, Cpk, Cpa) with quality ratings", long_about = None)]
pub struct Cli {
    /// Enable debug logging to stderr (honours RUST_LOG)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute metrics for a single process
    Calc(CalcArgs),

    /// Compute metrics for every row of a CSV file
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Process mean
    #[arg(long, allow_hyphen_values = true)]
    pub mean: String,

    /// Process standard deviation
    #[arg(long = "stddev", allow_hyphen_values = true)]
    pub std_dev: String,

    /// Upper specification limit
    #[arg(long, allow_hyphen_values = true)]
    pub usl: Option<String>,

    /// Lower specification limit
    #[arg(long, allow_hyphen_values = true)]
    pub lsl: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input CSV with a header row
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV (stdout if omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Keep going past invalid rows, leaving their metric cells empty
    #[arg(long)]
    pub skip_invalid: bool,

    /// Header of the mean column
    #[arg(long, value_name = "NAME", default_value = "mean")]
    pub mean_column: String,

    /// Header of the standard deviation column
    #[arg(long = "stddev-column", value_name = "NAME", default_value = "stddev")]
    pub std_dev_column: String,

    /// Header of the upper specification limit column
    #[arg(long, value_name = "NAME", default_value = "USL")]
    pub usl_column: String,

    /// Header of the lower specification limit column
    #[arg(long, value_name = "NAME", default_value = "LSL")]
    pub lsl_column: String,
}

impl BatchArgs {
    pub fn config(&self) -> BatchConfig {
        BatchConfig::default()
            .with_mean_column(&self.mean_column)
            .with_std_dev_column(&self.std_dev_column)
            .with_usl_column(&self.usl_column)
            .with_lsl_column(&self.lsl_column)
            .with_skip_invalid(self.skip_invalid)
    }
}
