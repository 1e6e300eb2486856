//! CLI argument definitions for stockscope.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `generate` | Fetch prices, summarize them and optionally export |
//! | `ranges` | List the supported time ranges |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//! | `--offline` | `false` | Use deterministic synthetic prices |
//!
//! # Examples
//!
//! ```bash
//! stockscope generate AAPL --range "1 Month" --format table
//! stockscope generate AAPL,MSFT --range "1 Year" --ma 10 --ma 30 --export csv --out-dir data
//! stockscope ranges --format table
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use stockscope_core::ExportFormat;

/// Historical stock prices with summary statistics and CSV/JSON export.
#[derive(Debug, Parser)]
#[command(
    name = "stockscope",
    author,
    version,
    about = "Historical stock prices with summary statistics and export"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Use deterministic synthetic prices instead of Yahoo Finance.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    Table,
    /// Single JSON object output.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch prices for one or more tickers and summarize them.
    Generate(GenerateArgs),
    /// List the supported time ranges and their query parameters.
    Ranges,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Ticker symbols; separate with spaces or commas (e.g. AAPL,MSFT).
    #[arg(required = true, value_name = "TICKER")]
    pub tickers: Vec<String>,

    /// Time range: "1 Day", "5 Days", "1 Month" or "1 Year".
    ///
    /// Unrecognized values fall back to "1 Day".
    #[arg(long, default_value = "1 Day")]
    pub range: String,

    /// Moving-average window in samples; repeat for several windows.
    #[arg(
        long = "ma",
        value_name = "WINDOW",
        default_values_t = [20_usize],
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub moving_averages: Vec<usize>,

    /// Export the fetched prices, one file per ticker.
    #[arg(long, value_enum)]
    pub export: Option<ExportFormatArg>,

    /// Directory that receives exported files.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// Export encodings accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Json,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(value: ExportFormatArg) -> Self {
        match value {
            ExportFormatArg::Csv => Self::Csv,
            ExportFormatArg::Json => Self::Json,
        }
    }
}
