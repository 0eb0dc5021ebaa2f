//! Command-line arguments for the EchoTicker client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Tickers to start with, separated by commas (e.g. `aapl,msft`).
    #[clap(long)]
    pub tickers: Option<String>,

    /// Path to a text file with tickers to start with.
    /// Tickers may be separated by commas, spaces, or new lines.
    #[clap(long)]
    pub path: Option<String>,

    /// Model name, overriding `ECHO_MODEL`.
    #[clap(long)]
    pub model: Option<String>,

    /// Do not call the model; every report is the offline template report.
    #[clap(long)]
    pub offline: bool,

    /// Generate one report for the starting tickers and exit.
    #[clap(long)]
    pub generate: bool,

    /// Print the synthetic data behind each report as JSON.
    #[clap(long)]
    pub dump_series: bool,

    /// Lower bound of the requested report length, in words.
    #[clap(long, default_value_t = 400)]
    pub words_min: u32,

    /// Upper bound of the requested report length, in words.
    #[clap(long, default_value_t = 600)]
    pub words_max: u32,
}
