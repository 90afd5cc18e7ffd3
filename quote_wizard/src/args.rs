//! Command-line arguments for the loan quote wizard.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// How snapshots are printed after every accepted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum OutputFormat {
    /// Human-readable summary.
    Text,
    /// One JSON object per snapshot.
    Json,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to a JSON file with pricing rates and catalogs.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Reference price answered for every symbol, overrides the config file.
    #[clap(long)]
    pub stub_price: Option<f64>,

    /// Start the session with the wallet already connected.
    #[clap(long)]
    pub wallet_connected: bool,

    /// Output format for wizard snapshots.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}
