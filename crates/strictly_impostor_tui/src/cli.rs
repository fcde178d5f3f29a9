//! Command-line interface for strictly_impostor.

use std::path::PathBuf;

use clap::Parser;

/// Strictly Impostor - pass-and-play impostor word game
#[derive(Parser, Debug)]
#[command(name = "strictly_impostor")]
#[command(about = "Pass-and-play impostor word game for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (created on first change)
    #[arg(long, default_value = "strictly_impostor.toml")]
    pub settings: PathBuf,

    /// Word bank file replacing the built-in words
    #[arg(long)]
    pub words: Option<PathBuf>,

    /// Seed for a reproducible deal
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log file; the terminal itself is taken by the UI
    #[arg(long, default_value = "strictly_impostor.log")]
    pub log_file: PathBuf,
}
