//! SoundBank CLI - Command-line interface for the catalog and container decoders

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use commands::Commands;

use crate::options::DecodeOptions;

#[derive(Parser)]
#[command(name = "soundbank")]
#[command(about = "SoundBank: sound metadata and container decoder", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with decode options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Run the SoundBank CLI
///
/// # Errors
/// Returns an error if the options file cannot be loaded or the command fails.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let options = match &cli.config {
        Some(path) => DecodeOptions::from_json_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => DecodeOptions::default(),
    };
    cli.command.execute(&options)?;

    Ok(())
}
