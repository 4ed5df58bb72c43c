use clap::Subcommand;
use std::path::PathBuf;

pub mod catalog;
pub mod container;
mod execute;

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a sound metadata catalog
    Catalog {
        /// Catalog file
        #[arg(default_value = "soundmetadata.bin")]
        source: PathBuf,

        /// Print the decoded catalog as JSON
        #[arg(long)]
        json: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Decode a sound container and extract its WAV blocks
    Container {
        /// Container file
        source: PathBuf,

        /// Output directory for extracted blocks (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Decode only, do not write any files
        #[arg(long)]
        no_extract: bool,

        /// Print the decoded container as JSON
        #[arg(long)]
        json: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
}
