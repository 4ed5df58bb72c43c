//! Command execution implementations

use super::Commands;
use super::{catalog, container};
use crate::options::DecodeOptions;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, options: &DecodeOptions) -> anyhow::Result<()> {
        match self {
            Commands::Catalog {
                source,
                json,
                quiet,
            } => catalog::execute(source, options, *json, *quiet),
            Commands::Container {
                source,
                output,
                no_extract,
                json,
                quiet,
            } => {
                let mut options = options.clone();
                if output.is_some() {
                    options = options.with_output_dir(output.clone());
                }
                if *no_extract {
                    options = options.with_extract_blocks(false);
                }
                container::execute(source, &options, *json, *quiet)
            }
        }
    }
}
