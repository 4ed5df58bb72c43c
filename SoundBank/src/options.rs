//! Decode options
//!
//! Controls name length limits and block extraction for the catalog and
//! container decoders.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formats::common::DEFAULT_MAX_NAME_LEN;

/// Number of RIFF blocks extracted per container by default.
pub const DEFAULT_MAX_EXTRACTED_BLOCKS: usize = 7;

fn default_max_name_len() -> u32 {
    DEFAULT_MAX_NAME_LEN
}
fn default_max_extracted_blocks() -> usize {
    DEFAULT_MAX_EXTRACTED_BLOCKS
}
fn default_true() -> bool {
    true
}

/// Options shared by the decoders.
///
/// # Example
///
/// ```
/// use soundbank::DecodeOptions;
///
/// let options = DecodeOptions::new()
///     .with_max_extracted_blocks(3)
///     .with_output_dir(Some("out".into()));
/// assert_eq!(options.max_extracted_blocks, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Longest accepted length-prefixed name.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: u32,

    /// How many blocks of each container the commit pass hands to the sink.
    #[serde(default = "default_max_extracted_blocks")]
    pub max_extracted_blocks: usize,

    /// Write extracted blocks to disk.
    #[serde(default = "default_true")]
    pub extract_blocks: bool,

    /// Directory for extracted `.wav` files. `None` means the current directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeOptions {
    /// Defaults: 127-byte names, 7 extracted blocks, extraction enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            max_extracted_blocks: DEFAULT_MAX_EXTRACTED_BLOCKS,
            extract_blocks: true,
            output_dir: None,
        }
    }

    /// Load options from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`Error::Io`] or [`Error::JsonError`].
    ///
    /// [`Error::Io`]: crate::Error::Io
    /// [`Error::JsonError`]: crate::Error::JsonError
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Set the longest accepted name.
    #[must_use]
    pub fn with_max_name_len(mut self, max: u32) -> Self {
        self.max_name_len = max;
        self
    }

    /// Set how many blocks are extracted per container.
    #[must_use]
    pub fn with_max_extracted_blocks(mut self, max: usize) -> Self {
        self.max_extracted_blocks = max;
        self
    }

    /// Enable or disable block extraction.
    #[must_use]
    pub fn with_extract_blocks(mut self, extract: bool) -> Self {
        self.extract_blocks = extract;
        self
    }

    /// Set the extraction directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    /// Directory extracted files are written to.
    #[must_use]
    pub fn output_dir_or_current(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = DecodeOptions::default();
        assert_eq!(opts.max_name_len, 127);
        assert_eq!(opts.max_extracted_blocks, 7);
        assert!(opts.extract_blocks);
        assert_eq!(opts.output_dir_or_current(), PathBuf::from("."));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let opts: DecodeOptions = serde_json::from_str(r#"{ "max_extracted_blocks": 2 }"#).unwrap();
        assert_eq!(opts.max_extracted_blocks, 2);
        assert_eq!(opts.max_name_len, 127);
        assert!(opts.extract_blocks);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{ "extract_blocks": false, "output_dir": "wavs" }"#).unwrap();

        let opts = DecodeOptions::from_json_file(&path).unwrap();
        assert!(!opts.extract_blocks);
        assert_eq!(opts.output_dir, Some(PathBuf::from("wavs")));
    }
}
