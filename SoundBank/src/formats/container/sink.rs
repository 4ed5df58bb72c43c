//! Destinations for blocks extracted during the commit pass

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Receives the raw bytes (tag, size and payload) of extracted blocks.
///
/// Writes are eager: a failure later in the decode leaves earlier blocks
/// in place.
pub trait BlockSink {
    /// Accept block number `index` (1-based).
    ///
    /// # Errors
    /// Implementations return an error if the block cannot be stored.
    fn accept(&mut self, index: usize, raw: &[u8]) -> Result<()>;
}

/// Discards every block.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl BlockSink for NullSink {
    fn accept(&mut self, _index: usize, _raw: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// Keeps extracted blocks in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub blocks: Vec<(usize, Vec<u8>)>,
}

impl BlockSink for MemorySink {
    fn accept(&mut self, index: usize, raw: &[u8]) -> Result<()> {
        self.blocks.push((index, raw.to_vec()));
        Ok(())
    }
}

/// Writes each block to `<dir>/<source file name>__<index>.wav`.
#[derive(Debug, Clone)]
pub struct WavFileSink {
    dir: PathBuf,
    base_name: String,
    written: Vec<PathBuf>,
}

impl WavFileSink {
    /// Create a sink naming files after `source`'s file name (extension
    /// included).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, source: &Path) -> Self {
        let base_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            dir: dir.into(),
            base_name,
            written: Vec::new(),
        }
    }

    /// File name used for block `index`.
    #[must_use]
    pub fn file_name(&self, index: usize) -> String {
        format!("{}__{index}.wav", self.base_name)
    }

    /// Paths written so far, in block order.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Consume the sink, returning the written paths.
    #[must_use]
    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }
}

impl BlockSink for WavFileSink {
    fn accept(&mut self, index: usize, raw: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(self.file_name(index));
        fs::write(&path, raw)?;
        tracing::debug!("Extracted block {index} ({} bytes) to {}", raw.len(), path.display());
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_file_names_keep_source_extension() {
        let sink = WavFileSink::new("out", Path::new("/data/sfx/blast.snd"));
        assert_eq!(sink.file_name(1), "blast.snd__1.wav");
        assert_eq!(sink.file_name(7), "blast.snd__7.wav");
    }

    #[test]
    fn test_wav_file_sink_writes() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = WavFileSink::new(dir.path().join("nested"), Path::new("a.bin"));
        sink.accept(1, b"RIFF").unwrap();

        assert_eq!(sink.written().len(), 1);
        assert_eq!(fs::read(&sink.written()[0]).unwrap(), b"RIFF");
        assert!(sink.written()[0].ends_with("a.bin__1.wav"));
    }
}
