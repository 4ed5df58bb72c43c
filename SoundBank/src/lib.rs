//! # SoundBank
//!
//! A pure-Rust reader for game sound metadata catalogs and the sound
//! containers that bundle RIFF/WAVE audio.
//!
//! ## Supported Formats
//!
//! - **Sound metadata catalog** - Files, directory buckets, localized assets and sound items
//! - **Sound containers** - Embedded RIFF/WAVE blocks, LIST markers and the auxiliary offset table
//!
//! ## Quick Start
//!
//! ### Reading the Catalog
//!
//! ```no_run
//! use soundbank::formats::catalog::read_catalog;
//!
//! let catalog = read_catalog("soundmetadata.bin")?;
//! for file in catalog.files() {
//!     println!("{:08X} {}/{}", file.hash, file.dir_name, file.name);
//! }
//! # Ok::<(), soundbank::Error>(())
//! ```
//!
//! ### Extracting Container Blocks
//!
//! ```no_run
//! use soundbank::DecodeOptions;
//! use soundbank::formats::container::read_container;
//!
//! let options = DecodeOptions::new().with_output_dir(Some("out".into()));
//! let decoded = read_container("ambience.snd", &options)?;
//! println!("{} blocks, {} files written", decoded.container.blocks.len(), decoded.extracted.len());
//! # Ok::<(), soundbank::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `soundbank` command-line binary

pub mod error;
pub mod formats;
pub mod options;
pub mod report;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};
pub use options::DecodeOptions;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::formats::catalog::{
        Catalog, CatalogEntry, CatalogSection, SectionKind, decode_catalog, parse_catalog_bytes,
        read_catalog,
    };
    pub use crate::formats::common::{ByteCursor, FileCursor, Language, MemoryCursor, ReadPolicy};
    pub use crate::formats::container::{
        BlockSink, Container, DecodedContainer, NullSink, RiffBlock, WavFileSink, decode_container,
        parse_container_bytes, read_container,
    };
    pub use crate::options::DecodeOptions;
    pub use crate::report::{write_catalog_report, write_container_report};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
