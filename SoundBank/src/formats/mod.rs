//! Decoders for the sound metadata catalog and sound containers

pub mod catalog;
pub mod common;
pub mod container;

// Re-export common types for convenience
pub use common::{ByteCursor, FileCursor, Language, MemoryCursor, ReadPolicy};

// Re-export main document types
pub use catalog::{Catalog, CatalogEntry, SectionKind, parse_catalog_bytes, read_catalog};
pub use container::{Container, RiffBlock, parse_container_bytes, read_container};
