//! Error types for `SoundBank`

use thiserror::Error;

/// Broad classification of an [`Error`].
///
/// Decoding failures fall into three families: structural rule violations
/// ([`ErrorKind::Schema`]), truncated input ([`ErrorKind::OutOfData`]) and
/// strings that are not UTF-8 ([`ErrorKind::Decode`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A structural rule of the format was violated.
    Schema,
    /// An exact-length read found fewer bytes than required.
    OutOfData,
    /// Bytes were not valid UTF-8 where a string was expected.
    Decode,
    /// Underlying file system error.
    Io,
    /// The API was called with arguments it cannot honor.
    Usage,
}

/// The error type for `SoundBank` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Cursor Errors ====================
    /// An exact-length read ran past the end of the source.
    #[error("EOF at pos = 0x{offset:X} (needed {requested} bytes, {available} available)")]
    OutOfData {
        /// Absolute offset where the read started.
        offset: u64,
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes that were actually available.
        available: usize,
    },

    /// A string field did not hold valid UTF-8.
    #[error("incorrect string {bytes:02X?} at 0x{offset:X}")]
    InvalidString {
        /// Absolute offset of the string bytes.
        offset: u64,
        /// The raw bytes that failed to decode.
        bytes: Vec<u8>,
    },

    /// A length-prefixed name declared a length outside `1..=max`.
    #[error("incorrect name size = 0x{length:X} at 0x{offset:X} (max {max})")]
    InvalidNameLength {
        /// Absolute offset just after the length field.
        offset: u64,
        /// The declared length.
        length: u64,
        /// The maximum allowed length.
        max: u32,
    },

    /// Integer width outside the supported `1..=8` range.
    #[error("unsupported integer width: {width} bytes")]
    InvalidIntWidth {
        /// The requested width.
        width: usize,
    },

    // ==================== Catalog Errors ====================
    /// The file entry flag byte was neither 0 nor 1.
    #[error("incorrect value type = {value} at 0x{offset:X}")]
    InvalidValueType {
        /// Absolute offset of the flag byte.
        offset: u64,
        /// The flag value found.
        value: u8,
    },

    /// A language list referenced a language name outside the fixed table.
    #[error("unknown language '{name}' at 0x{offset:X}")]
    UnknownLanguage {
        /// Absolute offset of the language record.
        offset: u64,
        /// The unresolvable name.
        name: String,
    },

    // ==================== Container Errors ====================
    /// A four-byte magic did not match.
    #[error("expected \"{expected}\", but read {found:?} at 0x{offset:X}")]
    InvalidMagic {
        /// Absolute offset of the magic.
        offset: u64,
        /// The expected magic.
        expected: &'static str,
        /// The bytes read instead.
        found: Vec<u8>,
    },

    /// A RIFF block declared a size too small to hold its own header.
    #[error("RIFF size = {size} too small at 0x{offset:X} (minimum {min})")]
    RiffTooSmall {
        /// Absolute offset of the block.
        offset: u64,
        /// The declared size.
        size: u32,
        /// The minimum accepted size.
        min: u32,
    },

    /// A sub-chunk tag outside the accepted set.
    #[error("incorrect area name = {tag:?} at 0x{offset:X}")]
    UnknownChunkTag {
        /// Absolute offset of the sub-chunk header.
        offset: u64,
        /// The trimmed tag text.
        tag: String,
    },

    /// A LIST marker record declared a size that cannot hold its type field.
    #[error("marker record size = {size} too small at 0x{offset:X}")]
    MarkerTooSmall {
        /// Absolute offset of the marker record.
        offset: u64,
        /// The declared size.
        size: u32,
    },

    // ==================== Configuration Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::OutOfData { .. } => ErrorKind::OutOfData,
            Error::InvalidString { .. } => ErrorKind::Decode,
            Error::InvalidNameLength { .. }
            | Error::InvalidValueType { .. }
            | Error::UnknownLanguage { .. }
            | Error::InvalidMagic { .. }
            | Error::RiffTooSmall { .. }
            | Error::UnknownChunkTag { .. }
            | Error::MarkerTooSmall { .. } => ErrorKind::Schema,
            Error::InvalidIntWidth { .. } | Error::JsonError(_) => ErrorKind::Usage,
        }
    }

    /// Absolute byte offset the error refers to, if any.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        match self {
            Error::OutOfData { offset, .. }
            | Error::InvalidString { offset, .. }
            | Error::InvalidNameLength { offset, .. }
            | Error::InvalidValueType { offset, .. }
            | Error::UnknownLanguage { offset, .. }
            | Error::InvalidMagic { offset, .. }
            | Error::RiffTooSmall { offset, .. }
            | Error::UnknownChunkTag { offset, .. }
            | Error::MarkerTooSmall { offset, .. } => Some(*offset),
            Error::Io(_) | Error::InvalidIntWidth { .. } | Error::JsonError(_) => None,
        }
    }

    /// True if this is an [`ErrorKind::OutOfData`] failure.
    #[must_use]
    pub fn is_out_of_data(&self) -> bool {
        self.kind() == ErrorKind::OutOfData
    }
}

/// A specialized Result type for `SoundBank` operations.
pub type Result<T> = std::result::Result<T, Error>;
