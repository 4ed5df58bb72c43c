//! Shared building blocks for the catalog and container decoders

pub mod cursor;
pub mod language;
pub mod name;

pub use cursor::{ByteCursor, DEFAULT_MAX_NAME_LEN, FileCursor, MemoryCursor, ReadPolicy};
pub use language::{Language, UnknownLanguageName, code_string};
pub use name::{HashedName, NameLayout};

/// Serialize raw byte fields as base64 text in JSON output.
pub(crate) fn serialize_base64<S: serde::Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    use base64::Engine;
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
}
