//! Sound metadata catalog
//!
//! Flat little-endian file (usually `soundmetadata.bin`) listing sound files,
//! directories and per-language variants. See [`schema`] for the section
//! sequence.

mod reader;
pub mod schema;

pub use reader::{decode_catalog, parse_catalog_bytes, read_catalog};
pub use schema::{CATALOG_LAYOUT, SectionKind};

use serde::Serialize;

use crate::formats::common::{Language, code_string, serialize_base64};

/// A sound file record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub hash: u32,
    /// Flag byte, always 0 or 1.
    pub value_type: u8,
    pub dir_name: String,
}

/// A hash + name record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionTwoEntry {
    pub hash: u32,
    pub name: String,
}

/// A name + hash record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionThreeEntry {
    pub name: String,
    pub hash: u32,
}

/// File reference inside a [`BucketEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRef {
    pub hash: u32,
    pub name: String,
}

/// A directory and the files it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketEntry {
    pub dir_name: String,
    pub hash: u32,
    pub files: Vec<FileRef>,
}

/// A resolved language with its per-language hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageRef {
    pub language: Language,
    pub hash: u32,
}

/// Directory reference of a non-language localized asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirRef {
    pub hash: u32,
    pub dir_name: String,
}

/// Payload of a [`LocalizedAssetEntry`], selected by its `f1` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LocalizedVariant {
    /// `f1 == 0`: two language lists.
    Languages {
        list_a: Vec<LanguageRef>,
        list_b: Vec<LanguageRef>,
    },
    /// `f1 != 0`: directory references.
    DirRefs(Vec<DirRef>),
}

/// A localized asset record.
///
/// `unk1`, `f0`..`f2` and `unk2` are kept opaque; only `f1` has a known role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedAssetEntry {
    pub name: String,
    pub hash: u32,
    pub unk1: u32,
    pub f0: u8,
    pub f1: u8,
    pub f2: u8,
    pub unk2: u32,
    pub variant: LocalizedVariant,
}

/// A sound item with its undecoded item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoundItemEntry {
    pub name: String,
    pub num1: u32,
    pub num2: u32,
    pub item_count: u32,
    /// `item_count * 4` raw bytes.
    #[serde(serialize_with = "serialize_base64")]
    pub raw: Vec<u8>,
}

/// Any catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogEntry {
    File(FileEntry),
    SectionTwo(SectionTwoEntry),
    SectionThree(SectionThreeEntry),
    Bucket(BucketEntry),
    LocalizedAsset(LocalizedAssetEntry),
    SoundItem(SoundItemEntry),
}

/// Records of one section, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSection {
    pub kind: SectionKind,
    /// Absolute offset of the section's count field.
    pub offset: u64,
    pub entries: Vec<CatalogEntry>,
}

/// A fully decoded catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    /// Sections in [`CATALOG_LAYOUT`] order.
    pub sections: Vec<CatalogSection>,
    /// Position where decoding stopped. Bytes after it are not examined.
    pub end_offset: u64,
}

impl LocalizedAssetEntry {
    /// Language codes of both lists, e.g. `("EFG", "EF")`.
    ///
    /// Returns `None` for the directory-reference variant.
    #[must_use]
    pub fn language_codes(&self) -> Option<(String, String)> {
        match &self.variant {
            LocalizedVariant::Languages { list_a, list_b } => Some((
                code_string(list_a.iter().map(|l| l.language)),
                code_string(list_b.iter().map(|l| l.language)),
            )),
            LocalizedVariant::DirRefs(_) => None,
        }
    }
}

impl Catalog {
    /// The section of the given kind.
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&CatalogSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Entries of the given section, empty if absent.
    #[must_use]
    pub fn entries(&self, kind: SectionKind) -> &[CatalogEntry] {
        self.section(kind).map_or(&[], |s| s.entries.as_slice())
    }

    /// Total number of records across all sections.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// Sound file records.
    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries(SectionKind::Files).iter().filter_map(|e| match e {
            CatalogEntry::File(f) => Some(f),
            _ => None,
        })
    }

    /// Bucket records of the first or second bucket table.
    pub fn buckets(&self, kind: SectionKind) -> impl Iterator<Item = &BucketEntry> {
        self.entries(kind).iter().filter_map(|e| match e {
            CatalogEntry::Bucket(b) => Some(b),
            _ => None,
        })
    }

    /// Localized asset records.
    pub fn localized_assets(&self) -> impl Iterator<Item = &LocalizedAssetEntry> {
        self.entries(SectionKind::LocalizedAssets).iter().filter_map(|e| match e {
            CatalogEntry::LocalizedAsset(a) => Some(a),
            _ => None,
        })
    }

    /// Sound item records.
    pub fn sound_items(&self) -> impl Iterator<Item = &SoundItemEntry> {
        self.entries(SectionKind::SoundItems).iter().filter_map(|e| match e {
            CatalogEntry::SoundItem(s) => Some(s),
            _ => None,
        })
    }
}
