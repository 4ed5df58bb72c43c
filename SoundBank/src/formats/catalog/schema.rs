//! Catalog layout
//!
//! The catalog has no magic, version, or section tags. Its structure is
//! entirely positional: a fixed sequence of sections, each a `u32` record
//! count followed by records of one shape. The sequence and the name/hash
//! order of every record shape are declared here and nowhere else.

use serde::Serialize;

use crate::formats::common::NameLayout;

/// One section of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SectionKind {
    /// Sound files: name, hash, value type flag, directory.
    Files,
    /// Hash + name pairs.
    SectionTwo,
    /// Name + hash pairs.
    SectionThree,
    /// First directory bucket table.
    BucketsA,
    /// Second directory bucket table (same shape as the first).
    BucketsB,
    /// Per-asset localization records.
    LocalizedAssets,
    /// Sound items with an opaque trailing blob.
    SoundItems,
}

/// Section order on disk.
pub const CATALOG_LAYOUT: [SectionKind; 7] = [
    SectionKind::Files,
    SectionKind::SectionTwo,
    SectionKind::SectionThree,
    SectionKind::BucketsA,
    SectionKind::BucketsB,
    SectionKind::LocalizedAssets,
    SectionKind::SoundItems,
];

/// Head of a sound file record.
pub const FILE_LAYOUT: NameLayout = NameLayout::NameThenHash;

/// Section 2 record.
pub const SECTION_TWO_LAYOUT: NameLayout = NameLayout::HashThenName;

/// Section 3 record.
pub const SECTION_THREE_LAYOUT: NameLayout = NameLayout::NameThenHash;

/// Head of a bucket: directory hash and name.
pub const BUCKET_LAYOUT: NameLayout = NameLayout::HashThenName;

/// Head of a localized asset record.
pub const LOCALIZED_ASSET_LAYOUT: NameLayout = NameLayout::NameThenHash;

/// File reference inside a bucket.
pub const BUCKET_FILE_LAYOUT: NameLayout = NameLayout::HashThenName;

/// First language list of a localized asset.
pub const LANGUAGE_LIST_A_LAYOUT: NameLayout = NameLayout::NameThenHash;

/// Second language list of a localized asset.
pub const LANGUAGE_LIST_B_LAYOUT: NameLayout = NameLayout::HashThenName;

/// Directory reference of a non-language localized asset.
pub const DIR_REF_LAYOUT: NameLayout = NameLayout::HashThenName;

impl SectionKind {
    /// Short label used in logs and reports.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            SectionKind::Files => "files",
            SectionKind::SectionTwo => "section 2",
            SectionKind::SectionThree => "section 3",
            SectionKind::BucketsA => "buckets A",
            SectionKind::BucketsB => "buckets B",
            SectionKind::LocalizedAssets => "localized assets",
            SectionKind::SoundItems => "sound items",
        }
    }
}
