//! Catalog decoding
//!
//! Walks [`CATALOG_LAYOUT`] front to back. The first violation aborts the
//! whole decode; there is no resynchronization and no partial result.

use std::io::{Read, Seek};
use std::path::Path;

use super::schema::{
    BUCKET_FILE_LAYOUT, BUCKET_LAYOUT, CATALOG_LAYOUT, DIR_REF_LAYOUT, FILE_LAYOUT,
    LANGUAGE_LIST_A_LAYOUT, LANGUAGE_LIST_B_LAYOUT, LOCALIZED_ASSET_LAYOUT, SECTION_THREE_LAYOUT,
    SECTION_TWO_LAYOUT, SectionKind,
};
use super::{
    BucketEntry, Catalog, CatalogEntry, CatalogSection, DirRef, FileEntry, FileRef, LanguageRef,
    LocalizedAssetEntry, LocalizedVariant, SectionThreeEntry, SectionTwoEntry, SoundItemEntry,
};
use crate::error::{Error, Result};
use crate::formats::common::{ByteCursor, FileCursor, Language, MemoryCursor, NameLayout, ReadPolicy};
use crate::options::DecodeOptions;

/// Upper bound on pre-allocation driven by untrusted counts.
const MAX_PREALLOC: usize = 4096;

/// Read a catalog file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened, or any decode error.
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    tracing::info!("Decoding catalog {}", path.display());
    let mut cursor = FileCursor::open(path)?;
    decode_catalog(&mut cursor, &DecodeOptions::default())
}

/// Parse catalog data from bytes
///
/// # Errors
///
/// Returns the first schema, out-of-data or UTF-8 error encountered.
pub fn parse_catalog_bytes(data: &[u8]) -> Result<Catalog> {
    let mut cursor = MemoryCursor::from_bytes(data);
    decode_catalog(&mut cursor, &DecodeOptions::default())
}

/// Decode a catalog from the cursor's current position.
///
/// Trailing bytes after the last section are left unread.
///
/// # Errors
///
/// Returns the first schema, out-of-data or UTF-8 error encountered.
pub fn decode_catalog<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    options: &DecodeOptions,
) -> Result<Catalog> {
    let mut sections = Vec::with_capacity(CATALOG_LAYOUT.len());
    for kind in CATALOG_LAYOUT {
        sections.push(decode_section(cursor, kind, options.max_name_len)?);
    }

    let end_offset = cursor.absolute_offset();
    if !cursor.is_at_end() {
        tracing::debug!(
            "Catalog ends at 0x{end_offset:X}, {} trailing bytes ignored",
            cursor.remaining()
        );
    }

    let catalog = Catalog { sections, end_offset };
    tracing::info!("Decoded {} catalog records", catalog.entry_count());
    Ok(catalog)
}

fn decode_section<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    kind: SectionKind,
    max_name_len: u32,
) -> Result<CatalogSection> {
    let offset = cursor.absolute_offset();
    let count = cursor.read_u32()?;
    tracing::debug!(section = kind.title(), count, "catalog section at 0x{offset:X}");

    let mut entries = Vec::with_capacity((count as usize).min(MAX_PREALLOC));
    for _ in 0..count {
        entries.push(decode_record(cursor, kind, max_name_len)?);
    }
    Ok(CatalogSection { kind, offset, entries })
}

fn decode_record<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    kind: SectionKind,
    max_name_len: u32,
) -> Result<CatalogEntry> {
    match kind {
        SectionKind::Files => {
            let head = FILE_LAYOUT.read(cursor, max_name_len)?;
            let offset = cursor.absolute_offset();
            let value_type = cursor.read_u8()?;
            if value_type > 1 {
                return Err(Error::InvalidValueType { offset, value: value_type });
            }
            let dir_name = cursor.read_name(max_name_len)?;
            Ok(CatalogEntry::File(FileEntry {
                name: head.name,
                hash: head.hash,
                value_type,
                dir_name,
            }))
        }
        SectionKind::SectionTwo => {
            let head = SECTION_TWO_LAYOUT.read(cursor, max_name_len)?;
            Ok(CatalogEntry::SectionTwo(SectionTwoEntry {
                hash: head.hash,
                name: head.name,
            }))
        }
        SectionKind::SectionThree => {
            let head = SECTION_THREE_LAYOUT.read(cursor, max_name_len)?;
            Ok(CatalogEntry::SectionThree(SectionThreeEntry {
                name: head.name,
                hash: head.hash,
            }))
        }
        SectionKind::BucketsA | SectionKind::BucketsB => {
            decode_bucket(cursor, max_name_len).map(CatalogEntry::Bucket)
        }
        SectionKind::LocalizedAssets => {
            decode_localized_asset(cursor, max_name_len).map(CatalogEntry::LocalizedAsset)
        }
        SectionKind::SoundItems => decode_sound_item(cursor, max_name_len).map(CatalogEntry::SoundItem),
    }
}

fn decode_bucket<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    max_name_len: u32,
) -> Result<BucketEntry> {
    let head = BUCKET_LAYOUT.read(cursor, max_name_len)?;
    let count = cursor.read_u32()?;
    let mut files = Vec::with_capacity((count as usize).min(MAX_PREALLOC));
    for _ in 0..count {
        let file = BUCKET_FILE_LAYOUT.read(cursor, max_name_len)?;
        files.push(FileRef { hash: file.hash, name: file.name });
    }
    Ok(BucketEntry {
        dir_name: head.name,
        hash: head.hash,
        files,
    })
}

/// `f1 == 0` selects the language lists; any other value selects
/// directory references.
fn decode_localized_asset<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    max_name_len: u32,
) -> Result<LocalizedAssetEntry> {
    let head = LOCALIZED_ASSET_LAYOUT.read(cursor, max_name_len)?;
    let unk1 = cursor.read_u32()?;
    let f0 = cursor.read_u8()?;
    let f1 = cursor.read_u8()?;
    let f2 = cursor.read_u8()?;
    let unk2 = cursor.read_u32()?;

    let variant = if f1 == 0 {
        LocalizedVariant::Languages {
            list_a: decode_language_list(cursor, LANGUAGE_LIST_A_LAYOUT, max_name_len)?,
            list_b: decode_language_list(cursor, LANGUAGE_LIST_B_LAYOUT, max_name_len)?,
        }
    } else {
        let count = cursor.read_u32()?;
        let mut refs = Vec::with_capacity((count as usize).min(MAX_PREALLOC));
        for _ in 0..count {
            let dir = DIR_REF_LAYOUT.read(cursor, max_name_len)?;
            refs.push(DirRef { hash: dir.hash, dir_name: dir.name });
        }
        LocalizedVariant::DirRefs(refs)
    };

    Ok(LocalizedAssetEntry {
        name: head.name,
        hash: head.hash,
        unk1,
        f0,
        f1,
        f2,
        unk2,
        variant,
    })
}

fn decode_language_list<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    layout: NameLayout,
    max_name_len: u32,
) -> Result<Vec<LanguageRef>> {
    let count = cursor.read_u32()?;
    let mut langs = Vec::with_capacity((count as usize).min(MAX_PREALLOC));
    for _ in 0..count {
        let offset = cursor.absolute_offset();
        let entry = layout.read(cursor, max_name_len)?;
        let language = Language::from_name(&entry.name)
            .ok_or(Error::UnknownLanguage { offset, name: entry.name })?;
        langs.push(LanguageRef { language, hash: entry.hash });
    }
    Ok(langs)
}

fn decode_sound_item<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    max_name_len: u32,
) -> Result<SoundItemEntry> {
    let name = cursor.read_name(max_name_len)?;
    let num1 = cursor.read_u32()?;
    let num2 = cursor.read_u32()?;
    let item_count = cursor.read_u32()?;
    let raw = cursor.read((item_count as usize).saturating_mul(4), ReadPolicy::Exact)?;
    Ok(SoundItemEntry { name, num1, num2, item_count, raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::formats::common::code_string;

    #[derive(Default)]
    struct Bytes(Vec<u8>);

    impl Bytes {
        fn u8(mut self, v: u8) -> Self {
            self.0.push(v);
            self
        }
        fn u32(mut self, v: u32) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }
        fn name(self, s: &str) -> Self {
            let mut out = self.u32(s.len() as u32);
            out.0.extend_from_slice(s.as_bytes());
            out
        }
        fn empty_sections(mut self, n: usize) -> Self {
            for _ in 0..n {
                self = self.u32(0);
            }
            self
        }
    }

    fn file_record(b: Bytes, name: &str, hash: u32, flag: u8, dir: &str) -> Bytes {
        b.name(name).u32(hash).u8(flag).name(dir)
    }

    #[test]
    fn test_two_files_and_nothing_else() {
        let b = Bytes::default().u32(2);
        let b = file_record(b, "a.wem", 0x11111111, 0, "sfx");
        let b = file_record(b, "b.wem", 0x22222222, 1, "vo");
        let data = b.empty_sections(6).0;

        let catalog = parse_catalog_bytes(&data).unwrap();
        assert_eq!(catalog.sections.len(), 7);
        assert_eq!(catalog.entry_count(), 2);

        let files: Vec<_> = catalog.files().collect();
        assert_eq!(files[0].name, "a.wem");
        assert_eq!(files[0].dir_name, "sfx");
        assert_eq!(files[1].hash, 0x22222222);
        assert_eq!(files[1].value_type, 1);
        assert_eq!(catalog.end_offset, data.len() as u64);
    }

    #[test]
    fn test_invalid_value_type() {
        let b = Bytes::default().u32(1);
        let data = file_record(b, "a", 0, 2, "d").empty_sections(6).0;
        let err = parse_catalog_bytes(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidValueType { offset: 13, value: 2 }));
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_sections_two_three_and_buckets() {
        let data = Bytes::default()
            .u32(0)
            .u32(1)
            .u32(0xAAAA0002)
            .name("two")
            .u32(1)
            .name("three")
            .u32(0xAAAA0003)
            .u32(1)
            .u32(0xB0B0B0B0)
            .name("dirA")
            .u32(2)
            .u32(1)
            .name("x.wem")
            .u32(2)
            .name("y.wem")
            .u32(1)
            .u32(0xB1B1B1B1)
            .name("dirB")
            .u32(0)
            .empty_sections(2)
            .0;

        let catalog = parse_catalog_bytes(&data).unwrap();
        assert_eq!(
            catalog.entries(SectionKind::SectionTwo),
            &[CatalogEntry::SectionTwo(SectionTwoEntry { hash: 0xAAAA0002, name: "two".into() })]
        );
        assert_eq!(
            catalog.entries(SectionKind::SectionThree),
            &[CatalogEntry::SectionThree(SectionThreeEntry { name: "three".into(), hash: 0xAAAA0003 })]
        );

        let bucket_a: Vec<_> = catalog.buckets(SectionKind::BucketsA).collect();
        assert_eq!(bucket_a[0].dir_name, "dirA");
        assert_eq!(bucket_a[0].files.len(), 2);
        assert_eq!(bucket_a[0].files[1], FileRef { hash: 2, name: "y.wem".into() });

        let bucket_b: Vec<_> = catalog.buckets(SectionKind::BucketsB).collect();
        assert_eq!(bucket_b[0].hash, 0xB1B1B1B1);
        assert!(bucket_b[0].files.is_empty());
    }

    #[test]
    fn test_localized_languages_variant() {
        let data = Bytes::default()
            .empty_sections(5)
            .u32(1)
            .name("vo_line")
            .u32(0x12345678)
            .u32(0xCAFEBABE)
            .u8(1)
            .u8(0)
            .u8(2)
            .u32(0xFEEDFACE)
            // list A: name then hash
            .u32(2)
            .name("English(US)")
            .u32(1)
            .name("German")
            .u32(2)
            // list B: hash then name
            .u32(1)
            .u32(3)
            .name("Polish")
            .u32(0)
            .0;

        let catalog = parse_catalog_bytes(&data).unwrap();
        let asset = catalog.localized_assets().next().unwrap();
        assert_eq!((asset.f0, asset.f1, asset.f2), (1, 0, 2));
        assert_eq!(asset.unk1, 0xCAFEBABE);
        assert_eq!(asset.unk2, 0xFEEDFACE);
        assert_eq!(asset.language_codes(), Some(("EG".to_string(), "P".to_string())));

        let LocalizedVariant::Languages { list_b, .. } = &asset.variant else {
            panic!("expected language lists");
        };
        assert_eq!(list_b[0].hash, 3);
        assert_eq!(code_string(list_b.iter().map(|l| l.language)), "P");
    }

    #[test]
    fn test_localized_dir_refs_variant() {
        let data = Bytes::default()
            .empty_sections(5)
            .u32(1)
            .name("amb")
            .u32(7)
            .u32(0)
            .u8(0)
            .u8(5)
            .u8(0)
            .u32(0)
            .u32(1)
            .u32(0x99)
            .name("German")
            .u32(0)
            .0;

        let catalog = parse_catalog_bytes(&data).unwrap();
        let asset = catalog.localized_assets().next().unwrap();
        // Names in this variant are directories, never resolved as languages.
        assert_eq!(
            asset.variant,
            LocalizedVariant::DirRefs(vec![DirRef { hash: 0x99, dir_name: "German".into() }])
        );
        assert_eq!(asset.language_codes(), None);
    }

    #[test]
    fn test_unknown_language_is_fatal() {
        let data = Bytes::default()
            .empty_sections(5)
            .u32(1)
            .name("vo")
            .u32(0)
            .u32(0)
            .u8(0)
            .u8(0)
            .u8(0)
            .u32(0)
            .u32(1)
            .name("Klingon")
            .u32(0)
            .u32(0)
            .u32(0)
            .0;

        let err = parse_catalog_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(matches!(err, Error::UnknownLanguage { ref name, offset: 49 } if name == "Klingon"));
    }

    #[test]
    fn test_sound_items_blob_and_trailing_bytes() {
        let data = Bytes::default()
            .empty_sections(6)
            .u32(1)
            .name("explosion")
            .u32(0x10)
            .u32(0x20)
            .u32(2)
            .u32(0xAABBCCDD)
            .u32(0x11223344)
            .u32(0xFFFFFFFF)
            .0;

        let catalog = parse_catalog_bytes(&data).unwrap();
        let item = catalog.sound_items().next().unwrap();
        assert_eq!(item.name, "explosion");
        assert_eq!((item.num1, item.num2, item.item_count), (0x10, 0x20, 2));
        assert_eq!(item.raw, vec![0xDD, 0xCC, 0xBB, 0xAA, 0x44, 0x33, 0x22, 0x11]);
        assert_eq!(catalog.end_offset, data.len() as u64 - 4);
    }

    #[test]
    fn test_truncated_catalog_is_out_of_data() {
        let data = Bytes::default().u32(3).0;
        let err = parse_catalog_bytes(&data).unwrap_err();
        assert!(err.is_out_of_data());
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let b = Bytes::default().u32(1);
        let data = file_record(b, "a", 1, 0, "d").empty_sections(6).0;
        assert_eq!(parse_catalog_bytes(&data).unwrap(), parse_catalog_bytes(&data).unwrap());
    }
}
