//! Line-oriented text dumps of decoded catalogs and containers
//!
//! Field order follows the on-disk order of each record. Hashes and offsets
//! print as 8-digit uppercase hex.

use std::fmt::Write as _;
use std::io::Write;

use crate::error::Result;
use crate::formats::catalog::{
    BucketEntry, Catalog, CatalogEntry, CatalogSection, LocalizedAssetEntry, LocalizedVariant,
    SectionKind,
};
use crate::formats::common::code_string;
use crate::formats::container::{ChunkBody, Container, RiffBlock, ScanPass};

const RULE: &str = "============================================";

/// Write the catalog dump.
///
/// # Errors
/// Returns [`Error::Io`](crate::Error::Io) if writing fails.
pub fn write_catalog_report<W: Write>(catalog: &Catalog, out: &mut W) -> Result<()> {
    for section in &catalog.sections {
        write_section(section, out)?;
    }
    Ok(())
}

/// Render the catalog dump to a string.
#[must_use]
pub fn catalog_report(catalog: &Catalog) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_catalog_report(catalog, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_section<W: Write>(section: &CatalogSection, out: &mut W) -> Result<()> {
    let count = section.entries.len();
    match section.kind {
        SectionKind::Files => writeln!(out, "fcnt={count}")?,
        SectionKind::SectionTwo => writeln!(out, "====== fcnt={count}  =============")?,
        SectionKind::SectionThree => writeln!(out, "====== fcnt={count}  ====================")?,
        SectionKind::BucketsA | SectionKind::BucketsB => writeln!(out, "======== bcnt={count} {RULE}")?,
        SectionKind::LocalizedAssets | SectionKind::SoundItems => {
            writeln!(out, "======== fcnt={count} {RULE}")?;
        }
    }

    for (num, entry) in section.entries.iter().enumerate() {
        match entry {
            CatalogEntry::File(f) => {
                writeln!(out, "{:08X} [{}] {}/{}", f.hash, f.value_type, f.dir_name, f.name)?;
            }
            CatalogEntry::SectionTwo(e) => writeln!(out, "{:08X}: {}", e.hash, e.name)?,
            CatalogEntry::SectionThree(e) => writeln!(out, "{:08X}: {}", e.hash, e.name)?,
            CatalogEntry::Bucket(b) => write_bucket(b, out)?,
            CatalogEntry::LocalizedAsset(a) => write_localized_asset(a, num, count, out)?,
            CatalogEntry::SoundItem(s) => writeln!(
                out,
                "0x{:02X} 0x{:02X} [items = {:04}] : {}",
                s.num1, s.num2, s.item_count, s.name
            )?,
        }
    }
    Ok(())
}

fn write_bucket<W: Write>(bucket: &BucketEntry, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "====== {:08X}: \"{}\" (fcnt={}) ====================",
        bucket.hash,
        bucket.dir_name,
        bucket.files.len()
    )?;
    for file in &bucket.files {
        writeln!(out, "{:08X}:  {}", file.hash, file.name)?;
    }
    Ok(())
}

fn write_localized_asset<W: Write>(
    asset: &LocalizedAssetEntry,
    num: usize,
    count: usize,
    out: &mut W,
) -> Result<()> {
    writeln!(
        out,
        "{:08X}: {:08X} {}-{}-{} {:08X} \"{}\"  [{num}/{count}]",
        asset.hash, asset.unk1, asset.f0, asset.f1, asset.f2, asset.unk2, asset.name
    )?;
    match &asset.variant {
        LocalizedVariant::Languages { list_a, list_b } => {
            for list in [list_a, list_b] {
                for lang in list {
                    writeln!(out, "  {:08X}: {}", lang.hash, lang.language)?;
                }
                writeln!(out, "  {}", code_string(list.iter().map(|l| l.language)))?;
            }
        }
        LocalizedVariant::DirRefs(refs) => {
            for dir in refs {
                writeln!(out, "  {:08X}: {}", dir.hash, dir.dir_name)?;
            }
        }
    }
    Ok(())
}

/// Write the container dump.
///
/// # Errors
/// Returns [`Error::Io`](crate::Error::Io) if writing fails.
pub fn write_container_report<W: Write>(container: &Container, out: &mut W) -> Result<()> {
    let header = &container.header;
    writeln!(out, "ver={}", header.version)?;
    writeln!(out, "xsize={:08X}", header.total_size)?;
    writeln!(
        out,
        "hdr_size={:08X}  hdr_end={:08X}",
        header.header_size,
        header.header_end()
    )?;

    for block in &container.probe_blocks {
        write_block(block, ScanPass::Probe, out)?;
    }
    if container.header_only {
        writeln!(out, "END of data (pos = 0x{:08X})", container.end_offset)?;
        return Ok(());
    }
    for block in &container.blocks {
        write_block(block, ScanPass::Commit, out)?;
    }

    writeln!(out, "===== aux_num={} {RULE}", container.aux.count)?;
    for record in &container.aux.records {
        writeln!(out, "{:08X}: {}", record.offset, hex(&record.raw))?;
    }
    writeln!(out, "========================================================")?;
    writeln!(out, "blk end = {:X}", container.end_offset)?;
    Ok(())
}

/// Render the container dump to a string.
#[must_use]
pub fn container_report(container: &Container) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_container_report(container, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_block<W: Write>(block: &RiffBlock, pass: ScanPass, out: &mut W) -> Result<()> {
    let pass = match pass {
        ScanPass::Probe => "probe",
        ScanPass::Commit => "commit",
    };
    writeln!(
        out,
        "{:08X}: RIFF-WAVE with size = 0x{:X} <{pass}>",
        block.start_offset, block.size
    )?;
    for chunk in &block.sub_chunks {
        writeln!(out, "  {:4}: size = 0x{:X}", chunk.tag.as_str(), chunk.size)?;
        if let ChunkBody::List(list) = &chunk.body {
            writeln!(
                out,
                "    MARKER: \"{}\" (type = 0x{:X})",
                list.marker.name, list.marker.kind
            )?;
            if !list.tail.is_empty() {
                writeln!(out, "    RAWDATA: {}", hex(&list.tail))?;
            }
        }
    }
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}
