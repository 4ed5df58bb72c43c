//! Container decoding
//!
//! Both block scans share [`scan_blocks`]; the [`ScanPass`] decides the read
//! strictness, the stopping boundary and what happens at a `data` chunk.

use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::marker::decode_marker_list;
use super::sink::{BlockSink, NullSink, WavFileSink};
use super::{
    AUX_OFFSET_BIAS, AUX_RECORD_DATA_LEN, AuxRecord, AuxTable, ChunkBody, ChunkTag, Container,
    ContainerHeader, MIN_RIFF_SIZE, RIFF_MAGIC, RiffBlock, ScanPass, SubChunk, WAVE_MAGIC,
};
use crate::error::{Error, Result};
use crate::formats::common::{ByteCursor, FileCursor, MemoryCursor, ReadPolicy};
use crate::options::DecodeOptions;

/// Upper bound on pre-allocation driven by untrusted counts.
const MAX_PREALLOC: usize = 4096;

/// Why a block scan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEnd {
    /// Probe pass reached the header end.
    HeaderEnd,
    /// Commit pass reached the block end.
    BlockEnd,
    /// The input ran out at a block boundary.
    EndOfInput,
}

/// Result of one block scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockScan {
    pub blocks: Vec<RiffBlock>,
    pub end: ScanEnd,
}

/// A container decoded from disk together with the files it produced.
#[derive(Debug, Clone)]
pub struct DecodedContainer {
    pub container: Container,
    /// Extracted block files, in block order.
    pub extracted: Vec<PathBuf>,
}

/// Read a container file from disk, extracting blocks as `options` asks.
///
/// Extracted blocks are written to [`DecodeOptions::output_dir`] (or the
/// current directory) and named after the source file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or a block cannot be
/// written, or any decode error.
pub fn read_container<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<DecodedContainer> {
    let path = path.as_ref();
    tracing::info!("Decoding container {}", path.display());
    let mut cursor = FileCursor::open(path)?;

    if options.extract_blocks {
        let mut sink = WavFileSink::new(options.output_dir_or_current(), path);
        let container = decode_container(&mut cursor, options, &mut sink)?;
        Ok(DecodedContainer {
            container,
            extracted: sink.into_written(),
        })
    } else {
        let container = decode_container(&mut cursor, options, &mut NullSink)?;
        Ok(DecodedContainer {
            container,
            extracted: Vec::new(),
        })
    }
}

/// Parse container data from bytes without extracting anything.
///
/// # Errors
///
/// Returns the first schema, out-of-data or UTF-8 error encountered.
pub fn parse_container_bytes(data: &[u8]) -> Result<Container> {
    let mut cursor = MemoryCursor::from_bytes(data);
    decode_container(&mut cursor, &DecodeOptions::default(), &mut NullSink)
}

/// Decode a container from the cursor's current position.
///
/// Runs the probe pass, then (unless the input ended with the header
/// region) the commit pass and the auxiliary table. The first
/// [`DecodeOptions::max_extracted_blocks`] committed blocks go to `sink`.
///
/// # Errors
///
/// Returns the first schema, out-of-data, UTF-8 or sink error encountered.
/// Blocks already handed to `sink` stay there.
pub fn decode_container<R, S>(
    cursor: &mut ByteCursor<R>,
    options: &DecodeOptions,
    sink: &mut S,
) -> Result<Container>
where
    R: Read + Seek,
    S: BlockSink + ?Sized,
{
    let header = read_header(cursor)?;
    let blocks_start = cursor.current_offset();
    tracing::debug!(
        version = header.version,
        "header end = 0x{:X}, block end = 0x{:X}",
        header.header_end(),
        header.block_end()
    );

    let probe = scan_blocks(cursor, &header, ScanPass::Probe, &mut NullSink, 0)?;
    if probe.end == ScanEnd::EndOfInput || cursor.is_at_end() {
        tracing::warn!(
            "Header-only container: {} block headers, no data region",
            probe.blocks.len()
        );
        return Ok(Container {
            header,
            probe_blocks: probe.blocks,
            blocks: Vec::new(),
            aux: AuxTable::default(),
            header_only: true,
            end_offset: cursor.absolute_offset(),
        });
    }

    cursor.seek(SeekFrom::Start(blocks_start))?;
    let commit = scan_blocks(
        cursor,
        &header,
        ScanPass::Commit,
        sink,
        options.max_extracted_blocks,
    )?;
    if commit.blocks.len() != probe.blocks.len() {
        tracing::debug!(
            "probe saw {} blocks, commit saw {}",
            probe.blocks.len(),
            commit.blocks.len()
        );
    }

    let aux = decode_aux(cursor, &header)?;
    let container = Container {
        header,
        probe_blocks: probe.blocks,
        blocks: commit.blocks,
        aux,
        header_only: false,
        end_offset: cursor.absolute_offset(),
    };
    tracing::info!(
        "Decoded {} blocks, {} aux records",
        container.blocks.len(),
        container.aux.records.len()
    );
    Ok(container)
}

/// Read the 12-byte container header.
///
/// # Errors
///
/// Returns [`Error::OutOfData`] if the header is truncated.
pub fn read_header<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<ContainerHeader> {
    let start = cursor.absolute_offset();
    Ok(ContainerHeader {
        start,
        version: cursor.read_u32()?,
        total_size: cursor.read_u32()?,
        header_size: cursor.read_u32()?,
    })
}

/// Scan RIFF/WAVE blocks from the cursor's position.
///
/// [`ScanPass::Probe`] stops at the header end, reads blocks leniently and
/// seeks to each block's data payload instead of reading it.
/// [`ScanPass::Commit`] stops at the block end, reads everything exactly
/// and passes the first `max_extract` blocks to `sink`. Both stop without
/// error when the input ends at a block boundary.
///
/// # Errors
///
/// Returns the first schema, out-of-data, UTF-8 or sink error encountered.
pub fn scan_blocks<R, S>(
    cursor: &mut ByteCursor<R>,
    header: &ContainerHeader,
    pass: ScanPass,
    sink: &mut S,
    max_extract: usize,
) -> Result<BlockScan>
where
    R: Read + Seek,
    S: BlockSink + ?Sized,
{
    let mut blocks = Vec::new();
    loop {
        let pos = cursor.absolute_offset();
        let end = match pass {
            ScanPass::Probe if pos >= header.header_end() => Some(ScanEnd::HeaderEnd),
            ScanPass::Commit if pos >= header.block_end() => Some(ScanEnd::BlockEnd),
            _ if cursor.is_at_end() => Some(ScanEnd::EndOfInput),
            _ => None,
        };
        if let Some(end) = end {
            tracing::debug!("{pass:?} pass stopped at 0x{pos:X} ({end:?})");
            return Ok(BlockScan { blocks, end });
        }

        let block_start = cursor.current_offset();
        let mut riff = read_block(cursor, pass)?;

        if pass == ScanPass::Commit {
            let index = blocks.len() + 1;
            if index <= max_extract {
                sink.accept(index, riff.as_bytes())?;
            } else if index == max_extract + 1 {
                tracing::warn!("Extraction limit of {max_extract} blocks reached");
            }
        }

        let (block, data_payload) = parse_block(&mut riff, pass)?;
        if let Some(payload_offset) = data_payload {
            cursor.seek(SeekFrom::Start(block_start + payload_offset))?;
        }
        blocks.push(block);
    }
}

/// Validate a block's magic and size, then read the whole block into its
/// own cursor.
fn read_block<R: Read + Seek>(cursor: &mut ByteCursor<R>, pass: ScanPass) -> Result<MemoryCursor> {
    let start = cursor.absolute_offset();
    let magic = cursor.read_array::<4>()?;
    if &magic != RIFF_MAGIC {
        return Err(Error::InvalidMagic {
            offset: start,
            expected: "RIFF",
            found: magic.to_vec(),
        });
    }
    let size = cursor.read_u32()?;
    if size < MIN_RIFF_SIZE {
        return Err(Error::RiffTooSmall {
            offset: start,
            size,
            min: MIN_RIFF_SIZE,
        });
    }

    cursor.seek(SeekFrom::Current(-8))?;
    let raw = cursor.read(size as usize + 8, pass.read_policy())?;
    Ok(MemoryCursor::from_bytes(raw).with_base(start))
}

/// Walk the sub-chunks of a block.
///
/// Returns the block and, for a probe pass that met a `data` chunk, the
/// block-relative offset of the data payload.
fn parse_block(riff: &mut MemoryCursor, pass: ScanPass) -> Result<(RiffBlock, Option<u64>)> {
    let start_offset = riff.absolute_offset();
    riff.skip(4)?;
    let size = riff.read_u32()?;

    let form_offset = riff.absolute_offset();
    let form = riff.read_array::<4>()?;
    if &form != WAVE_MAGIC {
        return Err(Error::InvalidMagic {
            offset: form_offset,
            expected: "WAVE",
            found: form.to_vec(),
        });
    }
    tracing::debug!("0x{start_offset:08X}: RIFF-WAVE with size = 0x{size:X}");

    let mut sub_chunks = Vec::new();
    let mut data_payload = None;
    while !riff.is_at_end() {
        let offset = riff.absolute_offset();
        let raw_tag = riff.read_array::<4>()?;
        let chunk_size = riff.read_u32()?;
        let tag = ChunkTag::from_bytes(&raw_tag).ok_or_else(|| Error::UnknownChunkTag {
            offset,
            tag: String::from_utf8_lossy(raw_tag.trim_ascii_end()).into_owned(),
        })?;

        let body = match tag {
            ChunkTag::Data => {
                match pass {
                    ScanPass::Probe => data_payload = Some(riff.current_offset()),
                    ScanPass::Commit => {
                        riff.read(chunk_size as usize, ReadPolicy::Exact)?;
                    }
                }
                ChunkBody::Data
            }
            ChunkTag::List => {
                let payload_offset = riff.absolute_offset();
                let payload = riff.read(chunk_size as usize, ReadPolicy::Exact)?;
                ChunkBody::List(decode_marker_list(payload, payload_offset)?)
            }
            _ => ChunkBody::Raw(riff.read(chunk_size as usize, ReadPolicy::Exact)?),
        };
        sub_chunks.push(SubChunk {
            tag,
            offset,
            size: chunk_size,
            body,
        });
        if tag == ChunkTag::Data {
            break;
        }
    }

    Ok((
        RiffBlock {
            start_offset,
            size,
            sub_chunks,
        },
        data_payload,
    ))
}

/// Read the auxiliary table that follows the block region.
fn decode_aux<R: Read + Seek>(cursor: &mut ByteCursor<R>, header: &ContainerHeader) -> Result<AuxTable> {
    let offset = cursor.absolute_offset();
    let region = cursor.read(header.aux_size() as usize, ReadPolicy::Lenient)?;
    if region.is_empty() {
        tracing::debug!("No auxiliary region at 0x{offset:X}");
        return Ok(AuxTable::default());
    }

    let mut aux = MemoryCursor::from_bytes(region).with_base(offset);
    let count = aux.read_u32()?;
    let mut records = Vec::with_capacity((count as usize).min(MAX_PREALLOC));
    for _ in 0..count {
        let raw = aux.read_array::<AUX_RECORD_DATA_LEN>()?;
        let stored = aux.read_u32()?;
        records.push(AuxRecord {
            raw,
            offset: stored.wrapping_add(AUX_OFFSET_BIAS),
        });
    }
    Ok(AuxTable { count, records })
}
