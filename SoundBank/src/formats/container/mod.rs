//! Sound container format
//!
//! A container bundles several RIFF/WAVE blocks behind a 12-byte header and
//! is followed by an auxiliary offset table.
//!
//! ## Layout
//!
//! ```text
//! 0x00  u32  version
//! 0x04  u32  total size   (block end  = 0x04 + total size)
//! 0x08  u32  header size  (header end = 0x08 + header size)
//! 0x0C  RIFF/WAVE blocks ...
//!       auxiliary table: u32 count, count * (28 raw bytes + u32 offset)
//! ```
//!
//! Blocks are scanned twice. The probe pass walks block headers only, up to
//! the header end, and tolerates a missing data region. The commit pass
//! rescans the same blocks with exact reads and hands the raw bytes of the
//! first few to a [`BlockSink`].

mod marker;
mod reader;
mod sink;

pub use marker::decode_marker_list;
pub use reader::{
    BlockScan, DecodedContainer, ScanEnd, decode_container, parse_container_bytes,
    read_container, read_header, scan_blocks,
};
pub use sink::{BlockSink, MemorySink, NullSink, WavFileSink};

use serde::Serialize;

use crate::formats::common::{ReadPolicy, serialize_base64};

/// "RIFF" magic
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";

/// "WAVE" form type
pub const WAVE_MAGIC: &[u8; 4] = b"WAVE";

/// Smallest RIFF size accepted for an embedded block.
pub const MIN_RIFF_SIZE: u32 = 24;

/// Raw bytes per auxiliary record, before its offset field.
pub const AUX_RECORD_DATA_LEN: usize = 28;

/// Added to every stored auxiliary offset.
pub const AUX_OFFSET_BIAS: u32 = 0x0C;

/// Sub-chunk tags accepted inside a RIFF/WAVE block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChunkTag {
    Fmt,
    Hash,
    Smpl,
    Akd,
    Cue,
    List,
    Seek,
    Junk,
    Data,
}

impl ChunkTag {
    /// All accepted tags.
    pub const ALL: [ChunkTag; 9] = [
        ChunkTag::Fmt,
        ChunkTag::Hash,
        ChunkTag::Smpl,
        ChunkTag::Akd,
        ChunkTag::Cue,
        ChunkTag::List,
        ChunkTag::Seek,
        ChunkTag::Junk,
        ChunkTag::Data,
    ];

    /// Tag text with trailing padding removed.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChunkTag::Fmt => "fmt",
            ChunkTag::Hash => "hash",
            ChunkTag::Smpl => "smpl",
            ChunkTag::Akd => "akd",
            ChunkTag::Cue => "cue",
            ChunkTag::List => "LIST",
            ChunkTag::Seek => "seek",
            ChunkTag::Junk => "junk",
            ChunkTag::Data => "data",
        }
    }

    /// Match raw tag bytes, ignoring trailing whitespace.
    #[must_use]
    pub fn from_bytes(tag: &[u8]) -> Option<Self> {
        let tag = tag.trim_ascii_end();
        Self::ALL.iter().copied().find(|t| t.as_str().as_bytes() == tag)
    }
}

/// Which of the two block scans is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanPass {
    /// Header-only discovery up to the header end.
    Probe,
    /// Full scan with data, feeding the block sink.
    Commit,
}

impl ScanPass {
    /// Read strictness used for whole-block reads in this pass.
    #[must_use]
    pub const fn read_policy(self) -> ReadPolicy {
        match self {
            ScanPass::Probe => ReadPolicy::Lenient,
            ScanPass::Commit => ReadPolicy::Exact,
        }
    }
}

/// The first record of a LIST sub-chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerRecord {
    /// Record type field.
    pub kind: u32,
    /// Label with NUL characters removed.
    pub name: String,
}

/// A decoded LIST sub-chunk.
///
/// Only the first record is decoded. Any further bytes are kept in `tail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerList {
    pub marker: MarkerRecord,
    #[serde(serialize_with = "serialize_base64")]
    pub tail: Vec<u8>,
}

/// Contents of a sub-chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ChunkBody {
    /// Payload kept verbatim.
    Raw(#[serde(serialize_with = "serialize_base64")] Vec<u8>),
    /// Parsed LIST payload.
    List(MarkerList),
    /// Audio data. The bytes are not kept in the model.
    Data,
}

/// One sub-chunk of a RIFF/WAVE block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubChunk {
    pub tag: ChunkTag,
    /// Absolute offset of the sub-chunk header.
    pub offset: u64,
    /// Declared payload size.
    pub size: u32,
    pub body: ChunkBody,
}

/// An embedded RIFF/WAVE block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiffBlock {
    /// Absolute offset of the "RIFF" magic.
    pub start_offset: u64,
    /// Declared RIFF size (excludes the 8-byte tag and size).
    pub size: u32,
    pub sub_chunks: Vec<SubChunk>,
}

impl RiffBlock {
    /// The first LIST marker, if any.
    #[must_use]
    pub fn marker(&self) -> Option<&MarkerRecord> {
        self.sub_chunks.iter().find_map(|c| match &c.body {
            ChunkBody::List(list) => Some(&list.marker),
            _ => None,
        })
    }

    /// Declared size of the data sub-chunk, if present.
    #[must_use]
    pub fn data_size(&self) -> Option<u32> {
        self.sub_chunks
            .iter()
            .find(|c| c.tag == ChunkTag::Data)
            .map(|c| c.size)
    }
}

/// One auxiliary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuxRecord {
    #[serde(serialize_with = "serialize_base64")]
    pub raw: [u8; AUX_RECORD_DATA_LEN],
    /// Stored offset plus [`AUX_OFFSET_BIAS`].
    pub offset: u32,
}

/// The trailing auxiliary offset table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuxTable {
    pub count: u32,
    pub records: Vec<AuxRecord>,
}

/// The 12-byte container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerHeader {
    /// Absolute offset of the header.
    pub start: u64,
    pub version: u32,
    pub total_size: u32,
    pub header_size: u32,
}

impl ContainerHeader {
    /// Absolute offset where the header region ends.
    #[must_use]
    pub fn header_end(&self) -> u64 {
        self.start + 8 + u64::from(self.header_size)
    }

    /// Absolute offset where the block region ends.
    #[must_use]
    pub fn block_end(&self) -> u64 {
        self.start + 4 + u64::from(self.total_size)
    }

    /// Size of the auxiliary region.
    #[must_use]
    pub fn aux_size(&self) -> u32 {
        self.total_size.saturating_sub(self.header_size)
    }
}

/// A decoded container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    pub header: ContainerHeader,
    /// Blocks seen by the probe pass.
    pub probe_blocks: Vec<RiffBlock>,
    /// Blocks seen by the commit pass. Empty for header-only containers.
    pub blocks: Vec<RiffBlock>,
    pub aux: AuxTable,
    /// The input ended with the header region; no data region was present.
    pub header_only: bool,
    /// Absolute offset where decoding stopped.
    pub end_offset: u64,
}
