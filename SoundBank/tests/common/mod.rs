//! Byte builders for synthesized catalog and container fixtures

#![allow(dead_code)]

#[derive(Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.0.push(v);
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn name(self, s: &str) -> Self {
        let mut this = self.u32(s.len() as u32);
        this.0.extend_from_slice(s.as_bytes());
        this
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.0
    }
}

pub fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    Bytes::new().raw(tag).u32(payload.len() as u32).raw(payload).build()
}

pub fn riff(chunks: &[Vec<u8>]) -> Vec<u8> {
    let body = chunks.concat();
    Bytes::new()
        .raw(b"RIFF")
        .u32(body.len() as u32 + 4)
        .raw(b"WAVE")
        .raw(&body)
        .build()
}

pub fn marker(name: &str, kind: u32) -> Vec<u8> {
    let payload = Bytes::new()
        .raw(b"adtllabl")
        .u32(name.len() as u32 + 4)
        .u32(kind)
        .raw(name.as_bytes())
        .build();
    chunk(b"LIST", &payload)
}

/// `fmt`, a LIST marker and `payload_len` bytes of data.
pub fn wave_block(label: &str, fill: u8, payload_len: usize) -> Vec<u8> {
    riff(&[
        chunk(b"fmt ", &[0x01; 16]),
        marker(label, 1),
        chunk(b"data", &vec![fill; payload_len]),
    ])
}

/// Container whose header region ends at the first block's data payload
/// and whose block region ends after the last block.
pub fn container(blocks: &[Vec<u8>], first_payload_len: usize, aux: &[u8]) -> Vec<u8> {
    let header_end = 12 + blocks[0].len() - first_payload_len;
    let block_end = 12 + blocks.iter().map(Vec::len).sum::<usize>();
    let mut out = Bytes::new()
        .u32(1)
        .u32((block_end - 4) as u32)
        .u32((header_end - 8) as u32)
        .build();
    for block in blocks {
        out.extend_from_slice(block);
    }
    out.extend_from_slice(aux);
    out
}

/// A catalog with the given file records and every other section empty.
pub fn catalog_with_files(files: &[(&str, u32, u8, &str)]) -> Vec<u8> {
    let mut b = Bytes::new().u32(files.len() as u32);
    for (name, hash, flag, dir) in files {
        b = b.name(name).u32(*hash).u8(*flag).name(dir);
    }
    for _ in 0..6 {
        b = b.u32(0);
    }
    b.build()
}
