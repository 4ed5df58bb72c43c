//! Bounded little-endian sequential reader
//!
//! [`ByteCursor`] wraps any `Read + Seek` source whose length is fixed when
//! the cursor is created. Every read reports failures with the absolute
//! offset `base + position`, where `base` is the location of this cursor's
//! bytes inside the enclosing file. Sub-regions are decoded by reading them
//! fully into a fresh in-memory cursor tagged with their absolute start, so a
//! nested decoder never shares the parent's read position.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Longest length-prefixed name accepted by default.
pub const DEFAULT_MAX_NAME_LEN: u32 = 127;

/// How a read reacts when fewer bytes remain than were requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadPolicy {
    /// Fail with [`Error::OutOfData`] on a short read.
    #[default]
    Exact,
    /// Return whatever is available, possibly nothing.
    Lenient,
}

/// Cursor over an in-memory buffer.
pub type MemoryCursor = ByteCursor<Cursor<Vec<u8>>>;

/// Cursor over a file on disk.
pub type FileCursor = ByteCursor<BufReader<File>>;

/// Read-only sequential reader with explicit end-of-data semantics.
#[derive(Debug)]
pub struct ByteCursor<R> {
    inner: R,
    len: u64,
    pos: u64,
    base: u64,
}

impl FileCursor {
    /// Open a file-backed cursor. The length is taken from file metadata.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let len = file.metadata()?.len();
        Ok(Self {
            inner: BufReader::new(file),
            len,
            pos: 0,
            base: 0,
        })
    }
}

impl MemoryCursor {
    /// Create a cursor over an owned buffer.
    #[must_use]
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        let len = data.len() as u64;
        Self {
            inner: Cursor::new(data),
            len,
            pos: 0,
            base: 0,
        }
    }

    /// Materialize the full byte range of another cursor into a new,
    /// independent cursor with the same base address.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the other cursor's source cannot be read.
    pub fn from_cursor<R: Read + Seek>(other: &mut ByteCursor<R>) -> Result<Self> {
        let base = other.base;
        Ok(Self::from_bytes(other.snapshot()?).with_base(base))
    }

    /// Borrow the underlying bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.get_ref()
    }
}

impl<R> ByteCursor<R> {
    /// Set the absolute address of this cursor's first byte.
    #[must_use]
    pub fn with_base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    /// Absolute address of this cursor's first byte.
    #[must_use]
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Total size of the source in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True if the source holds no bytes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current read position relative to the start of this source.
    #[must_use]
    pub fn current_offset(&self) -> u64 {
        self.pos
    }

    /// Current read position in the enclosing file.
    #[must_use]
    pub fn absolute_offset(&self) -> u64 {
        self.base + self.pos
    }

    /// True once the position has reached (or passed) the end of the source.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.len
    }

    /// Bytes left between the position and the end of the source.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Read `n` bytes.
    ///
    /// With [`ReadPolicy::Exact`] a short read fails; with
    /// [`ReadPolicy::Lenient`] the returned buffer may be shorter than `n`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfData`] on a short exact read, or [`Error::Io`].
    pub fn read(&mut self, n: usize, policy: ReadPolicy) -> Result<Vec<u8>> {
        let start = self.absolute_offset();
        let wanted = n as u64;
        let mut buf = Vec::with_capacity(wanted.min(self.remaining()) as usize);
        let got = (&mut self.inner).take(wanted).read_to_end(&mut buf)?;
        self.pos += got as u64;

        if policy == ReadPolicy::Exact && got < n {
            return Err(Error::OutOfData {
                offset: start,
                requested: n,
                available: got,
            });
        }
        Ok(buf)
    }

    /// Read exactly `N` bytes into an array.
    ///
    /// # Errors
    /// Returns [`Error::OutOfData`] if fewer than `N` bytes remain.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read(N, ReadPolicy::Exact)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&bytes);
        Ok(out)
    }

    /// Read a little-endian unsigned integer of `width` bytes (1..=8).
    ///
    /// # Errors
    /// Returns [`Error::InvalidIntWidth`] for an unsupported width, or
    /// [`Error::OutOfData`] if the integer is truncated.
    pub fn read_uint(&mut self, width: usize) -> Result<u64> {
        if !(1..=8).contains(&width) {
            return Err(Error::InvalidIntWidth { width });
        }
        let bytes = self.read(width, ReadPolicy::Exact)?;
        Ok(LittleEndian::read_uint(&bytes, width))
    }

    /// Read a single byte.
    ///
    /// # Errors
    /// Returns [`Error::OutOfData`] at end of data.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian `u32`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfData`] if fewer than 4 bytes remain.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(&self.read_array::<4>()?))
    }

    /// Read `n` bytes as UTF-8, optionally trimming whitespace and NULs from
    /// both ends.
    ///
    /// # Errors
    /// Returns [`Error::OutOfData`] or [`Error::InvalidString`].
    pub fn read_fixed_string(&mut self, n: usize, trim: bool) -> Result<String> {
        let offset = self.absolute_offset();
        let bytes = self.read(n, ReadPolicy::Exact)?;
        let text = decode_utf8(bytes, offset)?;
        if trim {
            Ok(text
                .trim_matches(|c: char| c.is_whitespace() || c == '\0')
                .to_string())
        } else {
            Ok(text)
        }
    }

    /// Read a `u32` length followed by that many UTF-8 bytes.
    ///
    /// # Errors
    /// Returns [`Error::InvalidNameLength`] if the length is 0 or greater
    /// than `max_len`, [`Error::OutOfData`] or [`Error::InvalidString`].
    pub fn read_name(&mut self, max_len: u32) -> Result<String> {
        let length = self.read_u32()?;
        let offset = self.absolute_offset();
        if length == 0 || length > max_len {
            return Err(Error::InvalidNameLength {
                offset,
                length: u64::from(length),
                max: max_len,
            });
        }
        let bytes = self.read(length as usize, ReadPolicy::Exact)?;
        decode_utf8(bytes, offset)
    }

    /// Move the read position. Returns the new position relative to the
    /// start of this source.
    ///
    /// # Errors
    /// Returns [`Error::Io`] when seeking before the start of the source.
    pub fn seek(&mut self, from: SeekFrom) -> Result<u64> {
        self.pos = self.inner.seek(from)?;
        Ok(self.pos)
    }

    /// Advance the position by `n` bytes without reading them.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the underlying seek fails.
    pub fn skip(&mut self, n: u64) -> Result<u64> {
        self.seek(SeekFrom::Start(self.pos + n))
    }

    /// Copy of the full underlying byte range. The read position is left
    /// unchanged.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the source cannot be re-read.
    pub fn snapshot(&mut self) -> Result<Vec<u8>> {
        let saved = self.pos;
        self.inner.seek(SeekFrom::Start(0))?;
        let mut data = Vec::with_capacity(self.len as usize);
        self.inner.read_to_end(&mut data)?;
        self.inner.seek(SeekFrom::Start(saved))?;
        Ok(data)
    }
}

fn decode_utf8(bytes: Vec<u8>, offset: u64) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| Error::InvalidString {
        offset,
        bytes: e.into_bytes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    fn name_bytes(name: &[u8]) -> Vec<u8> {
        let mut out = (name.len() as u32).to_le_bytes().to_vec();
        out.extend_from_slice(name);
        out
    }

    #[test]
    fn test_exact_read_fails_only_when_short() {
        let mut cursor = MemoryCursor::from_bytes(vec![1, 2, 3]);
        assert_eq!(cursor.read(2, ReadPolicy::Exact).unwrap(), vec![1, 2]);

        let err = cursor.read(2, ReadPolicy::Exact).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfData);
        assert_eq!(err.offset(), Some(2));
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_exact_read_of_everything_succeeds() {
        let mut cursor = MemoryCursor::from_bytes(vec![9; 4]);
        assert_eq!(cursor.read(4, ReadPolicy::Exact).unwrap().len(), 4);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_lenient_read_never_errors() {
        let mut cursor = MemoryCursor::from_bytes(vec![1, 2, 3]);
        assert_eq!(cursor.read(8, ReadPolicy::Lenient).unwrap(), vec![1, 2, 3]);
        assert!(cursor.read(8, ReadPolicy::Lenient).unwrap().is_empty());
        assert!(cursor.read(0, ReadPolicy::Exact).unwrap().is_empty());
    }

    #[test]
    fn test_read_uint_widths() {
        let mut cursor = MemoryCursor::from_bytes(vec![0x01, 0x02, 0x03, 0x04, 0xFF]);
        assert_eq!(cursor.read_uint(4).unwrap(), 0x04030201);
        assert_eq!(cursor.read_uint(1).unwrap(), 0xFF);

        let mut cursor = MemoryCursor::from_bytes(vec![0xAA; 8]);
        assert_eq!(cursor.read_uint(8).unwrap(), 0xAAAA_AAAA_AAAA_AAAA);

        let mut cursor = MemoryCursor::from_bytes(vec![0; 16]);
        assert!(matches!(cursor.read_uint(0), Err(Error::InvalidIntWidth { width: 0 })));
        assert!(matches!(cursor.read_uint(9), Err(Error::InvalidIntWidth { width: 9 })));
        assert_eq!(cursor.current_offset(), 0);
    }

    #[test]
    fn test_name_length_bounds() {
        let mut cursor = MemoryCursor::from_bytes(0u32.to_le_bytes().to_vec());
        let err = cursor.read_name(DEFAULT_MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.offset(), Some(4));

        let long = vec![b'a'; 128];
        let mut cursor = MemoryCursor::from_bytes(name_bytes(&long));
        assert!(matches!(
            cursor.read_name(DEFAULT_MAX_NAME_LEN),
            Err(Error::InvalidNameLength { length: 128, max: 127, .. })
        ));
    }

    #[test]
    fn test_every_valid_name_length_decodes() {
        for len in 1..=DEFAULT_MAX_NAME_LEN as usize {
            let name = vec![b'x'; len];
            let mut cursor = MemoryCursor::from_bytes(name_bytes(&name));
            let decoded = cursor.read_name(DEFAULT_MAX_NAME_LEN).unwrap();
            assert_eq!(decoded.len(), len);
            assert!(cursor.is_at_end());
        }
    }

    #[test]
    fn test_name_truncated_payload() {
        let mut data = 10u32.to_le_bytes().to_vec();
        data.extend_from_slice(b"abc");
        let mut cursor = MemoryCursor::from_bytes(data);
        assert!(cursor.read_name(DEFAULT_MAX_NAME_LEN).unwrap_err().is_out_of_data());
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let mut cursor = MemoryCursor::from_bytes(name_bytes(&[0xC3, 0x28])).with_base(0x100);
        let err = cursor.read_name(DEFAULT_MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.offset(), Some(0x104));

        let mut cursor = MemoryCursor::from_bytes(vec![0xFF, 0xFE]);
        assert_eq!(cursor.read_fixed_string(2, false).unwrap_err().kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_fixed_string_trim() {
        let mut cursor = MemoryCursor::from_bytes(b" fmt\0\0".to_vec());
        assert_eq!(cursor.read_fixed_string(6, true).unwrap(), "fmt");

        let mut cursor = MemoryCursor::from_bytes(b"ab \0".to_vec());
        assert_eq!(cursor.read_fixed_string(4, false).unwrap(), "ab \0");
    }

    #[test]
    fn test_seek_and_snapshot_keep_position() {
        let mut cursor = MemoryCursor::from_bytes(vec![0, 1, 2, 3, 4, 5]).with_base(0x40);
        cursor.seek(SeekFrom::End(-2)).unwrap();
        assert_eq!(cursor.current_offset(), 4);
        assert_eq!(cursor.absolute_offset(), 0x44);

        cursor.seek(SeekFrom::Current(-3)).unwrap();
        assert_eq!(cursor.snapshot().unwrap(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(cursor.read_u8().unwrap(), 1);

        let copy = MemoryCursor::from_cursor(&mut cursor).unwrap();
        assert_eq!(copy.base(), 0x40);
        assert_eq!(copy.current_offset(), 0);
        assert_eq!(copy.as_bytes(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_seek_past_end_reports_at_end() {
        let mut cursor = MemoryCursor::from_bytes(vec![0; 4]);
        cursor.skip(10).unwrap();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.read(1, ReadPolicy::Lenient).unwrap().is_empty());
    }

    #[test]
    fn test_file_backed_cursor() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x2A, 0, 0, 0, b'h', b'i']).unwrap();
        file.flush().unwrap();

        let mut cursor = FileCursor::open(file.path()).unwrap();
        assert_eq!(cursor.len(), 6);
        assert_eq!(cursor.read_u32().unwrap(), 42);
        assert_eq!(cursor.read_fixed_string(2, true).unwrap(), "hi");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.snapshot().unwrap().len(), 6);
    }
}
