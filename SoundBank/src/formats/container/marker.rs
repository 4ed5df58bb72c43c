//! LIST sub-chunk decoding

use super::{MarkerList, MarkerRecord};
use crate::error::{Error, Result};
use crate::formats::common::{MemoryCursor, ReadPolicy};

/// Nested list-type prefix ("adtl" + "labl"), skipped without validation.
const LIST_PREFIX_LEN: u64 = 8;

/// Decode a LIST payload located at absolute offset `base`.
///
/// Reads the first marker record only: `u32` size, `u32` type, then
/// `size - 4` bytes of label text. Remaining bytes are returned untouched
/// in [`MarkerList::tail`].
///
/// # Errors
/// Returns [`Error::MarkerTooSmall`] if the record size is below 4, or
/// out-of-data and UTF-8 errors from the payload.
pub fn decode_marker_list(payload: Vec<u8>, base: u64) -> Result<MarkerList> {
    let mut cursor = MemoryCursor::from_bytes(payload).with_base(base);
    cursor.skip(LIST_PREFIX_LEN)?;

    let offset = cursor.absolute_offset();
    let size = cursor.read_u32()?;
    let kind = cursor.read_u32()?;
    if size < 4 {
        return Err(Error::MarkerTooSmall { offset, size });
    }
    let text = cursor.read_fixed_string((size - 4) as usize, false)?;
    let name = text.trim().replace('\0', "");

    let tail = cursor.read(cursor.remaining() as usize, ReadPolicy::Lenient)?;
    if !tail.is_empty() {
        tracing::debug!("LIST at 0x{base:X}: {} undecoded bytes after first marker", tail.len());
    }

    Ok(MarkerList {
        marker: MarkerRecord { kind, name },
        tail,
    })
}
