//! Name + hash record shapes
//!
//! Most catalog records pair a length-prefixed name with a 4-byte hash. The
//! two fields appear in either order depending on the section, which makes
//! them two distinct on-disk shapes.

use std::io::{Read, Seek};

use serde::Serialize;

use super::cursor::ByteCursor;
use crate::error::Result;

/// Field order of a name/hash pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NameLayout {
    /// `name`, then `u32` hash.
    NameThenHash,
    /// `u32` hash, then `name`.
    HashThenName,
}

/// A decoded name/hash pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashedName {
    pub name: String,
    pub hash: u32,
}

impl NameLayout {
    /// Read one name/hash pair in this layout.
    ///
    /// # Errors
    /// Propagates cursor errors from the name or hash field.
    pub fn read<R: Read + Seek>(self, cursor: &mut ByteCursor<R>, max_len: u32) -> Result<HashedName> {
        match self {
            NameLayout::NameThenHash => {
                let name = cursor.read_name(max_len)?;
                let hash = cursor.read_u32()?;
                Ok(HashedName { name, hash })
            }
            NameLayout::HashThenName => {
                let hash = cursor.read_u32()?;
                let name = cursor.read_name(max_len)?;
                Ok(HashedName { name, hash })
            }
        }
    }
}
