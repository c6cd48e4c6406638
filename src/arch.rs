use std::convert::TryFrom;

use crate::result::*;

/// A checked cast from usize to a 32-bit header field
///
/// We could use the `cast` crate,
/// (https://docs.rs/cast/0.2.3/cast/)
/// but these are the only ones we really need.
pub fn u32(i: usize, what: &'static str) -> ZipResult<u32> {
    u32::try_from(i).map_err(|_| ZipError::ArchiveTooLarge(what))
}

/// A checked cast from usize to a 16-bit header field
pub fn u16(i: usize, what: &'static str) -> ZipResult<u16> {
    u16::try_from(i).map_err(|_| ZipError::ArchiveTooLarge(what))
}
