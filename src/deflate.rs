//! Pluggable DEFLATE compression
//!
//! ZIP entries hold raw DEFLATE streams, but most compressors
//! (zlib's `compress()` and friends) hand back a zlib-wrapped one.
//! Providers return the wrapped stream and we strip it here.

use std::io;

use crate::result::*;

/// Something that can DEFLATE bytes at a given level (1-9).
///
/// Implementations return a zlib stream ([RFC 1950]):
/// a two-byte header, the DEFLATE data, then a four-byte Adler-32.
///
/// [RFC 1950]: https://datatracker.ietf.org/doc/html/rfc1950
pub trait Deflate {
    fn compress(&self, data: &[u8], level: u32) -> io::Result<Vec<u8>>;
}

/// zlib header (CMF + FLG)
const ZLIB_HEADER_LENGTH: usize = 2;
/// Adler-32 trailer
const ZLIB_TRAILER_LENGTH: usize = 4;

/// Compresses `data` with the given provider and returns the raw DEFLATE
/// stream inside its zlib wrapper.
pub(crate) fn raw_deflate(
    deflater: &(dyn Deflate + Send + Sync),
    data: &[u8],
    level: u32,
) -> ZipResult<Vec<u8>> {
    let mut zlib = deflater
        .compress(data, level)
        .map_err(ZipError::Compression)?;
    if zlib.len() < ZLIB_HEADER_LENGTH + ZLIB_TRAILER_LENGTH {
        return Err(ZipError::MalformedDeflateStream(zlib.len()));
    }
    zlib.truncate(zlib.len() - ZLIB_TRAILER_LENGTH);
    zlib.drain(..ZLIB_HEADER_LENGTH);
    Ok(zlib)
}

/// The default provider, backed by [`flate2`].
///
/// [`flate2`]: https://docs.rs/flate2
#[cfg(feature = "deflate")]
#[derive(Debug, Default, Copy, Clone)]
pub struct ZlibDeflater;

#[cfg(feature = "deflate")]
impl Deflate for ZlibDeflater {
    fn compress(&self, data: &[u8], level: u32) -> io::Result<Vec<u8>> {
        use std::io::Write;

        use flate2::write::ZlibEncoder;
        use flate2::Compression;

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
        encoder.write_all(data)?;
        encoder.finish()
    }
}
