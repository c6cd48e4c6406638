//! Error types and the related `Result<T>`

use thiserror::Error;

use crate::spec::{MAX_ENTRIES, MAX_NAME_LENGTH, MAX_PAYLOAD_LENGTH};

pub type ZipResult<T> = Result<T, ZipError>;

#[derive(Debug, Error)]
pub enum ZipError {
    /// The archive already holds as many entries as the
    /// 16-bit entry counts in the End of central directory record allow.
    #[error("Zip archive cannot contain more than {max} entries", max = MAX_ENTRIES)]
    TooManyEntries,

    /// A (sanitized) entry name doesn't fit the 16-bit file name length field.
    #[error("Zip archive entry names cannot exceed {max} bytes (got {0})", max = MAX_NAME_LENGTH)]
    NameTooLong(usize),

    /// A payload doesn't fit the 32-bit size fields.
    #[error("Zip archive entries cannot exceed {max} bytes (got {0})", max = MAX_PAYLOAD_LENGTH)]
    PayloadTooLarge(usize),

    /// The entries together overflow a 32-bit offset or size,
    /// which would need Zip64 records we don't write.
    #[error("Zip archive too large without Zip64: {0}")]
    ArchiveTooLarge(&'static str),

    /// The deflate provider failed.
    #[error("Deflate compression failed")]
    Compression(#[source] std::io::Error),

    /// The deflate provider returned something too short to be a zlib stream.
    #[error("Deflate provider returned a malformed zlib stream ({0} bytes)")]
    MalformedDeflateStream(usize),

    /// Something was asked of us that this build can't provide,
    /// like compression without a deflate provider.
    #[error("Unavailable feature: {0}")]
    Unavailable(&'static str),
}
