//! Code specific to the ZIP file format specification.
//!
//! We try to keep the nitty gritty here,
//! and higher-level stuff in the [`write`] module.
//! (This pattern, like several others, was inspired by the Zip crate.)
//!
//! Most comments quote the ZIP spec, [`APPNOTE.TXT`].
//! Every multi-byte field is little-endian and written at its exact width;
//! we never hand the layout to a general-purpose serializer.
//!
//! [`write`]: ../write/index.html
//! [`APPNOTE.TXT`]: https://pkware.cachefly.net/webdocs/APPNOTE/APPNOTE-6.3.6.TXT

use log::*;

use crate::arch;
use crate::result::*;
use crate::write::CompressionMethod;

// Magic numbers denoting various sections of a ZIP archive

/// End of central directory magic number
pub const EOCDR_MAGIC: [u8; 4] = [b'P', b'K', 5, 6];
/// Central directory magic number
pub const CENTRAL_DIRECTORY_MAGIC: [u8; 4] = [b'P', b'K', 1, 2];
/// Local file header magic number
pub const LOCAL_FILE_HEADER_MAGIC: [u8; 4] = [b'P', b'K', 3, 4];

/// Most entries a non-Zip64 archive can count (16-bit fields)
pub const MAX_ENTRIES: usize = 0xffff;
/// Longest file name a 16-bit length field can describe
pub const MAX_NAME_LENGTH: usize = 0xffff;
/// Largest payload a 32-bit size field can describe
pub const MAX_PAYLOAD_LENGTH: u64 = 0xffff_ffff;

/// 2.0: the minimum version for DEFLATE.
/// We claim it for stored entries too; every reader handles that.
pub const VERSION_NEEDED_TO_EXTRACT: u16 = 20;
/// Upper byte 0 means MS-DOS compatible attributes, lower byte spec version 0.
pub const VERSION_MADE_BY: u16 = 0;
/// The MS-DOS "archive" bit
pub const DOS_ARCHIVE_ATTRIBUTE: u32 = 0x20;

impl CompressionMethod {
    pub(crate) fn to_u16(self) -> u16 {
        match self {
            CompressionMethod::None => 0,
            CompressionMethod::Deflate => 8,
        }
    }
}

/// Writes a little-endian u32 to the back of the provided buffer.
fn write_u32(output: &mut Vec<u8>, u: u32) {
    output.extend_from_slice(&u.to_le_bytes());
}

/// Writes a little-endian u16 to the back of the provided buffer.
fn write_u16(output: &mut Vec<u8>, u: u16) {
    output.extend_from_slice(&u.to_le_bytes());
}

/// Data for a local file header
///
/// Each file's actual contents is preceded by this header.
/// Readers that stream the archive front-to-back rely on it;
/// everyone else goes through the central directory.
#[derive(Debug)]
pub struct LocalFileHeader<'a> {
    pub compression_method: CompressionMethod,
    pub last_modified_time: u16,
    pub last_modified_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub path: &'a [u8],
}

impl LocalFileHeader<'_> {
    pub fn write(&self, output: &mut Vec<u8>) -> ZipResult<()> {
        // 4.3.7  Local file header:
        //
        // local file header signature     4 bytes  (0x04034b50)
        // version needed to extract       2 bytes
        // general purpose bit flag        2 bytes
        // compression method              2 bytes
        // last mod file time              2 bytes
        // last mod file date              2 bytes
        // crc-32                          4 bytes
        // compressed size                 4 bytes
        // uncompressed size               4 bytes
        // file name length                2 bytes
        // extra field length              2 bytes
        //
        // file name (variable size)
        // extra field (variable size)
        trace!("{:?}", self);
        let path_length = arch::u16(self.path.len(), "file name length")?;
        output.extend_from_slice(&LOCAL_FILE_HEADER_MAGIC);
        write_u16(output, VERSION_NEEDED_TO_EXTRACT);
        write_u16(output, 0);
        write_u16(output, self.compression_method.to_u16());
        write_u16(output, self.last_modified_time);
        write_u16(output, self.last_modified_date);
        write_u32(output, self.crc32);
        write_u32(output, self.compressed_size);
        write_u32(output, self.uncompressed_size);
        write_u16(output, path_length);
        write_u16(output, 0);
        output.extend_from_slice(self.path);
        Ok(())
    }

    pub const fn fixed_size_in_file() -> usize {
        30
    }
}

/// Data for a central directory entry
///
/// Each of these records repeats the local header's information
/// and adds where to find that header.
#[derive(Debug)]
pub struct CentralDirectoryEntry<'a> {
    pub compression_method: CompressionMethod,
    pub last_modified_time: u16,
    pub last_modified_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub header_offset: u32,
    pub path: &'a [u8],
}

impl CentralDirectoryEntry<'_> {
    pub fn write(&self, output: &mut Vec<u8>) -> ZipResult<()> {
        // 4.3.12  Central directory structure:
        //
        //   central file header signature   4 bytes  (0x02014b50)
        //   version made by                 2 bytes
        //   version needed to extract       2 bytes
        //   general purpose bit flag        2 bytes
        //   compression method              2 bytes
        //   last mod file time              2 bytes
        //   last mod file date              2 bytes
        //   crc-32                          4 bytes
        //   compressed size                 4 bytes
        //   uncompressed size               4 bytes
        //   file name length                2 bytes
        //   extra field length              2 bytes
        //   file comment length             2 bytes
        //   disk number start               2 bytes
        //   internal file attributes        2 bytes
        //   external file attributes        4 bytes
        //   relative offset of local header 4 bytes
        //
        //   file name (variable size)
        //   extra field (variable size)
        //   file comment (variable size)
        trace!("{:?}", self);
        let path_length = arch::u16(self.path.len(), "file name length")?;
        output.extend_from_slice(&CENTRAL_DIRECTORY_MAGIC);
        write_u16(output, VERSION_MADE_BY);
        write_u16(output, VERSION_NEEDED_TO_EXTRACT);
        write_u16(output, 0);
        write_u16(output, self.compression_method.to_u16());
        write_u16(output, self.last_modified_time);
        write_u16(output, self.last_modified_date);
        write_u32(output, self.crc32);
        write_u32(output, self.compressed_size);
        write_u32(output, self.uncompressed_size);
        write_u16(output, path_length);
        write_u16(output, 0);
        write_u16(output, 0);
        write_u16(output, 0);
        write_u16(output, 0);
        write_u32(output, DOS_ARCHIVE_ATTRIBUTE);
        write_u32(output, self.header_offset);
        output.extend_from_slice(self.path);
        Ok(())
    }

    pub const fn fixed_size_in_file() -> usize {
        46
    }
}

/// Data for the End of central directory record
///
/// Goes at the back of the ZIP archive and provides offsets for finding
/// its central directory. We never split archives across disks,
/// so both disk numbers are zero and both entry counts agree.
#[derive(Debug)]
pub struct EndOfCentralDirectory {
    pub entries: u16,
    pub central_directory_size: u32,
    pub central_directory_offset: u32,
}

impl EndOfCentralDirectory {
    pub fn write(&self, output: &mut Vec<u8>) {
        // 4.3.16  End of central directory record:
        //
        // end of central dir signature    4 bytes  (0x06054b50)
        // number of this disk             2 bytes
        // number of the disk with the
        // start of the central directory  2 bytes
        // total number of entries in
        // the central dir on this disk    2 bytes
        // total number of entries in
        // the central dir                 2 bytes
        // size of the central directory   4 bytes
        // offset of start of central
        // directory with respect to
        // the starting disk number        4 bytes
        // zipfile comment length          2 bytes
        trace!("{:?}", self);
        output.extend_from_slice(&EOCDR_MAGIC);
        write_u16(output, 0);
        write_u16(output, 0);
        write_u16(output, self.entries);
        write_u16(output, self.entries);
        write_u32(output, self.central_directory_size);
        write_u32(output, self.central_directory_offset);
        write_u16(output, 0);
    }

    pub const fn size_in_file() -> usize {
        22
    }
}
