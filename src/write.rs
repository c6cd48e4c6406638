//! Tools for building a ZIP archive.
//!
//! Create a [`ZipBuilder`], [`add()`] named byte payloads to it,
//! then [`export()`] the whole archive as one `Vec<u8>`.
//! Nothing touches the filesystem; what happens to the bytes is up to you.
//!
//! [`ZipBuilder`]: struct.ZipBuilder.html
//! [`add()`]: struct.ZipBuilder.html#method.add
//! [`export()`]: struct.ZipBuilder.html#method.export

use std::borrow::Cow;
use std::fmt;

use codepage_437::{BorrowFromCp437, CP437_CONTROL};
use log::*;
use memchr::memchr2;

use crate::arch;
use crate::clock::{Clock, SystemClock};
use crate::deflate::{self, Deflate};
use crate::msdos::{DosDateTime, DosTimeZone, MSDOS_EPOCH};
use crate::result::*;
use crate::spec;

/// The compression method used to store a file
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompressionMethod {
    /// The file is uncompressed
    None,
    /// The file is [DEFLATE](https://en.wikipedia.org/wiki/DEFLATE)d.
    Deflate,
}

/// A DEFLATE level from 0 (store everything) to 9 (smallest output)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// Don't compress; every entry is stored as-is.
    pub const STORED: CompressionLevel = CompressionLevel(0);

    /// zlib's usual trade-off between speed and size
    pub const DEFAULT: CompressionLevel = CompressionLevel(6);

    /// Levels outside 0-9 quietly become the default.
    /// The level only affects size, never correctness, so we don't fuss.
    pub fn new(level: u32) -> Self {
        if level <= 9 {
            CompressionLevel(level)
        } else {
            debug!(
                "Compression level {level} out of range; using {}",
                Self::DEFAULT.0
            );
            Self::DEFAULT
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Settings fixed when a [`ZipBuilder`] is created
///
/// [`ZipBuilder`]: struct.ZipBuilder.html
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZipOptions {
    /// Used by [`ZipBuilder::export()`](struct.ZipBuilder.html#method.export)
    pub compression_level: CompressionLevel,

    /// The calendar timestamps are broken into before being packed
    pub time_zone: DosTimeZone,
}

impl ZipOptions {
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = CompressionLevel::new(level);
        self
    }

    pub fn time_zone(mut self, time_zone: DosTimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }
}

/// A file waiting to be written into the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: Vec<u8>,
    payload: Vec<u8>,
    modified: i64,
    last_modified: DosDateTime,
}

impl Entry {
    /// The file name, with any `/` or `\` removed
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// The name as ZIP readers will show it.
    ///
    /// We don't set the UTF-8 flag, so readers decode names as CP437.
    pub fn display_name(&self) -> Cow<'_, str> {
        Cow::borrow_from_cp437(&self.name[..], &CP437_CONTROL)
    }

    /// The file's uncompressed contents
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Seconds since the Unix epoch, no earlier than the MS-DOS epoch
    pub fn modified(&self) -> i64 {
        self.modified
    }

    /// The packed timestamp written to both headers.
    /// Computed when the entry was added, never at export.
    pub fn last_modified(&self) -> DosDateTime {
        self.last_modified
    }
}

/// Accumulates entries and serializes them into a ZIP archive
///
/// ```
/// # use memzip::*;
/// # #[cfg(feature = "deflate")] {
/// let mut zip = ZipBuilder::new();
/// zip.add("hello.txt", "Hello, world!", None)?;
/// zip.add("data.bin", vec![0u8; 1000], Some(1_600_000_000))?;
/// let bytes = zip.export()?;
/// assert_eq!(bytes[..4], [b'P', b'K', 3, 4]);
/// # }
/// # Ok::<(), ZipError>(())
/// ```
pub struct ZipBuilder {
    entries: Vec<Entry>,
    options: ZipOptions,
    clock: Box<dyn Clock + Send + Sync>,
    deflater: Option<Box<dyn Deflate + Send + Sync>>,
}

impl fmt::Debug for ZipBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipBuilder")
            .field("entries", &self.entries.len())
            .field("options", &self.options)
            .field("deflater", &self.deflater.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for ZipBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "deflate")]
fn default_deflater() -> Option<Box<dyn Deflate + Send + Sync>> {
    Some(Box::new(deflate::ZlibDeflater))
}

#[cfg(not(feature = "deflate"))]
fn default_deflater() -> Option<Box<dyn Deflate + Send + Sync>> {
    None
}

/// Removes every `/` and `\` so names can't describe directories
/// (or climb out of them).
fn sanitize(name: &[u8]) -> Cow<'_, [u8]> {
    if memchr2(b'/', b'\\', name).is_none() {
        return Cow::Borrowed(name);
    }
    let cleaned: Vec<u8> = name
        .iter()
        .copied()
        .filter(|b| *b != b'/' && *b != b'\\')
        .collect();
    warn!(
        "Stripped {} path separator(s) from entry name",
        name.len() - cleaned.len()
    );
    Cow::Owned(cleaned)
}

impl ZipBuilder {
    /// An empty archive with default options,
    /// the system clock, and (with the `deflate` feature) flate2 compression.
    pub fn new() -> Self {
        Self::with_options(ZipOptions::default())
    }

    pub fn with_options(options: ZipOptions) -> Self {
        Self {
            entries: Vec::new(),
            options,
            clock: Box::new(SystemClock),
            deflater: default_deflater(),
        }
    }

    /// Uses the given clock for entries added without a timestamp.
    pub fn with_clock<C: Clock + Send + Sync + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Uses the given DEFLATE provider instead of the default.
    pub fn with_deflater<D: Deflate + Send + Sync + 'static>(mut self, deflater: D) -> Self {
        self.deflater = Some(Box::new(deflater));
        self
    }

    /// Drops the DEFLATE provider. Only level 0 exports will succeed.
    pub fn without_deflater(mut self) -> Self {
        self.deflater = None;
        self
    }

    pub fn options(&self) -> &ZipOptions {
        &self.options
    }

    /// Returns the entries added so far, in insertion order.
    ///
    /// No effort is made to deduplicate names;
    /// readers of the archive get to decide what duplicates mean.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a file to the archive and returns the new entry count.
    ///
    /// `/` and `\` are stripped from `name`.
    /// If `modified` (seconds since the Unix epoch) is `None`,
    /// the builder's clock provides it.
    ///
    /// Either the entry is added or, on error, nothing changes.
    pub fn add<N, P>(&mut self, name: N, payload: P, modified: Option<i64>) -> ZipResult<usize>
    where
        N: AsRef<[u8]>,
        P: Into<Vec<u8>>,
    {
        let name = sanitize(name.as_ref());

        if self.entries.len() >= spec::MAX_ENTRIES {
            return Err(ZipError::TooManyEntries);
        }
        if name.len() > spec::MAX_NAME_LENGTH {
            return Err(ZipError::NameTooLong(name.len()));
        }
        let payload = payload.into();
        if payload.len() as u64 > spec::MAX_PAYLOAD_LENGTH {
            return Err(ZipError::PayloadTooLarge(payload.len()));
        }

        let modified = modified.unwrap_or_else(|| self.clock.now());
        let last_modified = DosDateTime::from_timestamp(modified, self.options.time_zone);

        let entry = Entry {
            name: name.into_owned(),
            payload,
            modified: modified.max(MSDOS_EPOCH),
            last_modified,
        };
        debug!(
            "Added {} ({} bytes, modified {:?})",
            entry.display_name(),
            entry.payload.len(),
            entry.last_modified.to_naive()
        );
        self.entries.push(entry);
        Ok(self.entries.len())
    }

    /// Serializes every entry into a ZIP archive
    /// at the configured compression level.
    ///
    /// Can be called any number of times;
    /// the same entries always give the same bytes.
    pub fn export(&self) -> ZipResult<Vec<u8>> {
        self.export_at(self.options.compression_level)
    }

    /// Like [`export()`](#method.export), with an explicit compression level.
    /// Levels outside 0-9 are treated as 6.
    pub fn export_with_level(&self, level: u32) -> ZipResult<Vec<u8>> {
        self.export_at(CompressionLevel::new(level))
    }

    fn export_at(&self, level: CompressionLevel) -> ZipResult<Vec<u8>> {
        let deflater = match (level, &self.deflater) {
            (CompressionLevel::STORED, _) => None,
            (_, Some(d)) => Some(&**d),
            (_, None) => {
                return Err(ZipError::Unavailable(
                    "compression requested without a DEFLATE provider",
                ))
            }
        };

        // The local headers and file contents, then the central directory.
        // The End of central directory record is tacked on last.
        // Compression never grows an entry, so these are upper bounds.
        let mut files = Vec::with_capacity(
            self.entries
                .iter()
                .map(|e| {
                    spec::LocalFileHeader::fixed_size_in_file() + e.name.len() + e.payload.len()
                })
                .sum(),
        );
        let mut central_directory = Vec::with_capacity(
            self.entries
                .iter()
                .map(|e| spec::CentralDirectoryEntry::fixed_size_in_file() + e.name.len())
                .sum(),
        );

        for entry in &self.entries {
            let header_offset = arch::u32(files.len(), "local file header offset")?;

            let deflated = match deflater {
                Some(d) => Some(deflate::raw_deflate(d, &entry.payload, level.get())?),
                None => None,
            };
            // Only keep the DEFLATEd version if it actually saves space.
            let (compression_method, contents): (CompressionMethod, &[u8]) = match &deflated {
                Some(d) if d.len() < entry.payload.len() => {
                    (CompressionMethod::Deflate, d.as_slice())
                }
                _ => (CompressionMethod::None, entry.payload.as_slice()),
            };

            // Readers check this after inflating, so it covers the original bytes.
            let crc32 = crc32fast::hash(&entry.payload);
            let compressed_size = arch::u32(contents.len(), "compressed size")?;
            let uncompressed_size = arch::u32(entry.payload.len(), "uncompressed size")?;
            debug!(
                "Writing {} ({:?}, {} -> {} bytes, CRC {:08x}) at offset {}",
                entry.display_name(),
                compression_method,
                uncompressed_size,
                compressed_size,
                crc32,
                header_offset
            );

            spec::LocalFileHeader {
                compression_method,
                last_modified_time: entry.last_modified.time,
                last_modified_date: entry.last_modified.date,
                crc32,
                compressed_size,
                uncompressed_size,
                path: &entry.name,
            }
            .write(&mut files)?;
            files.extend_from_slice(contents);

            spec::CentralDirectoryEntry {
                compression_method,
                last_modified_time: entry.last_modified.time,
                last_modified_date: entry.last_modified.date,
                crc32,
                compressed_size,
                uncompressed_size,
                header_offset,
                path: &entry.name,
            }
            .write(&mut central_directory)?;
        }

        let eocdr = spec::EndOfCentralDirectory {
            entries: arch::u16(self.entries.len(), "entry count")?,
            central_directory_size: arch::u32(central_directory.len(), "central directory size")?,
            central_directory_offset: arch::u32(files.len(), "central directory offset")?,
        };

        let mut archive = files;
        archive.reserve(central_directory.len() + spec::EndOfCentralDirectory::size_in_file());
        archive.extend_from_slice(&central_directory);
        eocdr.write(&mut archive);

        debug!(
            "Exported {} entries ({} bytes) at level {}",
            self.entries.len(),
            archive.len(),
            level.get()
        );
        Ok(archive)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::io;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    use crate::clock::FixedClock;
    use crate::spec::test::{read_u16, read_u32};

    /// 2020-09-13 12:26:40 UTC
    const SOME_TIME: i64 = 1_600_000_000;

    fn builder() -> ZipBuilder {
        ZipBuilder::with_options(ZipOptions::default().time_zone(DosTimeZone::Utc))
            .with_clock(FixedClock(SOME_TIME))
    }

    /// Returns (entries, central directory size, central directory offset)
    /// from the End of central directory record at the back of `archive`.
    fn parse_eocdr(archive: &[u8]) -> (u16, u32, u32) {
        let mut eocdr = &archive[archive.len() - spec::EndOfCentralDirectory::size_in_file()..];
        assert_eq!(eocdr[..4], spec::EOCDR_MAGIC);
        eocdr = &eocdr[4..];
        assert_eq!(read_u16(&mut eocdr), 0);
        assert_eq!(read_u16(&mut eocdr), 0);
        let on_this_disk = read_u16(&mut eocdr);
        let entries = read_u16(&mut eocdr);
        assert_eq!(on_this_disk, entries);
        let size = read_u32(&mut eocdr);
        let offset = read_u32(&mut eocdr);
        assert_eq!(read_u16(&mut eocdr), 0);
        (entries, size, offset)
    }

    #[test]
    fn strips_separators() {
        let mut zip = builder();
        assert_eq!(zip.add("a/b\\c.txt", "abc", None).unwrap(), 1);
        assert_eq!(zip.entries()[0].name(), b"abc.txt");
        assert_eq!(zip.entries()[0].display_name(), "abc.txt");

        assert_eq!(zip.add("//\\", "", None).unwrap(), 2);
        assert_eq!(zip.entries()[1].name(), b"");
    }

    #[test]
    fn counts_and_keeps_order() {
        let mut zip = builder();
        assert!(zip.is_empty());
        assert_eq!(zip.add("b", "2", None).unwrap(), 1);
        assert_eq!(zip.add("a", "1", None).unwrap(), 2);
        assert_eq!(zip.add("b", "3", None).unwrap(), 3);
        assert_eq!(zip.len(), 3);
        let names: Vec<&[u8]> = zip.entries().iter().map(Entry::name).collect();
        assert_eq!(names, [&b"b"[..], b"a", b"b"]);
    }

    #[test]
    fn capacity() {
        let mut zip = builder();
        for i in 0..spec::MAX_ENTRIES {
            assert_eq!(zip.add("x", "", None).unwrap(), i + 1);
        }
        assert!(matches!(
            zip.add("one too many", "", None),
            Err(ZipError::TooManyEntries)
        ));
        assert_eq!(zip.len(), spec::MAX_ENTRIES);
    }

    #[test]
    fn name_length() {
        let mut zip = builder();
        let longest = vec![b'n'; spec::MAX_NAME_LENGTH];
        zip.add(&longest, "", None).unwrap();

        let too_long = vec![b'n'; spec::MAX_NAME_LENGTH + 1];
        assert!(matches!(
            zip.add(&too_long, "", None),
            Err(ZipError::NameTooLong(65536))
        ));
        assert_eq!(zip.len(), 1);

        // Measured after sanitizing
        let mut slashed = vec![b'n'; spec::MAX_NAME_LENGTH];
        slashed.push(b'/');
        zip.add(&slashed, "", None).unwrap();
        assert_eq!(zip.len(), 2);
    }

    #[test]
    fn timestamps() {
        let mut zip = builder();
        zip.add("clock", "", None).unwrap();
        zip.add("given", "", Some(1_615_734_567)).unwrap();
        zip.add("ancient", "", Some(0)).unwrap();
        zip.add("epoch", "", Some(MSDOS_EPOCH)).unwrap();

        let entries = zip.entries();
        assert_eq!(entries[0].modified(), SOME_TIME);
        assert_eq!(
            entries[0].last_modified(),
            DosDateTime::from_timestamp(SOME_TIME, DosTimeZone::Utc)
        );
        assert_eq!(
            entries[1].last_modified(),
            DosDateTime {
                time: 31021,
                date: 21102
            }
        );
        assert_eq!(entries[2].modified(), MSDOS_EPOCH);
        assert_eq!(entries[2].last_modified(), entries[3].last_modified());
        assert_eq!(entries[2].last_modified(), DosDateTime::MIN);
    }

    #[test]
    fn timestamps_fixed_at_insertion() {
        let now = Arc::new(AtomicI64::new(SOME_TIME));
        let clock_now = now.clone();
        let mut zip = ZipBuilder::with_options(ZipOptions::default().time_zone(DosTimeZone::Utc))
            .with_clock(move || clock_now.load(Ordering::SeqCst));

        zip.add("first", "", None).unwrap();
        let before = zip.export_with_level(0).unwrap();

        // A day later
        now.store(SOME_TIME + 86_400, Ordering::SeqCst);
        assert_eq!(zip.export_with_level(0).unwrap(), before);

        zip.add("second", "", None).unwrap();
        assert_ne!(
            zip.entries()[0].last_modified(),
            zip.entries()[1].last_modified()
        );
    }

    #[test]
    fn empty_archive() {
        let archive = builder().export_with_level(0).unwrap();
        assert_eq!(archive.len(), 22);
        assert_eq!(parse_eocdr(&archive), (0, 0, 0));
    }

    #[test]
    fn full_archive() {
        let mut zip = builder();
        for _ in 0..spec::MAX_ENTRIES {
            zip.add("x", "", None).unwrap();
        }
        let archive = zip.export_with_level(0).unwrap();

        let local = spec::MAX_ENTRIES * local_size(b"x");
        let central = spec::MAX_ENTRIES * (spec::CentralDirectoryEntry::fixed_size_in_file() + 1);
        assert_eq!(archive.len(), local + central + 22);
        assert_eq!(
            parse_eocdr(&archive),
            (0xffff, central as u32, local as u32)
        );

        // The last central directory entry points at the last local header.
        let last_cde = &archive
            [local + central - spec::CentralDirectoryEntry::fixed_size_in_file() - 1..];
        assert_eq!(last_cde[..4], spec::CENTRAL_DIRECTORY_MAGIC);
        let mut offset = &last_cde[42..];
        assert_eq!(read_u32(&mut offset) as usize, local - local_size(b"x"));
    }

    fn local_size(name: &[u8]) -> usize {
        spec::LocalFileHeader::fixed_size_in_file() + name.len()
    }

    #[test]
    fn layout() {
        let mut zip = builder();
        zip.add("a.txt", "1234", None).unwrap();
        zip.add("bb.txt", "", None).unwrap();
        let archive = zip.export_with_level(0).unwrap();

        let first_local = local_size(b"a.txt") + 4;
        let second_local = local_size(b"bb.txt");
        let central = spec::CentralDirectoryEntry::fixed_size_in_file() * 2 + 5 + 6;
        assert_eq!(archive.len(), first_local + second_local + central + 22);

        let (entries, size, offset) = parse_eocdr(&archive);
        assert_eq!(entries, 2);
        assert_eq!(size as usize, central);
        assert_eq!(offset as usize, first_local + second_local);

        // First entry: stored, CRC of "1234", contents right after the name
        let mut local = &archive[8..];
        assert_eq!(read_u16(&mut local), 0);
        local = &local[4..];
        assert_eq!(read_u32(&mut local), 0x9be3e0a3);
        assert_eq!(&archive[35..39], b"1234");
        assert_eq!(
            archive[first_local..first_local + 4],
            spec::LOCAL_FILE_HEADER_MAGIC
        );

        // The second central directory entry points at the second local header.
        let second_cde = offset as usize + spec::CentralDirectoryEntry::fixed_size_in_file() + 5;
        let mut cde = &archive[second_cde..];
        assert_eq!(cde[..4], spec::CENTRAL_DIRECTORY_MAGIC);
        cde = &cde[16..];
        assert_eq!(read_u32(&mut cde), 0); // CRC of nothing
        cde = &cde[18..];
        assert_eq!(read_u32(&mut cde), 32);
        assert_eq!(read_u32(&mut cde) as usize, first_local);
        assert_eq!(cde[..6], *b"bb.txt");
        assert_eq!(cde.len(), 6 + 22);
    }

    #[test]
    fn idempotent() {
        let mut zip = builder().with_deflater(Fake { shrink: true });
        zip.add("one", "uno", None).unwrap();
        zip.add("two", "dos dos dos dos dos dos dos dos dos", None)
            .unwrap();
        assert_eq!(zip.export().unwrap(), zip.export().unwrap());
        assert_eq!(
            zip.export_with_level(0).unwrap(),
            zip.export_with_level(0).unwrap()
        );
    }

    #[cfg(feature = "deflate")]
    #[test]
    fn default_deflater_is_flate2() {
        let mut zip = ZipBuilder::new();
        zip.add("two", "dos dos dos dos dos dos dos dos dos", None)
            .unwrap();
        let archive = zip.export().unwrap();
        assert_eq!(method_of_first(&archive), 8);
        assert_eq!(archive, zip.export().unwrap());
    }

    #[cfg(not(feature = "deflate"))]
    #[test]
    fn no_default_deflater() {
        let mut zip = ZipBuilder::new();
        zip.add("two", "dos dos dos dos dos dos dos dos dos", None)
            .unwrap();
        assert!(matches!(zip.export(), Err(ZipError::Unavailable(_))));
        let archive = zip.export_with_level(0).unwrap();
        assert_eq!(method_of_first(&archive), 0);
    }

    #[test]
    fn unavailable_without_deflater() {
        let mut zip = builder().without_deflater();
        zip.add("x", "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx", None)
            .unwrap();
        assert!(matches!(zip.export(), Err(ZipError::Unavailable(_))));
        assert!(matches!(
            zip.export_with_level(42),
            Err(ZipError::Unavailable(_))
        ));
        // Storing doesn't need one.
        let stored = zip.export_with_level(0).unwrap();
        assert_eq!(parse_eocdr(&stored).0, 1);
    }

    #[test]
    fn level_normalization() {
        assert_eq!(CompressionLevel::new(10), CompressionLevel::DEFAULT);
        assert_eq!(CompressionLevel::new(u32::MAX).get(), 6);
        assert_eq!(CompressionLevel::new(0), CompressionLevel::STORED);
        assert_eq!(CompressionLevel::new(9).get(), 9);
        assert_eq!(
            ZipOptions::default().compression_level(99).compression_level,
            CompressionLevel::DEFAULT
        );
    }

    /// "Compresses" by wrapping the input in a fake zlib header and trailer,
    /// so the result is always six bytes bigger, or by emptying it.
    struct Fake {
        shrink: bool,
    }

    impl Deflate for Fake {
        fn compress(&self, data: &[u8], _level: u32) -> io::Result<Vec<u8>> {
            let mut out = vec![0x78, 0x9c];
            if !self.shrink {
                out.extend_from_slice(data);
            }
            out.extend_from_slice(&[0, 0, 0, 0]);
            Ok(out)
        }
    }

    fn method_of_first(archive: &[u8]) -> u16 {
        let mut method = &archive[8..];
        read_u16(&mut method)
    }

    #[test]
    fn never_inflates() {
        let mut zip = builder().with_deflater(Fake { shrink: false });
        zip.add("grows", "abcdef", None).unwrap();
        let archive = zip.export().unwrap();
        assert_eq!(method_of_first(&archive), 0);
        let mut sizes = &archive[18..];
        assert_eq!(read_u32(&mut sizes), 6);
        assert_eq!(read_u32(&mut sizes), 6);
    }

    #[test]
    fn keeps_smaller() {
        let mut zip = builder().with_deflater(Fake { shrink: true });
        zip.add("shrinks", "abcdef", None).unwrap();
        let archive = zip.export().unwrap();
        assert_eq!(method_of_first(&archive), 8);
        let mut sizes = &archive[14..];
        // CRC still describes the original
        assert_eq!(read_u32(&mut sizes), crc32fast::hash(b"abcdef"));
        assert_eq!(read_u32(&mut sizes), 0);
        assert_eq!(read_u32(&mut sizes), 6);
    }

    #[cfg(feature = "deflate")]
    #[test]
    fn empty_payload_is_stored() {
        // An empty DEFLATE stream is still a couple bytes.
        let mut zip = builder();
        zip.add("empty", "", None).unwrap();
        assert_eq!(method_of_first(&zip.export().unwrap()), 0);
    }

    #[test]
    fn compression_error() {
        struct Broken;

        impl Deflate for Broken {
            fn compress(&self, _data: &[u8], _level: u32) -> io::Result<Vec<u8>> {
                Err(io::Error::new(io::ErrorKind::Other, "nope"))
            }
        }

        let mut zip = builder().with_deflater(Broken);
        zip.add("x", "x", None).unwrap();
        assert!(matches!(zip.export(), Err(ZipError::Compression(_))));
        assert!(zip.export_with_level(0).is_ok());
    }
}
