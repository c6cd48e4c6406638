//! memzip builds ZIP archives entirely in memory using a simple API:
//!
//! ```
//! # use memzip::*;
//! # #[cfg(feature = "deflate")] {
//! let mut zip = ZipBuilder::new();
//! zip.add("hello.txt", "Hello, world!", None)?;
//! zip.add("numbers.csv", "1,2,3\n4,5,6\n", Some(1_600_000_000))?;
//! let bytes: Vec<u8> = zip.export()?;
//! # }
//! # Ok::<(), ZipError>(())
//! ```
//! What you do with the bytes (write them to disk, send them over the wire,
//! ...) is your business.
//!
//! Each entry is DEFLATEd on export, but only kept that way if it got smaller;
//! otherwise it's stored as-is. Names are flat: `/` and `\` are stripped,
//! so there are no directories to create (or escape from) on extraction.
//!
//! For reproducible output, fix the clock and the time zone,
//! or pass every entry an explicit timestamp:
//! ```
//! # use memzip::*;
//! let options = ZipOptions::default()
//!     .compression_level(9)
//!     .time_zone(DosTimeZone::Utc);
//! let mut zip = ZipBuilder::with_options(options).with_clock(FixedClock(1_600_000_000));
//! zip.add("a", "same bytes every time", None)?;
//! # #[cfg(feature = "deflate")]
//! assert_eq!(zip.export()?, zip.export()?);
//! # Ok::<(), ZipError>(())
//! ```
//!
//! This is a writer only: no reading, Zip64, encryption, streaming,
//! or multi-disk archives. The 16- and 32-bit header fields bound
//! how much can go in, and we refuse anything that won't fit.

pub mod clock;
pub mod deflate;
pub mod msdos;
pub mod result;
pub mod write;

pub use clock::{Clock, FixedClock, SystemClock};
#[cfg(feature = "deflate")]
pub use deflate::ZlibDeflater;
pub use deflate::Deflate;
pub use msdos::{DosDateTime, DosTimeZone};
pub use result::{ZipError, ZipResult};
pub use write::{CompressionLevel, CompressionMethod, Entry, ZipBuilder, ZipOptions};

mod arch;
mod spec;
