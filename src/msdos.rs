//! MS-DOS date and time, as found in every ZIP header.
//!
//! Two 16-bit words: a date counting years from 1980,
//! and a time with two-second precision.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use log::*;

/// 1980-01-01T00:00:00Z as seconds since the Unix epoch.
/// Nothing earlier fits the format.
pub const MSDOS_EPOCH: i64 = 315_532_800;

/// Which calendar to break timestamps into before packing them.
///
/// MS-DOS timestamps don't carry a zone; readers show them as-is.
/// Local time matches what most archivers do,
/// UTC makes output independent of the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DosTimeZone {
    #[default]
    Local,
    Utc,
}

/// A packed MS-DOS date and time
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DosDateTime {
    /// `(seconds / 2) | minutes << 5 | hours << 11`
    pub time: u16,
    /// `day | month << 5 | (year - 1980) << 9`
    pub date: u16,
}

impl DosDateTime {
    /// 1980-01-01 00:00:00
    pub const MIN: DosDateTime = DosDateTime {
        time: 0,
        date: 1 | (1 << 5),
    };

    /// 2107-12-31 23:59:58, the last moment the seven year bits can hold
    pub const MAX: DosDateTime = DosDateTime {
        time: (58 >> 1) | (59 << 5) | (23 << 11),
        date: 31 | (12 << 5) | (127 << 9),
    };

    /// Packs seconds since the Unix epoch, clamping to the representable range.
    pub fn from_timestamp(timestamp: i64, zone: DosTimeZone) -> Self {
        let clamped = timestamp.max(MSDOS_EPOCH);
        if clamped != timestamp {
            warn!("Timestamp {timestamp} predates the MS-DOS epoch; using {MSDOS_EPOCH}");
        }

        let when = match zone {
            DosTimeZone::Local => Local
                .timestamp_opt(clamped, 0)
                .earliest()
                .map(|t| t.naive_local()),
            DosTimeZone::Utc => Utc.timestamp_opt(clamped, 0).single().map(|t| t.naive_utc()),
        };

        match when {
            Some(when) => Self::from_naive(&when),
            None => {
                warn!("Timestamp {timestamp} is out of calendar range");
                Self::MAX
            }
        }
    }

    /// Packs calendar fields, clamping years outside 1980-2107.
    pub fn from_naive(when: &NaiveDateTime) -> Self {
        let year = when.year();
        if year < 1980 {
            // The epoch clamp is in UTC, so this happens west of Greenwich.
            warn!("{when} predates 1980; clamping");
            return Self::MIN;
        }
        if year > 2107 {
            warn!("{when} is after 2107; clamping");
            return Self::MAX;
        }

        let date = (when.day() as u16) | (when.month() as u16) << 5 | ((year - 1980) as u16) << 9;
        let time =
            (when.second() as u16) >> 1 | (when.minute() as u16) << 5 | (when.hour() as u16) << 11;
        Self { time, date }
    }

    /// Unpacks the calendar fields, or `None` if they don't form a real date.
    pub fn to_naive(self) -> Option<NaiveDateTime> {
        let seconds = (0b0000_0000_0001_1111 & self.time) as u32 * 2; // MSDOS uses 2-second precision
        let minutes = (0b0000_0111_1110_0000 & self.time) as u32 >> 5;
        let hours = (0b1111_1000_0000_0000 & self.time) as u32 >> 11;

        let days = (0b0000_0000_0001_1111 & self.date) as u32;
        let months = (0b0000_0001_1110_0000 & self.date) as u32 >> 5;
        let years = ((0b1111_1110_0000_0000 & self.date) >> 9) as i32 + 1980;

        NaiveDate::from_ymd_opt(years, months, days)?.and_hms_opt(hours, minutes, seconds)
    }
}
