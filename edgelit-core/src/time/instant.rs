//! Points in time
//!
//! UTC and local instants are kept as separate types so a local value can
//! never be fed back into the timezone converter by mistake.

use core::fmt;

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};

/// Seconds per minute
pub const SECS_PER_MINUTE: i64 = 60;

/// Seconds per day
pub const SECS_PER_DAY: i64 = 86_400;

/// Length of the [`LocalTime`] text form, `dd-mm-YYYY HH:MM:SS`
pub const LOCAL_TIME_TEXT_LEN: usize = 19;

/// Seconds since the Unix epoch, UTC
///
/// Thirty-two unsigned bits, as delivered by NTP once the era is
/// resolved. Covers 1970 to 2106.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UtcInstant(u32);

impl UtcInstant {
    /// 1970-01-01 00:00:00 UTC, the value before the first sync
    pub const EPOCH: UtcInstant = UtcInstant(0);

    pub const fn from_unix_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    pub const fn unix_seconds(self) -> u32 {
        self.0
    }

    /// Instant `seconds` later, saturating at the end of the range
    pub const fn saturating_add_seconds(self, seconds: u64) -> Self {
        let sum = self.0 as u64 + seconds;
        if sum > u32::MAX as u64 {
            Self(u32::MAX)
        } else {
            Self(sum as u32)
        }
    }

    /// Apply a signed offset in seconds, saturating at both ends
    pub const fn offset_by(self, seconds: i64) -> Self {
        let shifted = self.0 as i64 + seconds;
        if shifted < 0 {
            Self(0)
        } else if shifted > u32::MAX as i64 {
            Self(u32::MAX)
        } else {
            Self(shifted as u32)
        }
    }

    /// Calendar year this instant falls in, in UTC
    pub fn year(self) -> i32 {
        civil(self.0 as i64).year()
    }
}

impl From<u32> for UtcInstant {
    fn from(seconds: u32) -> Self {
        Self(seconds)
    }
}

/// Seconds since the Unix epoch on the local wall clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalInstant(i64);

impl LocalInstant {
    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    pub const fn seconds(self) -> i64 {
        self.0
    }

    /// Local instant for `utc` under an offset of `offset_minutes`
    pub const fn from_utc(utc: UtcInstant, offset_minutes: i16) -> Self {
        Self(utc.0 as i64 + offset_minutes as i64 * SECS_PER_MINUTE)
    }

    /// Calendar year on the local wall clock
    pub fn year(self) -> i32 {
        civil(self.0).year()
    }

    /// Break the instant down into calendar fields
    pub fn to_local_time(self, abbreviation: &'static str) -> LocalTime {
        let dt = civil(self.0);
        LocalTime {
            year: dt.year() as u16,
            month: dt.month() as u8,
            day: dt.day() as u8,
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            second: dt.second() as u8,
            abbreviation,
        }
    }
}

/// Calendar breakdown of `seconds` since the epoch
///
/// Every value reachable from a [`UtcInstant`] plus a timezone offset is
/// inside chrono's range; the epoch fallback only guards the type.
fn civil(seconds: i64) -> NaiveDateTime {
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

/// Local wall-clock time, broken down for display and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Abbreviation of the rule in effect, e.g. "CET"
    pub abbreviation: &'static str,
}

impl LocalTime {
    /// Display text in a fixed-size buffer
    pub fn to_text(&self) -> heapless::String<LOCAL_TIME_TEXT_LEN> {
        use core::fmt::Write;

        let mut text = heapless::String::new();
        // Every field is bounded, so the text always fits
        let _ = write!(text, "{}", self);
        text
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}-{:02}-{:04} {:02}:{:02}:{:02}",
            self.day, self.month, self.year, self.hour, self.minute, self.second
        )
    }
}
