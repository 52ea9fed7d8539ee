//! Alternative speed schedule values: time of day and active days.

use std::fmt;

use chrono::{NaiveTime, Timelike};

const SECONDS_PER_MINUTE: u32 = 60;
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Converts wire minutes-since-midnight into a time of day.
///
/// Values outside `0..1440` are not a valid time and yield midnight.
#[must_use]
pub fn time_from_minutes(minutes: i64) -> NaiveTime {
    if !is_minute_of_day(minutes) {
        return NaiveTime::default();
    }
    u32::try_from(minutes)
        .ok()
        .and_then(|m| NaiveTime::from_num_seconds_from_midnight_opt(m * SECONDS_PER_MINUTE, 0))
        .unwrap_or_default()
}

/// Whether `minutes` names a minute within one day.
#[must_use]
pub const fn is_minute_of_day(minutes: i64) -> bool {
    0 <= minutes && minutes < MINUTES_PER_DAY
}

/// Converts a time of day into wire minutes-since-midnight.
///
/// Seconds and fractions are truncated.
#[must_use]
pub fn minutes_from_time(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight() / SECONDS_PER_MINUTE)
}

/// Drops sub-minute precision from a time of day.
#[must_use]
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time_from_minutes(minutes_from_time(time))
}

/// Day-of-week bitmask for the alternative speed schedule.
///
/// The raw value from the daemon is kept verbatim. The named constants
/// follow the daemon's layout (Sunday is bit 0) but nothing in this crate
/// relies on them when decoding or encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AltSpeedDays(i64);

impl AltSpeedDays {
    pub const SUNDAY: Self = Self(1);
    pub const MONDAY: Self = Self(1 << 1);
    pub const TUESDAY: Self = Self(1 << 2);
    pub const WEDNESDAY: Self = Self(1 << 3);
    pub const THURSDAY: Self = Self(1 << 4);
    pub const FRIDAY: Self = Self(1 << 5);
    pub const SATURDAY: Self = Self(1 << 6);
    /// Monday through Friday.
    pub const WEEKDAYS: Self = Self(0b011_1110);
    /// Saturday and Sunday.
    pub const WEEKENDS: Self = Self(0b100_0001);
    /// Every day.
    pub const ALL: Self = Self(0b111_1111);

    /// Wraps a raw bitmask without validation.
    #[must_use]
    pub const fn from_bits(bits: i64) -> Self {
        Self(bits)
    }

    /// Returns the raw bitmask.
    #[must_use]
    pub const fn bits(self) -> i64 {
        self.0
    }

    /// Returns true if every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both masks.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl From<i64> for AltSpeedDays {
    fn from(bits: i64) -> Self {
        Self(bits)
    }
}

impl fmt::Display for AltSpeedDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#09b}", self.0)
    }
}
