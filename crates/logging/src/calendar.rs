//! crates/logging/src/calendar.rs
//! Civil date and time from Unix timestamps under a fixed UTC offset.
//!
//! The conversion is closed-form integer arithmetic (Howard Hinnant's
//! `civil_from_days`), so log timestamps and file names never depend on the
//! OS timezone database or daylight-saving rules. Euclidean division keeps it
//! exact for instants before 1970 and for every `i64` second count.

use std::time::{SystemTime, UNIX_EPOCH};

/// Hour offset from UTC applied when none is configured.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

const SECONDS_PER_MINUTE: i64 = 60;
const MINUTES_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 24;
const DAYS_PER_ERA: i64 = 146_097;
// Days from 0000-03-01 to 1970-01-01.
const EPOCH_SHIFT: i64 = 719_468;
// 1970-01-01 was a Thursday.
const EPOCH_WEEKDAY: i64 = 4;

/// Broken-down civil time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CivilTime {
    /// Proleptic Gregorian year.
    pub year: i64,
    /// Month, 1 through 12.
    pub month: u8,
    /// Day of month, 1 through 31.
    pub day: u8,
    /// Hour, 0 through 23.
    pub hour: u8,
    /// Minute, 0 through 59.
    pub minute: u8,
    /// Second, 0 through 59.
    pub second: u8,
    /// Day of week, 0 (Sunday) through 6 (Saturday).
    pub weekday: u8,
}

/// Converts `secs` since the Unix epoch to civil time at `utc_offset_hours`.
///
/// # Examples
///
/// ```
/// use logging::civil_from_timestamp;
///
/// let civil = civil_from_timestamp(1_700_000_000, 8);
/// assert_eq!((civil.year, civil.month, civil.day), (2023, 11, 15));
/// assert_eq!((civil.hour, civil.minute, civil.second), (6, 13, 20));
/// assert_eq!(civil.weekday, 3);
/// ```
pub const fn civil_from_timestamp(secs: i64, utc_offset_hours: i32) -> CivilTime {
    let second = secs.rem_euclid(SECONDS_PER_MINUTE);
    let minutes = secs.div_euclid(SECONDS_PER_MINUTE);
    let minute = minutes.rem_euclid(MINUTES_PER_HOUR);
    let hours = minutes.div_euclid(MINUTES_PER_HOUR) + utc_offset_hours as i64;
    let hour = hours.rem_euclid(HOURS_PER_DAY);
    let days = hours.div_euclid(HOURS_PER_DAY);
    let weekday = (days + EPOCH_WEEKDAY).rem_euclid(7);
    let (year, month, day) = civil_from_days(days);

    CivilTime {
        year,
        month,
        day,
        hour: hour as u8,
        minute: minute as u8,
        second: second as u8,
        weekday: weekday as u8,
    }
}

const fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + EPOCH_SHIFT;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z.rem_euclid(DAYS_PER_ERA); // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365; // [0, 399]
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11], March based
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month as u8, day as u8)
}

/// A wall-clock instant with microsecond resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch; negative before 1970.
    pub secs: i64,
    /// Microseconds into the second, always below 1,000,000.
    pub micros: u32,
}

impl Timestamp {
    /// Creates a timestamp; `micros` is clamped below one second.
    pub const fn new(secs: i64, micros: u32) -> Self {
        let micros = if micros > 999_999 { 999_999 } else { micros };
        Self { secs, micros }
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Converts a [`SystemTime`], including instants before the epoch.
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => Self {
                secs: elapsed.as_secs() as i64,
                micros: elapsed.subsec_micros(),
            },
            Err(before) => {
                let before = before.duration();
                let mut secs = -(before.as_secs() as i64);
                let mut micros = before.subsec_micros();
                if micros > 0 {
                    secs -= 1;
                    micros = 1_000_000 - micros;
                }
                Self { secs, micros }
            }
        }
    }

    /// Milliseconds since the epoch, saturating at the `i64` range.
    pub const fn as_millis(self) -> i64 {
        self.secs
            .saturating_mul(1000)
            .saturating_add((self.micros / 1000) as i64)
    }

    /// Civil time of this instant at `utc_offset_hours`.
    pub const fn civil(self, utc_offset_hours: i32) -> CivilTime {
        civil_from_timestamp(self.secs, utc_offset_hours)
    }
}
