//! Fixed timezone offsets and civil (local) time.
//!
//! Offsets are plain signed hour counts (`2` for UTC+2, `-3.5` for UTC-3:30).
//! There is no timezone database and no daylight-saving handling: the offset
//! given is the offset applied.

use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::TimeError;
use crate::instant::Instant;

/// A fixed offset from UTC, in hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimezoneOffset {
    hours: f64,
}

impl TimezoneOffset {
    /// UTC itself.
    pub const UTC: Self = Self { hours: 0.0 };

    /// Create an offset. Any finite number of hours is accepted.
    pub fn new(hours: f64) -> Result<Self, TimeError> {
        if !hours.is_finite() {
            return Err(TimeError::InvalidTimezone(format!(
                "{hours} is not a finite number of hours"
            )));
        }
        Ok(Self { hours })
    }

    /// Offset in hours.
    pub fn hours(self) -> f64 {
        self.hours
    }

    /// Offset in seconds.
    pub fn seconds(self) -> f64 {
        self.hours * 3600.0
    }

    /// Human label such as `UTC+2`, `UTC-3` or `UTC+5:30`.
    pub fn label(self) -> String {
        let sign = if self.hours < 0.0 { '-' } else { '+' };
        let total_minutes = (self.hours.abs() * 60.0).round() as u64;
        let (h, m) = (total_minutes / 60, total_minutes % 60);
        if m == 0 {
            format!("UTC{sign}{h}")
        } else {
            format!("UTC{sign}{h}:{m:02}")
        }
    }
}

impl Default for TimezoneOffset {
    fn default() -> Self {
        Self::UTC
    }
}

impl Display for TimezoneOffset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Civil date and time in a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTime {
    datetime: NaiveDateTime,
    offset: TimezoneOffset,
}

impl LocalTime {
    /// Civil date-time (wall clock in `offset`).
    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    /// Civil date.
    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }

    /// The offset this wall-clock reading is expressed in.
    pub fn offset(&self) -> TimezoneOffset {
        self.offset
    }

    pub fn hour(&self) -> u32 {
        self.datetime.hour()
    }

    pub fn minute(&self) -> u32 {
        self.datetime.minute()
    }

    /// Convert back to the UTC-anchored instant.
    pub fn to_instant(&self) -> Instant {
        Instant::from_naive_utc(&self.datetime).add_seconds(-self.offset.seconds())
    }

    /// Build a local time from a wall-clock reading in `offset`.
    pub fn from_civil(datetime: NaiveDateTime, offset: TimezoneOffset) -> Self {
        Self { datetime, offset }
    }

    /// Local midnight at the start of this civil day.
    pub fn start_of_day(&self) -> Self {
        Self {
            datetime: self.datetime.date().and_time(chrono::NaiveTime::MIN),
            offset: self.offset,
        }
    }
}

impl Display for LocalTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02} ({})",
            self.datetime.year(),
            self.datetime.month(),
            self.datetime.day(),
            self.datetime.hour(),
            self.datetime.minute(),
            self.datetime.second(),
            self.offset
        )
    }
}

/// Shift an instant into the civil time of `offset`.
///
/// Pure arithmetic: fails only when the shifted value leaves the calendar.
pub fn apply_timezone_offset(
    instant: Instant,
    offset: TimezoneOffset,
) -> Result<LocalTime, TimeError> {
    let shifted = instant.add_seconds(offset.seconds()).to_datetime()?;
    Ok(LocalTime {
        datetime: shifted.naive_utc(),
        offset,
    })
}
