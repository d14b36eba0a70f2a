//! UTC-anchored instant.
//!
//! [`Instant`] is the canonical storage form for every moment the engine
//! handles. Civil representations ([`LocalTime`](crate::LocalTime)) are derived
//! from it by applying a timezone offset.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::TimeError;
use crate::julian::{J2000_UNIX_SECONDS, SECONDS_PER_DAY, jd_to_seconds, seconds_to_jd};

/// An absolute point in time, stored as UTC seconds past J2000.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Instant {
    utc_seconds: f64,
}

impl Instant {
    /// J2000.0 (2000-01-01T12:00:00Z).
    pub const J2000: Self = Self { utc_seconds: 0.0 };

    /// Create an instant from UTC seconds past J2000.0.
    pub fn from_utc_seconds(s: f64) -> Self {
        Self { utc_seconds: s }
    }

    /// Create an instant from a UTC Julian Date.
    pub fn from_jd_utc(jd: f64) -> Self {
        Self {
            utc_seconds: jd_to_seconds(jd),
        }
    }

    /// Create an instant from a chrono UTC date-time.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        let whole = (dt.timestamp() - J2000_UNIX_SECONDS) as f64;
        let frac = f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
        Self {
            utc_seconds: whole + frac,
        }
    }

    /// Create an instant from a naive date-time read as UTC.
    pub fn from_naive_utc(naive: &NaiveDateTime) -> Self {
        Self::from_datetime(&naive.and_utc())
    }

    /// Create an instant from UTC calendar fields.
    pub fn from_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .ok_or_else(|| {
                TimeError::UnsupportedInstant(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02} is not a calendar date"
                ))
            })?;
        Ok(Self::from_naive_utc(&naive).add_seconds(second))
    }

    /// UTC seconds past J2000.0.
    pub fn as_utc_seconds(self) -> f64 {
        self.utc_seconds
    }

    /// Julian Date in UTC.
    pub fn as_jd_utc(self) -> f64 {
        seconds_to_jd(self.utc_seconds)
    }

    /// Shift by a number of seconds.
    pub fn add_seconds(self, seconds: f64) -> Self {
        Self {
            utc_seconds: self.utc_seconds + seconds,
        }
    }

    /// Shift by a (possibly fractional) number of days.
    pub fn add_days(self, days: f64) -> Self {
        self.add_seconds(days * SECONDS_PER_DAY)
    }

    /// Convert to a chrono UTC date-time.
    ///
    /// Fails when the value is not finite or outside chrono's calendar.
    pub fn to_datetime(self) -> Result<DateTime<Utc>, TimeError> {
        let out_of_range =
            || TimeError::UnsupportedInstant(format!("{}s past J2000", self.utc_seconds));
        if !self.utc_seconds.is_finite() {
            return Err(out_of_range());
        }
        let mut secs = self.utc_seconds.floor();
        let mut nanos = ((self.utc_seconds - secs) * 1e9).round();
        if nanos >= 1e9 {
            secs += 1.0;
            nanos = 0.0;
        }
        if secs.abs() > i64::MAX as f64 / 2.0 {
            return Err(out_of_range());
        }
        let unix = (secs as i64)
            .checked_add(J2000_UNIX_SECONDS)
            .ok_or_else(out_of_range)?;
        DateTime::from_timestamp(unix, nanos as u32).ok_or_else(out_of_range)
    }
}

impl Display for Instant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Ok(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%SZ")),
            Err(_) => write!(f, "J2000{:+}s", self.utc_seconds),
        }
    }
}
