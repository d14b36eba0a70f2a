//! Julian Date constants and conversions.
//!
//! All values are UTC-based. Leap seconds are not modelled: a civil day is
//! always 86 400 seconds, which is well below the minute resolution of the
//! rendered output.

/// Julian Date of J2000.0 (2000-01-01T12:00:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds per civil day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days per Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Unix timestamp of J2000.0.
pub const J2000_UNIX_SECONDS: i64 = 946_728_000;

/// Convert seconds past J2000.0 to a Julian Date.
pub fn seconds_to_jd(seconds: f64) -> f64 {
    J2000_JD + seconds / SECONDS_PER_DAY
}

/// Convert a Julian Date to seconds past J2000.0.
pub fn jd_to_seconds(jd: f64) -> f64 {
    (jd - J2000_JD) * SECONDS_PER_DAY
}

/// Julian centuries elapsed since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}
