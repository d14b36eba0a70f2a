//! Error types for date resolution and timezone handling.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from date parsing, date arithmetic, or timezone shifts.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// The date argument is neither `YYYY-MM-DD` nor a valid interval.
    InvalidDateSpec(String),
    /// The instant cannot be represented on the civil calendar.
    UnsupportedInstant(String),
    /// The timezone offset is not a finite number of hours.
    InvalidTimezone(String),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateSpec(msg) => write!(f, "invalid date: {msg}"),
            Self::UnsupportedInstant(msg) => write!(f, "unsupported instant: {msg}"),
            Self::InvalidTimezone(msg) => write!(f, "invalid timezone: {msg}"),
        }
    }
}

impl Error for TimeError {}
