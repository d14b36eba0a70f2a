//! Error types for phase search and ephemeris computation.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kosmorro_ephem::EphemError;
use kosmorro_time::{TimeError, TimezoneOffset};

/// Errors from phase search or ephemeris orchestration.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// Error from date resolution or timezone conversion.
    Time(TimeError),
    /// Error from rise/set computation.
    Ephem(EphemError),
    /// The lunar cycle is undefined at this Julian Date (UTC).
    UnsupportedInstant(f64),
    /// A supported local date lands outside the supported range once the
    /// timezone offset is removed.
    OffsetOutOfRange { jd: f64, offset: TimezoneOffset },
    /// Search range is empty or reversed.
    InvalidRange(&'static str),
    /// A bounded search exhausted its iterations.
    NoConvergence(&'static str),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time(e) => write!(f, "{e}"),
            Self::Ephem(e) => write!(f, "{e}"),
            Self::UnsupportedInstant(jd) => write!(
                f,
                "unsupported instant: JD {jd} is outside the supported range (years 1000 to 3000)"
            ),
            Self::OffsetOutOfRange { jd, offset } => write!(
                f,
                "unsupported timezone: the {offset} offset moves the date to JD {jd:.2}, \
                 outside the supported range (years 1000 to 3000)"
            ),
            Self::InvalidRange(msg) => write!(f, "invalid range: {msg}"),
            Self::NoConvergence(msg) => write!(f, "no convergence: {msg}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Time(e) => Some(e),
            Self::Ephem(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TimeError> for SearchError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

impl From<EphemError> for SearchError {
    fn from(e: EphemError) -> Self {
        Self::Ephem(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_errors_keep_their_message() {
        let e: SearchError = TimeError::InvalidDateSpec("'x'".into()).into();
        assert_eq!(e.to_string(), "invalid date: 'x'");
        assert!(e.source().is_some());
    }

    #[test]
    fn unsupported_instant_mentions_range() {
        let msg = SearchError::UnsupportedInstant(1.0).to_string();
        assert!(msg.starts_with("unsupported instant"), "{msg}");
    }

    #[test]
    fn offset_out_of_range_names_the_offset() {
        let e = SearchError::OffsetOutOfRange {
            jd: 2042874.834,
            offset: TimezoneOffset::new(1e7).unwrap(),
        };
        assert_eq!(
            e.to_string(),
            "unsupported timezone: the UTC+10000000 offset moves the date to JD 2042874.83, \
             outside the supported range (years 1000 to 3000)"
        );
    }
}
