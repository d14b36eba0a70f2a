//! Error types for ephemeris calculations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kosmorro_time::TimeError;

/// Errors from rise/set computation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemError {
    /// Error from time conversion.
    Time(TimeError),
    /// Invalid geographic location parameter.
    InvalidLocation(&'static str),
    /// The search window is empty or reversed.
    InvalidWindow,
}

impl Display for EphemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time(e) => write!(f, "{e}"),
            Self::InvalidLocation(msg) => write!(f, "invalid location: {msg}"),
            Self::InvalidWindow => write!(f, "search window end must be after its start"),
        }
    }
}

impl Error for EphemError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Time(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TimeError> for EphemError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_errors_are_forwarded() {
        let e: EphemError = TimeError::UnsupportedInstant("year 90000".into()).into();
        assert_eq!(e.to_string(), "unsupported instant: year 90000");
        assert!(e.source().is_some());
    }

    #[test]
    fn own_variants_have_no_source() {
        assert!(EphemError::InvalidWindow.source().is_none());
        assert!(EphemError::InvalidLocation("latitude").source().is_none());
    }
}
