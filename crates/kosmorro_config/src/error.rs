//! Error types for configuration resolution.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kosmorro_ephem::EphemError;
use kosmorro_time::TimeError;

/// Errors from merging and validating user-supplied settings.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// A numeric setting does not parse as a number.
    InvalidNumber { name: &'static str, value: String },
    /// Latitude or longitude out of range.
    Location(EphemError),
    /// Bad date argument or timezone.
    Time(TimeError),
    /// Only one of latitude and longitude was given.
    IncompleteLocation,
    /// A binary format was requested without an output file.
    OutputRequired,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { name, value } => {
                write!(f, "invalid {name} '{value}': expected a number")
            }
            Self::Location(e) => write!(f, "{e}"),
            Self::Time(e) => write!(f, "{e}"),
            Self::IncompleteLocation => {
                write!(f, "latitude and longitude must be given together")
            }
            Self::OutputRequired => write!(
                f,
                "the PDF format requires an output file (use --output)"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Location(e) => Some(e),
            Self::Time(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EphemError> for ConfigError {
    fn from(e: EphemError) -> Self {
        Self::Location(e)
    }
}

impl From<TimeError> for ConfigError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
