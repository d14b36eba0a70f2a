//! Temporal model: instants, civil time, timezone offsets and date arguments.
//!
//! This crate provides:
//! - [`Instant`], the UTC-anchored storage form of every moment
//! - [`TimezoneOffset`] and [`LocalTime`] for civil display
//! - [`DateSpec`] parsing (`YYYY-MM-DD` or `[+-]YyMmDd`) and resolution
//! - Julian Date constants and mean sidereal time
//!
//! Nothing here reads the system clock: "now" is always passed in.

pub mod date_spec;
pub mod error;
pub mod instant;
pub mod julian;
pub mod sidereal;
pub mod timezone;

pub use date_spec::{DateInterval, DateSpec, resolve_date, resolve_date_in};
pub use error::TimeError;
pub use instant::Instant;
pub use julian::{
    DAYS_PER_JULIAN_CENTURY, J2000_JD, SECONDS_PER_DAY, jd_to_centuries, jd_to_seconds,
    seconds_to_jd,
};
pub use sidereal::{SIDEREAL_REVOLUTIONS_PER_DAY, gmst_rad, local_sidereal_time_rad};
pub use timezone::{LocalTime, TimezoneOffset, apply_timezone_offset};
