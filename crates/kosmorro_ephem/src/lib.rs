//! Sun and Moon ephemerides for an observer on Earth.
//!
//! - [`positions`]: low-precision apparent equatorial coordinates
//! - [`riseset`]: rise, culmination and set within a civil day
//!
//! Precision is aimed at minute-level display, not at astrometry.

pub mod error;
pub mod positions;
pub mod riseset;
pub mod riseset_types;

pub use error::EphemError;
pub use positions::{
    AU_KM, EquatorialPosition, mean_obliquity_deg, moon_equatorial, object_equatorial,
    sun_equatorial,
};
pub use riseset::{
    approximate_local_noon_jd, compute_rise_set, compute_transit, object_ephemeris_for_day,
};
pub use riseset_types::{
    ALL_OBJECTS, CelestialObject, EARTH_EQUATORIAL_RADIUS_KM, GeoLocation, ObjectEphemeris,
    RiseSetConfig, RiseSetEvent, RiseSetResult,
};
