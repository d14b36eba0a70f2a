//! Types for rise, culmination and set calculations.
//!
//! Provides the observer location, the objects handled, configuration, and
//! result types used by the rise/set computation module.

use kosmorro_time::Instant;

use crate::error::EphemError;

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
}

impl GeoLocation {
    /// Create a validated geographic location.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, EphemError> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(EphemError::InvalidLocation(
                "latitude must be between -90 and 90 degrees",
            ));
        }
        if !longitude_deg.is_finite() || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(EphemError::InvalidLocation(
                "longitude must be between -180 and 180 degrees",
            ));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Longitude in radians (east positive).
    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

/// Objects whose ephemerides are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CelestialObject {
    Sun,
    Moon,
}

/// All objects, in display order.
pub const ALL_OBJECTS: [CelestialObject; 2] = [CelestialObject::Sun, CelestialObject::Moon];

impl CelestialObject {
    /// English display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
        }
    }
}

/// Horizon crossing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiseSetEvent {
    /// Upper limb appears above the horizon.
    Rise,
    /// Upper limb disappears below the horizon.
    Set,
}

impl RiseSetEvent {
    /// Whether this is a rising event.
    pub fn is_rising(self) -> bool {
        matches!(self, Self::Rise)
    }
}

/// Configurable parameters for rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseSetConfig {
    /// Atmospheric refraction at the horizon in arcminutes. Default: 34.0.
    pub refraction_arcmin: f64,
    /// Solar angular semi-diameter in arcminutes. Default: 16.0.
    pub sun_semidiameter_arcmin: f64,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            sun_semidiameter_arcmin: 16.0,
        }
    }
}

impl RiseSetConfig {
    /// Geometric altitude of the object's center at rise/set, in degrees.
    ///
    /// Sun: `-(refraction + semidiameter)`.
    /// Moon: `0.7275 * parallax - refraction`, with the horizontal parallax
    /// derived from the Earth-Moon distance.
    pub fn target_altitude_deg(&self, object: CelestialObject, distance_km: f64) -> f64 {
        match object {
            CelestialObject::Sun => -(self.refraction_arcmin + self.sun_semidiameter_arcmin) / 60.0,
            CelestialObject::Moon => {
                let parallax_deg = (EARTH_EQUATORIAL_RADIUS_KM / distance_km).asin().to_degrees();
                0.7275 * parallax_deg - self.refraction_arcmin / 60.0
            }
        }
    }
}

/// Equatorial radius of the Earth in km (IAU 1976).
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.14;

/// Result of a rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetResult {
    /// Event occurs at the given Julian Date (UTC).
    Event { jd_utc: f64, event: RiseSetEvent },
    /// Object stays below the horizon around this date.
    NeverRises,
    /// Object stays above the horizon around this date.
    NeverSets,
}

/// Rise, culmination and set of one object within one civil day.
///
/// A `None` means the event does not happen during that day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectEphemeris {
    pub object: CelestialObject,
    pub rise: Option<Instant>,
    pub culmination: Option<Instant>,
    pub set: Option<Instant>,
}
