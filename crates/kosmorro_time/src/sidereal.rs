//! Greenwich and local mean sidereal time.
//!
//! IAU 1982 GMST polynomial (Meeus, eq. 12.4). UT1 is approximated by UTC,
//! which keeps the error under a second of time.

use std::f64::consts::TAU;

use crate::julian::{J2000_JD, jd_to_centuries};

/// Sidereal rotation rate in revolutions per solar day.
pub const SIDEREAL_REVOLUTIONS_PER_DAY: f64 = 1.002_737_909_350_795;

/// Greenwich mean sidereal time in radians, in [0, 2pi).
pub fn gmst_rad(jd_ut: f64) -> f64 {
    let t = jd_to_centuries(jd_ut);
    let deg = 280.460_618_37 + 360.985_647_366_29 * (jd_ut - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    deg.to_radians().rem_euclid(TAU)
}

/// Local mean sidereal time in radians (east longitude positive), in [0, 2pi).
pub fn local_sidereal_time_rad(gmst_rad: f64, longitude_rad: f64) -> f64 {
    (gmst_rad + longitude_rad).rem_euclid(TAU)
}
