//! Rise, culmination and set of the Sun and the Moon.
//!
//! Iterative hour-angle method (Meeus ch. 15, Montenbruck & Pfleger): start
//! from an approximate local noon, find the meridian transit, then step the
//! event estimate until the object's hour angle matches the one at which its
//! altitude equals the configured horizon altitude. Positions are recomputed
//! at every step, which matters for the Moon.

use std::f64::consts::{PI, TAU};

use kosmorro_time::{Instant, SIDEREAL_REVOLUTIONS_PER_DAY, gmst_rad, local_sidereal_time_rad};
use tracing::{debug, warn};

use crate::error::EphemError;
use crate::positions::object_equatorial;
use crate::riseset_types::{
    CelestialObject, GeoLocation, ObjectEphemeris, RiseSetConfig, RiseSetEvent, RiseSetResult,
};

/// Maximum iterations for the refinement loops.
const MAX_ITERATIONS: usize = 10;

/// Convergence threshold in days (~0.086 seconds).
const CONVERGENCE_DAYS: f64 = 1.0e-6;

/// Earth rotation relative to the stars, in rad/day.
const SIDEREAL_RATE: f64 = TAU * SIDEREAL_REVOLUTIONS_PER_DAY;

/// Approximate local solar noon JD from 0h UT JD and longitude.
///
/// `JD_noon = JD_0h + 0.5 - longitude_deg / 360`
pub fn approximate_local_noon_jd(jd_ut_midnight: f64, longitude_deg: f64) -> f64 {
    jd_ut_midnight + 0.5 - longitude_deg / 360.0
}

fn wrap_pi(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a > PI { a - TAU } else { a }
}

/// Local hour angle of `object` at `jd_utc`, in [-pi, pi].
fn hour_angle(object: CelestialObject, location: &GeoLocation, jd_utc: f64) -> (f64, f64, f64) {
    let pos = object_equatorial(object, jd_utc);
    let lst = local_sidereal_time_rad(gmst_rad(jd_utc), location.longitude_rad());
    (wrap_pi(lst - pos.ra_rad), pos.dec_rad, pos.distance_km)
}

enum HorizonCrossing {
    HourAngle(f64),
    AlwaysBelow,
    AlwaysAbove,
}

fn horizon_hour_angle(phi: f64, dec: f64, h0_rad: f64) -> HorizonCrossing {
    let above = phi.sin() * dec.sin();
    let denom = phi.cos() * dec.cos();
    let cos_h0 = (h0_rad.sin() - above) / denom;
    if cos_h0.is_nan() {
        return if above > h0_rad.sin() {
            HorizonCrossing::AlwaysAbove
        } else {
            HorizonCrossing::AlwaysBelow
        };
    }
    if cos_h0 > 1.0 {
        HorizonCrossing::AlwaysBelow
    } else if cos_h0 < -1.0 {
        HorizonCrossing::AlwaysAbove
    } else {
        HorizonCrossing::HourAngle(cos_h0.acos())
    }
}

/// Upper meridian transit nearest to `jd_utc_noon`, as a UTC Julian Date.
pub fn compute_transit(object: CelestialObject, location: &GeoLocation, jd_utc_noon: f64) -> f64 {
    let mut jd = jd_utc_noon;
    for _ in 0..MAX_ITERATIONS {
        let (ha, _, _) = hour_angle(object, location, jd);
        let correction = -ha / SIDEREAL_RATE;
        jd += correction;
        if correction.abs() < CONVERGENCE_DAYS {
            return jd;
        }
    }
    warn!(object = object.name(), jd, "transit refinement did not converge");
    jd
}

/// Compute a single rise or set event of `object`.
///
/// `jd_utc_noon` is an approximate local noon on the desired date; use
/// [`approximate_local_noon_jd`]. The event found is the one bracketing the
/// transit nearest to that noon.
///
/// # Returns
/// * `RiseSetResult::Event` with the event time as a UTC Julian Date
/// * `RiseSetResult::NeverRises` if the object stays below the horizon
/// * `RiseSetResult::NeverSets` if the object stays above the horizon
pub fn compute_rise_set(
    object: CelestialObject,
    location: &GeoLocation,
    event: RiseSetEvent,
    jd_utc_noon: f64,
    config: &RiseSetConfig,
) -> RiseSetResult {
    let phi = location.latitude_rad();

    let jd_transit = compute_transit(object, location, jd_utc_noon);
    let (_, dec, dist) = hour_angle(object, location, jd_transit);
    let h0_rad = config.target_altitude_deg(object, dist).to_radians();

    let h0 = match horizon_hour_angle(phi, dec, h0_rad) {
        HorizonCrossing::HourAngle(h) => h,
        HorizonCrossing::AlwaysBelow => return RiseSetResult::NeverRises,
        HorizonCrossing::AlwaysAbove => return RiseSetResult::NeverSets,
    };

    let h0_days = h0 / SIDEREAL_RATE;
    let mut jd_event = if event.is_rising() {
        jd_transit - h0_days
    } else {
        jd_transit + h0_days
    };

    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        let (ha_actual, dec_i, dist_i) = hour_angle(object, location, jd_event);
        let h0_rad_i = config.target_altitude_deg(object, dist_i).to_radians();

        let h_target = match horizon_hour_angle(phi, dec_i, h0_rad_i) {
            HorizonCrossing::HourAngle(h) => h,
            HorizonCrossing::AlwaysBelow => return RiseSetResult::NeverRises,
            HorizonCrossing::AlwaysAbove => return RiseSetResult::NeverSets,
        };

        // Rising happens east of the meridian (negative hour angle).
        let ha_target = if event.is_rising() { -h_target } else { h_target };

        let correction = wrap_pi(ha_target - ha_actual) / SIDEREAL_RATE;
        jd_event += correction;

        if correction.abs() < CONVERGENCE_DAYS {
            converged = true;
            break;
        }
    }
    if !converged {
        warn!(
            object = object.name(),
            ?event,
            jd = jd_event,
            "rise/set refinement did not converge"
        );
    }

    RiseSetResult::Event {
        jd_utc: jd_event,
        event,
    }
}

/// Rise, culmination and set of `object` falling inside `[day_start, day_end)`.
///
/// The window is usually one local civil day. Events are searched around the
/// local noons of the day before, the day itself and the day after, and the
/// earliest one of each kind inside the window is kept.
pub fn object_ephemeris_for_day(
    object: CelestialObject,
    location: &GeoLocation,
    day_start: Instant,
    day_end: Instant,
    config: &RiseSetConfig,
) -> Result<ObjectEphemeris, EphemError> {
    let jd_start = day_start.as_jd_utc();
    let jd_end = day_end.as_jd_utc();
    if !(jd_end > jd_start) {
        return Err(EphemError::InvalidWindow);
    }

    let jd_mid = 0.5 * (jd_start + jd_end);
    let ut_midnight = (jd_mid - 0.5).floor() + 0.5;
    let mut noon = approximate_local_noon_jd(ut_midnight, location.longitude_deg);
    noon += (jd_mid - noon).round();

    let in_window = |jd: f64| jd >= jd_start && jd < jd_end;
    let earliest = |acc: Option<f64>, jd: f64| {
        if !in_window(jd) {
            return acc;
        }
        Some(acc.map_or(jd, |a| a.min(jd)))
    };

    let mut rise = None;
    let mut culmination = None;
    let mut set = None;
    for day in [-1.0, 0.0, 1.0] {
        let noon_i = noon + day;
        culmination = earliest(culmination, compute_transit(object, location, noon_i));
        for event in [RiseSetEvent::Rise, RiseSetEvent::Set] {
            if let RiseSetResult::Event { jd_utc, .. } =
                compute_rise_set(object, location, event, noon_i, config)
            {
                match event {
                    RiseSetEvent::Rise => rise = earliest(rise, jd_utc),
                    RiseSetEvent::Set => set = earliest(set, jd_utc),
                }
            }
        }
    }

    debug!(
        object = object.name(),
        rise = ?rise,
        culmination = ?culmination,
        set = ?set,
        "ephemeris for day"
    );

    Ok(ObjectEphemeris {
        object,
        rise: rise.map(Instant::from_jd_utc),
        culmination: culmination.map(Instant::from_jd_utc),
        set: set.map(Instant::from_jd_utc),
    })
}
