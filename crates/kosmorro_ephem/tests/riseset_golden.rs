//! Rise/culmination/set against published almanac times.
//!
//! Reference times are the USNO/timeanddate values rounded to the minute;
//! the low-precision positions keep us within a couple of minutes.

use kosmorro_ephem::{
    CelestialObject, GeoLocation, ObjectEphemeris, RiseSetConfig, object_ephemeris_for_day,
};
use kosmorro_time::Instant;

fn day_utc(y: i32, m: u32, d: u32) -> (Instant, Instant) {
    let start = Instant::from_utc(y, m, d, 0, 0, 0.0).unwrap();
    (start, start.add_days(1.0))
}

fn minutes_between(a: Instant, b: Instant) -> f64 {
    (a.as_utc_seconds() - b.as_utc_seconds()).abs() / 60.0
}

fn ephemeris(object: CelestialObject, lat: f64, lon: f64, y: i32, m: u32, d: u32) -> ObjectEphemeris {
    let loc = GeoLocation::new(lat, lon).unwrap();
    let (start, end) = day_utc(y, m, d);
    object_ephemeris_for_day(object, &loc, start, end, &RiseSetConfig::default()).unwrap()
}

#[test]
fn london_summer_solstice_sun() {
    let e = ephemeris(CelestialObject::Sun, 51.5074, -0.1278, 2021, 6, 21);
    let rise = e.rise.expect("sunrise");
    let set = e.set.expect("sunset");
    let noon = e.culmination.expect("transit");
    assert!(minutes_between(rise, Instant::from_utc(2021, 6, 21, 3, 43, 0.0).unwrap()) < 3.0, "{rise}");
    assert!(minutes_between(set, Instant::from_utc(2021, 6, 21, 20, 21, 0.0).unwrap()) < 3.0, "{set}");
    assert!(minutes_between(noon, Instant::from_utc(2021, 6, 21, 12, 2, 0.0).unwrap()) < 2.0, "{noon}");
}

#[test]
fn london_moon_on_2021_06_21() {
    // Moonset 01:27 UTC, moonrise 16:2x UTC.
    let e = ephemeris(CelestialObject::Moon, 51.5074, -0.1278, 2021, 6, 21);
    let set = e.set.expect("moonset");
    let rise = e.rise.expect("moonrise");
    assert!(minutes_between(set, Instant::from_utc(2021, 6, 21, 1, 28, 0.0).unwrap()) < 10.0, "{set}");
    assert!(minutes_between(rise, Instant::from_utc(2021, 6, 21, 16, 22, 0.0).unwrap()) < 10.0, "{rise}");
    assert!(e.culmination.is_some());
}

#[test]
fn polar_night_has_culmination_only() {
    let e = ephemeris(CelestialObject::Sun, 80.0, 0.0, 2021, 12, 21);
    assert_eq!(e.rise, None);
    assert_eq!(e.set, None);
    let noon = e.culmination.expect("the Sun still crosses the meridian");
    assert!(minutes_between(noon, Instant::from_utc(2021, 12, 21, 11, 58, 0.0).unwrap()) < 3.0);
}

#[test]
fn events_stay_inside_the_window() {
    let loc = GeoLocation::new(-33.87, 151.21).unwrap();
    let cfg = RiseSetConfig::default();
    // Sydney civil day in UTC+10.
    let start = Instant::from_utc(2023, 3, 14, 14, 0, 0.0).unwrap();
    let end = start.add_days(1.0);
    for object in [CelestialObject::Sun, CelestialObject::Moon] {
        let e = object_ephemeris_for_day(object, &loc, start, end, &cfg).unwrap();
        assert_eq!(e.object, object);
        for t in [e.rise, e.culmination, e.set].into_iter().flatten() {
            assert!(t >= start && t < end, "{object:?} {t}");
        }
    }
}

#[test]
fn equinox_sun_rises_culminates_then_sets() {
    let e = ephemeris(CelestialObject::Sun, 51.5074, -0.1278, 2021, 3, 20);
    let (rise, noon, set) = (e.rise.unwrap(), e.culmination.unwrap(), e.set.unwrap());
    assert!(rise < noon && noon < set, "{rise} {noon} {set}");
    // About twelve hours of daylight, a little more because of refraction.
    let daylight_h = (set.as_utc_seconds() - rise.as_utc_seconds()) / 3600.0;
    assert!((12.0..12.4).contains(&daylight_h), "{daylight_h}");
    assert!(minutes_between(noon, Instant::from_utc(2021, 3, 20, 12, 8, 0.0).unwrap()) < 3.0, "{noon}");
}
