//! Low-precision geocentric positions of the Sun and the Moon.
//!
//! Sun: Meeus, *Astronomical Algorithms*, ch. 25 (about 0.01 deg).
//! Moon: the largest periodic terms of Meeus ch. 47 (a few tenths of a degree).
//! Both are good to a minute or two of rise/set time, which is the resolution
//! of the rendered ephemerides. The time argument is UTC; the TT-UT difference
//! is neglected.

use kosmorro_time::jd_to_centuries;

use crate::riseset_types::CelestialObject;

/// Astronomical unit in km (IAU 2012).
pub const AU_KM: f64 = 149_597_870.7;

/// Apparent geocentric equatorial coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialPosition {
    /// Right ascension in radians, [0, 2pi).
    pub ra_rad: f64,
    /// Declination in radians, [-pi/2, pi/2].
    pub dec_rad: f64,
    /// Geocentric distance in km.
    pub distance_km: f64,
}

/// Mean obliquity of the ecliptic in degrees (Meeus eq. 22.2).
pub fn mean_obliquity_deg(t: f64) -> f64 {
    23.439_291_111 - (46.815 * t + 0.000_59 * t * t - 0.001_813 * t * t * t) / 3600.0
}

fn ecliptic_to_equatorial(
    lon_rad: f64,
    lat_rad: f64,
    obliquity_rad: f64,
    distance_km: f64,
) -> EquatorialPosition {
    let (sin_l, cos_l) = lon_rad.sin_cos();
    let (sin_b, cos_b) = lat_rad.sin_cos();
    let (sin_e, cos_e) = obliquity_rad.sin_cos();
    let ra = (sin_l * cos_e - (sin_b / cos_b) * sin_e).atan2(cos_l);
    let dec = (sin_b * cos_e + cos_b * sin_e * sin_l).asin();
    EquatorialPosition {
        ra_rad: ra.rem_euclid(std::f64::consts::TAU),
        dec_rad: dec,
        distance_km,
    }
}

/// Apparent position of the Sun at a UTC Julian Date.
pub fn sun_equatorial(jd: f64) -> EquatorialPosition {
    let t = jd_to_centuries(jd);
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    let true_lon = l0 + c;
    let true_anomaly = m + c.to_radians();
    let distance_au = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    let omega = (125.04 - 1_934.136 * t).to_radians();
    let apparent_lon = (true_lon - 0.005_69 - 0.004_78 * omega.sin()).to_radians();
    let obliquity = (mean_obliquity_deg(t) + 0.002_56 * omega.cos()).to_radians();

    ecliptic_to_equatorial(apparent_lon, 0.0, obliquity, distance_au * AU_KM)
}

/// Apparent position of the Moon at a UTC Julian Date.
pub fn moon_equatorial(jd: f64) -> EquatorialPosition {
    let t = jd_to_centuries(jd);
    // Mean longitude, elongation, Sun's anomaly, Moon's anomaly, argument of latitude.
    let lp = 218.316_447_7 + 481_267.881_234_21 * t;
    let d = (297.850_192_1 + 445_267.111_403_4 * t).to_radians();
    let m = (357.529_109_2 + 35_999.050_290_9 * t).to_radians();
    let mp = (134.963_396_4 + 477_198.867_505_5 * t).to_radians();
    let f = (93.272_095_0 + 483_202.017_523_3 * t).to_radians();

    let lon = lp + 6.288_774 * mp.sin()
        + 1.274_027 * (2.0 * d - mp).sin()
        + 0.658_314 * (2.0 * d).sin()
        + 0.213_618 * (2.0 * mp).sin()
        - 0.185_116 * m.sin()
        - 0.114_332 * (2.0 * f).sin()
        + 0.058_793 * (2.0 * d - 2.0 * mp).sin()
        + 0.057_066 * (2.0 * d - m - mp).sin()
        + 0.053_322 * (2.0 * d + mp).sin()
        + 0.045_758 * (2.0 * d - m).sin()
        - 0.040_923 * (m - mp).sin()
        - 0.034_720 * d.sin()
        - 0.030_383 * (m + mp).sin();

    let lat = 5.128_122 * f.sin()
        + 0.280_602 * (mp + f).sin()
        + 0.277_693 * (mp - f).sin()
        + 0.173_237 * (2.0 * d - f).sin()
        + 0.055_413 * (2.0 * d - mp + f).sin()
        + 0.046_271 * (2.0 * d - mp - f).sin();

    let distance_km = 385_000.56
        - 20_905.355 * mp.cos()
        - 3_699.111 * (2.0 * d - mp).cos()
        - 2_955.968 * (2.0 * d).cos()
        - 569.925 * (2.0 * mp).cos();

    let obliquity = mean_obliquity_deg(t).to_radians();
    ecliptic_to_equatorial(lon.to_radians(), lat.to_radians(), obliquity, distance_km)
}

/// Apparent position of `object` at a UTC Julian Date.
pub fn object_equatorial(object: CelestialObject, jd: f64) -> EquatorialPosition {
    match object {
        CelestialObject::Sun => sun_equatorial(jd),
        CelestialObject::Moon => moon_equatorial(jd),
    }
}
