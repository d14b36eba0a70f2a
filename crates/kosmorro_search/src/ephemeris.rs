//! One complete computation: resolve the date, classify, search, localize.

use kosmorro_ephem::{ALL_OBJECTS, GeoLocation, RiseSetConfig, object_ephemeris_for_day};
use kosmorro_time::{
    Instant, LocalTime, TimezoneOffset, apply_timezone_offset, resolve_date_in,
};
use tracing::debug;

use crate::ephemeris_types::{EphemerisRequest, EphemerisResult, LocalObjectEphemeris};
use crate::error::SearchError;
use crate::lunar_phase::{LunarCycle, moon_phase_at, next_phase_event};

/// Compute the phase report (and rise/set times when a location is given).
///
/// The target instant is resolved once and reused for every step. Any error
/// aborts the whole computation; no partial result is returned.
pub fn compute_ephemeris<C: LunarCycle + ?Sized>(
    cycle: &C,
    request: &EphemerisRequest,
) -> Result<EphemerisResult, SearchError> {
    let offset = request.timezone.unwrap_or(TimezoneOffset::UTC);
    let target = match &request.date {
        Some(spec) => resolve_date_in(spec, request.reference, offset)?,
        None => request.reference,
    };
    let local_target = apply_timezone_offset(target, offset)?;
    debug!(target = %target, local = %local_target, "resolved target");

    let current_phase = moon_phase_at(cycle, target)
        .map_err(|e| blame_offset(e, cycle, target, offset))?;
    let next_phase = next_phase_event(cycle, target)?;
    let next_phase_local = apply_timezone_offset(next_phase.instant, offset)?;

    let ephemerides = match request.location {
        Some(location) => Some(day_ephemerides(&location, &local_target, offset)?),
        None => None,
    };

    Ok(EphemerisResult::new(
        target,
        local_target.date(),
        current_phase,
        next_phase,
        next_phase_local,
        request.timezone,
        ephemerides,
    ))
}

/// Report an out-of-range target against the offset when the local date
/// itself is in range.
fn blame_offset<C: LunarCycle + ?Sized>(
    err: SearchError,
    cycle: &C,
    target: Instant,
    offset: TimezoneOffset,
) -> SearchError {
    match err {
        SearchError::UnsupportedInstant(jd)
            if offset != TimezoneOffset::UTC
                && cycle
                    .cycle_position_at(target.add_seconds(offset.seconds()))
                    .is_ok() =>
        {
            SearchError::OffsetOutOfRange { jd, offset }
        }
        other => other,
    }
}

fn day_ephemerides(
    location: &GeoLocation,
    local_target: &LocalTime,
    offset: TimezoneOffset,
) -> Result<Vec<LocalObjectEphemeris>, SearchError> {
    let day_start = local_target.start_of_day().to_instant();
    let day_end = day_start.add_days(1.0);
    let config = RiseSetConfig::default();

    let localize = |t: Option<Instant>| -> Result<Option<LocalTime>, SearchError> {
        t.map(|i| apply_timezone_offset(i, offset))
            .transpose()
            .map_err(SearchError::from)
    };

    ALL_OBJECTS
        .iter()
        .map(|&object| -> Result<LocalObjectEphemeris, SearchError> {
            let e = object_ephemeris_for_day(object, location, day_start, day_end, &config)?;
            Ok(LocalObjectEphemeris {
                object,
                rise: localize(e.rise)?,
                culmination: localize(e.culmination)?,
                set: localize(e.set)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lunar_phase::MeanSynodicCycle;
    use crate::lunar_phase_types::MoonPhase;
    use chrono::NaiveDate;
    use kosmorro_time::DateSpec;

    fn reference() -> Instant {
        Instant::from_utc(2021, 11, 23, 0, 0, 0.0).unwrap()
    }

    #[test]
    fn defaults_to_reference_in_utc() {
        let cycle = MeanSynodicCycle::default();
        let r = compute_ephemeris(&cycle, &EphemerisRequest::new(reference())).unwrap();
        assert_eq!(r.target(), reference());
        assert_eq!(r.header_date(), NaiveDate::from_ymd_opt(2021, 11, 23).unwrap());
        assert_eq!(r.current_phase(), MoonPhase::FullMoon);
        assert_eq!(r.next_phase().phase, MoonPhase::WaningGibbous);
        assert_eq!(r.timezone(), None);
        assert_eq!(r.display_offset(), TimezoneOffset::UTC);
        assert!(r.ephemerides().is_none());
    }

    #[test]
    fn header_follows_the_local_date() {
        let cycle = MeanSynodicCycle::default();
        let request = EphemerisRequest::new(Instant::from_utc(2021, 11, 23, 22, 0, 0.0).unwrap())
            .with_timezone(TimezoneOffset::new(3.0).unwrap());
        let r = compute_ephemeris(&cycle, &request).unwrap();
        assert_eq!(r.header_date(), NaiveDate::from_ymd_opt(2021, 11, 24).unwrap());
    }

    #[test]
    fn location_adds_sun_and_moon() {
        let cycle = MeanSynodicCycle::default();
        let request = EphemerisRequest::new(reference())
            .with_location(GeoLocation::new(50.0, 5.0).unwrap())
            .with_timezone(TimezoneOffset::new(1.0).unwrap());
        let r = compute_ephemeris(&cycle, &request).unwrap();
        let rows = r.ephemerides().unwrap();
        assert_eq!(rows.len(), 2);
        let sun = &rows[0];
        let (rise, set) = (sun.rise.unwrap(), sun.set.unwrap());
        assert!(rise.datetime() < set.datetime());
        assert_eq!(rise.date(), r.header_date());
    }

    #[test]
    fn bad_date_aborts() {
        let cycle = MeanSynodicCycle::default();
        let request = EphemerisRequest::new(reference())
            .with_date(DateSpec::Absolute(NaiveDate::from_ymd_opt(3500, 1, 1).unwrap()));
        assert!(matches!(
            compute_ephemeris(&cycle, &request),
            Err(SearchError::UnsupportedInstant(_))
        ));
    }

    #[test]
    fn huge_offset_is_blamed_for_the_range_error() {
        let cycle = MeanSynodicCycle::default();
        let offset = TimezoneOffset::new(1e7).unwrap();
        let request = EphemerisRequest::new(reference())
            .with_date(DateSpec::Absolute(NaiveDate::from_ymd_opt(2021, 11, 23).unwrap()))
            .with_timezone(offset);
        match compute_ephemeris(&cycle, &request) {
            Err(SearchError::OffsetOutOfRange { offset: o, .. }) => assert_eq!(o, offset),
            other => panic!("expected an offset error, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_date_with_offset_blames_the_date() {
        let cycle = MeanSynodicCycle::default();
        let request = EphemerisRequest::new(reference())
            .with_date(DateSpec::Absolute(NaiveDate::from_ymd_opt(3500, 1, 1).unwrap()))
            .with_timezone(TimezoneOffset::new(2.0).unwrap());
        assert!(matches!(
            compute_ephemeris(&cycle, &request),
            Err(SearchError::UnsupportedInstant(_))
        ));
    }
}
