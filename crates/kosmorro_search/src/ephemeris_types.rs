//! Request and result types for one ephemeris computation.

use chrono::NaiveDate;
use kosmorro_ephem::{CelestialObject, GeoLocation};
use kosmorro_time::{DateSpec, Instant, LocalTime, TimezoneOffset};

use crate::lunar_phase_types::{MoonPhase, PhaseEvent};

/// Inputs of one computation, already parsed and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisRequest {
    /// "Now": the instant relative dates are resolved against.
    pub reference: Instant,
    /// Target date; `None` means the reference itself.
    pub date: Option<DateSpec>,
    /// Observer; rise/set times are only computed when present.
    pub location: Option<GeoLocation>,
    /// Display offset; `None` means UTC with the default note.
    pub timezone: Option<TimezoneOffset>,
}

impl EphemerisRequest {
    /// Request for the reference instant itself, in UTC, without location.
    pub fn new(reference: Instant) -> Self {
        Self {
            reference,
            date: None,
            location: None,
            timezone: None,
        }
    }

    pub fn with_date(mut self, date: DateSpec) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_location(mut self, location: GeoLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_timezone(mut self, timezone: TimezoneOffset) -> Self {
        self.timezone = Some(timezone);
        self
    }
}

/// Rise, culmination and set of one object, as local wall-clock times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalObjectEphemeris {
    pub object: CelestialObject,
    pub rise: Option<LocalTime>,
    pub culmination: Option<LocalTime>,
    pub set: Option<LocalTime>,
}

/// Everything a renderer needs, computed once and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisResult {
    target: Instant,
    header_date: NaiveDate,
    current_phase: MoonPhase,
    next_phase: PhaseEvent,
    next_phase_local: LocalTime,
    timezone: Option<TimezoneOffset>,
    ephemerides: Option<Vec<LocalObjectEphemeris>>,
}

impl EphemerisResult {
    pub(crate) fn new(
        target: Instant,
        header_date: NaiveDate,
        current_phase: MoonPhase,
        next_phase: PhaseEvent,
        next_phase_local: LocalTime,
        timezone: Option<TimezoneOffset>,
        ephemerides: Option<Vec<LocalObjectEphemeris>>,
    ) -> Self {
        Self {
            target,
            header_date,
            current_phase,
            next_phase,
            next_phase_local,
            timezone,
            ephemerides,
        }
    }

    /// The resolved instant everything was computed for.
    pub fn target(&self) -> Instant {
        self.target
    }

    /// Local civil date of the target.
    pub fn header_date(&self) -> NaiveDate {
        self.header_date
    }

    pub fn current_phase(&self) -> MoonPhase {
        self.current_phase
    }

    pub fn next_phase(&self) -> PhaseEvent {
        self.next_phase
    }

    /// The next phase change on the display clock.
    pub fn next_phase_local(&self) -> LocalTime {
        self.next_phase_local
    }

    /// The offset the user asked for, if any.
    pub fn timezone(&self) -> Option<TimezoneOffset> {
        self.timezone
    }

    /// Offset all local times are expressed in.
    pub fn display_offset(&self) -> TimezoneOffset {
        self.timezone.unwrap_or(TimezoneOffset::UTC)
    }

    /// Per-object rise/set times, present when a location was given.
    pub fn ephemerides(&self) -> Option<&[LocalObjectEphemeris]> {
        self.ephemerides.as_deref()
    }
}
