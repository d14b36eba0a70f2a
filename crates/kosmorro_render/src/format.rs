//! Formatting shared by every output format.

use chrono::NaiveDate;
use kosmorro_search::{EphemerisResult, LocalObjectEphemeris};
use kosmorro_time::{LocalTime, TimezoneOffset};

/// Column headers of the rise/set table.
pub const EPHEMERIS_HEADERS: [&str; 4] = ["Object", "Rise time", "Culmination time", "Set time"];

/// Placeholder for an event that does not happen that day.
pub const MISSING_TIME: &str = "-";

/// `Tuesday November 23, 2021`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A %B %d, %Y").to_string()
}

/// `HH:MM`, seconds truncated.
pub fn hour_minute(time: &LocalTime) -> String {
    time.datetime().format("%H:%M").to_string()
}

/// `Moon phase: Full Moon`
pub fn current_phase_line(result: &EphemerisResult) -> String {
    format!("Moon phase: {}", result.current_phase().name())
}

/// `Waning Gibbous on Tuesday November 23, 2021 at 07:31`
pub fn next_phase_line(result: &EphemerisResult) -> String {
    let local = result.next_phase_local();
    format!(
        "{} on {} at {}",
        result.next_phase().phase.name(),
        long_date(local.date()),
        hour_minute(&local)
    )
}

/// Explicit non-zero offset, if any. A zero offset reads as plain UTC.
fn shown_offset(result: &EphemerisResult) -> Option<TimezoneOffset> {
    result.timezone().filter(|&o| o != TimezoneOffset::UTC)
}

/// Name of the clock the hours are given in: `UTC` or an offset label.
pub fn timezone_name(result: &EphemerisResult) -> String {
    match shown_offset(result) {
        Some(offset) => offset.label(),
        None => "UTC".to_string(),
    }
}

pub fn timezone_note(result: &EphemerisResult) -> String {
    match shown_offset(result) {
        Some(offset) => format!(
            "Note: All the hours are given in the {} timezone.",
            offset.label()
        ),
        None => "Note: All the hours are given in UTC.".to_string(),
    }
}

/// One table row: object name then rise, culmination and set times.
pub fn ephemeris_row(row: &LocalObjectEphemeris) -> [String; 4] {
    let cell = |t: Option<LocalTime>| {
        t.as_ref()
            .map_or_else(|| MISSING_TIME.to_string(), hour_minute)
    };
    [
        row.object.name().to_string(),
        cell(row.rise),
        cell(row.culmination),
        cell(row.set),
    ]
}
