//! JSON report.
//!
//! Same content as the text report, as a pretty-printed object:
//!
//! ```json
//! {
//!   "date": "2021-11-23",
//!   "phase": "Full Moon",
//!   "nextPhase": { "phase": "Waning Gibbous", "date": "2021-11-23", "time": "07:31" },
//!   "timezone": "UTC",
//!   "ephemerides": [{ "object": "Sun", "rise": "07:58", "culmination": "12:18", "set": "16:38" }]
//! }
//! ```
//!
//! `ephemerides` is omitted without a location; missing events are `null`.

use kosmorro_search::{EphemerisResult, LocalObjectEphemeris};
use kosmorro_time::LocalTime;
use serde::Serialize;

use crate::format::{hour_minute, timezone_name};
use crate::{Payload, RenderOptions, Renderer};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, result: &EphemerisResult, _options: &RenderOptions) -> Payload {
        Payload::Text(render_json(result))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport {
    date: String,
    phase: &'static str,
    next_phase: JsonNextPhase,
    timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ephemerides: Option<Vec<JsonObjectEphemeris>>,
}

#[derive(Debug, Serialize)]
struct JsonNextPhase {
    phase: &'static str,
    date: String,
    time: String,
}

#[derive(Debug, Serialize)]
struct JsonObjectEphemeris {
    object: &'static str,
    rise: Option<String>,
    culmination: Option<String>,
    set: Option<String>,
}

fn time_field(t: Option<LocalTime>) -> Option<String> {
    t.as_ref().map(hour_minute)
}

impl From<&LocalObjectEphemeris> for JsonObjectEphemeris {
    fn from(row: &LocalObjectEphemeris) -> Self {
        Self {
            object: row.object.name(),
            rise: time_field(row.rise),
            culmination: time_field(row.culmination),
            set: time_field(row.set),
        }
    }
}

impl From<&EphemerisResult> for JsonReport {
    fn from(result: &EphemerisResult) -> Self {
        let next = result.next_phase_local();
        Self {
            date: result.header_date().format("%Y-%m-%d").to_string(),
            phase: result.current_phase().name(),
            next_phase: JsonNextPhase {
                phase: result.next_phase().phase.name(),
                date: next.date().format("%Y-%m-%d").to_string(),
                time: hour_minute(&next),
            },
            timezone: timezone_name(result),
            ephemerides: result
                .ephemerides()
                .map(|rows| rows.iter().map(JsonObjectEphemeris::from).collect()),
        }
    }
}

/// The JSON report, pretty-printed, with a trailing newline.
pub fn render_json(result: &EphemerisResult) -> String {
    let report = JsonReport::from(result);
    // Only strings and nulls: serialization cannot fail for a well-formed result.
    let mut out = serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| panic!("rendering contract violation: JSON serialization failed: {e}"));
    out.push('\n');
    out
}
