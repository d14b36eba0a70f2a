//! Moon phase engine: classification, next-phase search and the ephemeris
//! report that ties them to a date, a timezone and an optional observer.
//!
//! This crate provides:
//! - [`classify`] and the [`LunarCycle`] seam with its mean-motion default
//! - [`next_phase_event`] and [`search_phase_events`]
//! - [`compute_ephemeris`], producing the immutable [`EphemerisResult`]

pub mod ephemeris;
pub mod ephemeris_types;
pub mod error;
pub mod lunar_phase;
pub mod lunar_phase_types;
pub(crate) mod search_util;

pub use ephemeris::compute_ephemeris;
pub use ephemeris_types::{EphemerisRequest, EphemerisResult, LocalObjectEphemeris};
pub use error::SearchError;
pub use lunar_phase::{
    LunarCycle, MAX_SUPPORTED_JD, MEAN_NEW_MOON_EPOCH_JD, MEAN_SYNODIC_MONTH_DAYS,
    MIN_SUPPORTED_JD, MeanSynodicCycle, classify, moon_phase_at, next_phase_event,
    search_phase_events,
};
pub use lunar_phase_types::{ALL_MOON_PHASES, MoonPhase, PhaseEvent};
