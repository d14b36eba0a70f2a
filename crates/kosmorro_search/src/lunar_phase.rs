//! Moon phase classification and next-phase search.
//!
//! The lunar cycle position is a [0, 1) value with 0 at new moon. The eight
//! named phases are the half-open eighths `[k/8, (k+1)/8)`, so a position
//! sitting exactly on a boundary belongs to the phase that starts there.
//!
//! Search: a closed-form estimate from the mean period, checked against the
//! classifier, widened forward if rounding left it short, then bisected to
//! the first instant carrying a different phase.

use kosmorro_time::{Instant, SECONDS_PER_DAY, seconds_to_jd};
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::lunar_phase_types::{MoonPhase, PhaseEvent};
use crate::search_util::bisect_transition;

/// Mean new moon of 2000-01-06, JD (Meeus, ch. 49).
pub const MEAN_NEW_MOON_EPOCH_JD: f64 = 2_451_550.097_66;

/// Mean synodic month in days (Meeus, ch. 49).
pub const MEAN_SYNODIC_MONTH_DAYS: f64 = 29.530_588_861;

/// First supported instant: 1000-01-01T00:00Z.
pub const MIN_SUPPORTED_JD: f64 = 2_086_302.5;

/// End of the supported range (exclusive): 3001-01-01T00:00Z.
pub const MAX_SUPPORTED_JD: f64 = 2_817_152.5;

/// Bisection stops once the bracket is narrower than this, in seconds.
const BISECTION_TOLERANCE_S: f64 = 0.01;

/// Hard cap on bisection steps.
const MAX_BISECTION_ITERATIONS: usize = 64;

/// Hard cap on bracket doublings (1 s * 2^40 is far beyond a cycle).
const MAX_BRACKET_DOUBLINGS: usize = 40;

const PHASE_COUNT: f64 = 8.0;

/// Source of the continuous lunar cycle position.
///
/// [`MeanSynodicCycle`] is the default; a true ephemeris source can be
/// plugged in here as long as the position increases monotonically between
/// new moons.
pub trait LunarCycle {
    /// Position in [0, 1), 0 = new moon.
    fn cycle_position_at(&self, instant: Instant) -> Result<f64, SearchError>;

    /// Length of one cycle in days (used for estimates and scan bounds).
    fn period_days(&self) -> f64;
}

/// Mean-motion lunar cycle: linear in time from a reference new moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanSynodicCycle {
    epoch_jd: f64,
    period_days: f64,
}

impl Default for MeanSynodicCycle {
    fn default() -> Self {
        Self {
            epoch_jd: MEAN_NEW_MOON_EPOCH_JD,
            period_days: MEAN_SYNODIC_MONTH_DAYS,
        }
    }
}

impl MeanSynodicCycle {
    /// Cycle anchored at a custom new-moon epoch and period.
    pub fn new(epoch_jd: f64, period_days: f64) -> Result<Self, SearchError> {
        if !epoch_jd.is_finite() {
            return Err(SearchError::UnsupportedInstant(epoch_jd));
        }
        if !period_days.is_finite() || period_days <= 0.0 {
            return Err(SearchError::InvalidRange("period must be positive and finite"));
        }
        Ok(Self {
            epoch_jd,
            period_days,
        })
    }

    pub fn epoch_jd(&self) -> f64 {
        self.epoch_jd
    }
}

impl LunarCycle for MeanSynodicCycle {
    fn cycle_position_at(&self, instant: Instant) -> Result<f64, SearchError> {
        let jd = instant.as_jd_utc();
        if !jd.is_finite() || !(MIN_SUPPORTED_JD..MAX_SUPPORTED_JD).contains(&jd) {
            return Err(SearchError::UnsupportedInstant(jd));
        }
        let position = ((jd - self.epoch_jd) / self.period_days).rem_euclid(1.0);
        // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
        Ok(if position >= 1.0 { 0.0 } else { position })
    }

    fn period_days(&self) -> f64 {
        self.period_days
    }
}

/// Map a cycle position to its phase bucket.
///
/// Values outside [0, 1) are wrapped first.
pub fn classify(position: f64) -> MoonPhase {
    let wrapped = position.rem_euclid(1.0);
    let bucket = (wrapped * PHASE_COUNT).floor();
    // NaN and the wrapped-to-1.0 edge both land on New Moon.
    if bucket.is_nan() || bucket < 0.0 || bucket >= PHASE_COUNT {
        return MoonPhase::NewMoon;
    }
    MoonPhase::from_index(bucket as usize)
}

/// Phase of the Moon at `instant`.
pub fn moon_phase_at<C: LunarCycle + ?Sized>(
    cycle: &C,
    instant: Instant,
) -> Result<MoonPhase, SearchError> {
    Ok(classify(cycle.cycle_position_at(instant)?))
}

/// Find the first phase change strictly after `start`.
///
/// The returned event never carries the phase current at `start`.
pub fn next_phase_event<C: LunarCycle + ?Sized>(
    cycle: &C,
    start: Instant,
) -> Result<PhaseEvent, SearchError> {
    let position = cycle.cycle_position_at(start)?;
    let start_phase = classify(position);
    let t0 = start.as_utc_seconds();

    let boundary = (start_phase.index() + 1) as f64 / PHASE_COUNT;
    let remaining = (boundary - position).max(0.0);
    let estimate = t0 + remaining * cycle.period_days() * SECONDS_PER_DAY;
    debug!(
        start = %start,
        position,
        phase = start_phase.name(),
        estimate_jd = seconds_to_jd(estimate),
        "next phase estimate"
    );

    let changed = |t: f64| -> Result<bool, SearchError> {
        Ok(moon_phase_at(cycle, Instant::from_utc_seconds(t))? != start_phase)
    };

    // Upper bracket: the estimate, pushed forward until the phase has changed.
    let mut hi = estimate.max(t0);
    let mut step = 1.0;
    let mut bracketed = hi > t0 && changed(hi)?;
    for _ in 0..MAX_BRACKET_DOUBLINGS {
        if bracketed {
            break;
        }
        hi = estimate.max(t0) + step;
        step *= 2.0;
        bracketed = changed(hi)?;
    }
    if !bracketed {
        return Err(SearchError::NoConvergence(
            "phase did not change within the search horizon",
        ));
    }

    // Lower bracket: just before the estimate when possible, else the start.
    let near = hi - 1.0;
    let lo = if near > t0 && !changed(near)? { near } else { t0 };

    let result = bisect_transition(
        lo,
        hi,
        BISECTION_TOLERANCE_S,
        MAX_BISECTION_ITERATIONS,
        changed,
    )?;
    if !result.converged {
        warn!(
            lo = result.lo,
            hi = result.hi,
            "phase bisection hit its iteration cap"
        );
    }

    let instant = Instant::from_utc_seconds(result.hi);
    let phase = moon_phase_at(cycle, instant)?;
    debug!(phase = phase.name(), instant = %instant, "next phase found");
    Ok(PhaseEvent { phase, instant })
}

/// All phase changes in `(start, end]`, in chronological order.
pub fn search_phase_events<C: LunarCycle + ?Sized>(
    cycle: &C,
    start: Instant,
    end: Instant,
) -> Result<Vec<PhaseEvent>, SearchError> {
    if !(end > start) {
        return Err(SearchError::InvalidRange("end must be after start"));
    }

    let span_days = (end.as_utc_seconds() - start.as_utc_seconds()) / SECONDS_PER_DAY;
    let bucket_days = cycle.period_days() / PHASE_COUNT;
    let max_events = (span_days / bucket_days).ceil() as usize + 2;

    let mut events = Vec::new();
    let mut cursor = start;
    for _ in 0..max_events {
        let event = next_phase_event(cycle, cursor)?;
        if event.instant > end {
            break;
        }
        cursor = event.instant;
        events.push(event);
    }
    Ok(events)
}
