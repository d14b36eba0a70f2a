//! Types for Moon phase classification and phase-change events.

use std::fmt::{Display, Formatter};

use kosmorro_time::Instant;

/// The eight named phases, in cyclic order starting at New Moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

/// All phases in cycle order.
pub const ALL_MOON_PHASES: [MoonPhase; 8] = [
    MoonPhase::NewMoon,
    MoonPhase::WaxingCrescent,
    MoonPhase::FirstQuarter,
    MoonPhase::WaxingGibbous,
    MoonPhase::FullMoon,
    MoonPhase::WaningGibbous,
    MoonPhase::LastQuarter,
    MoonPhase::WaningCrescent,
];

impl MoonPhase {
    /// Canonical English name, e.g. "Waxing Crescent".
    pub const fn name(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    /// 0-based position in the cycle (New Moon = 0).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Phase at `index` modulo 8.
    pub const fn from_index(index: usize) -> Self {
        ALL_MOON_PHASES[index % ALL_MOON_PHASES.len()]
    }

    /// The phase that follows this one.
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

impl Display for MoonPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A predicted phase change: `phase` begins at `instant`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseEvent {
    /// The phase that starts.
    pub phase: MoonPhase,
    /// When it starts.
    pub instant: Instant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_distinct() {
        let mut names: Vec<_> = ALL_MOON_PHASES.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn next_is_cyclic() {
        assert_eq!(MoonPhase::NewMoon.next(), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::WaningCrescent.next(), MoonPhase::NewMoon);
        let mut p = MoonPhase::FullMoon;
        for _ in 0..8 {
            p = p.next();
        }
        assert_eq!(p, MoonPhase::FullMoon);
    }

    #[test]
    fn index_round_trip() {
        for (i, p) in ALL_MOON_PHASES.iter().enumerate() {
            assert_eq!(p.index(), i);
            assert_eq!(MoonPhase::from_index(i), *p);
        }
        assert_eq!(MoonPhase::from_index(9), MoonPhase::WaxingCrescent);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(MoonPhase::LastQuarter.to_string(), "Last Quarter");
    }
}
