//! Date arguments: absolute `YYYY-MM-DD` dates or relative intervals.
//!
//! Interval grammar: `[+-]?(\d+y)?(\d+m)?(\d+d)?`, at least one component,
//! each unit at most once and in `y`, `m`, `d` order. A missing sign means
//! `+`. The sign applies to every component.
//!
//! Intervals are applied with calendar arithmetic: years, then months, then
//! days. A day-of-month that does not exist after the year or month step is
//! clamped to the last day of the resulting month.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate, NaiveTime};

use crate::error::TimeError;
use crate::instant::Instant;
use crate::timezone::{LocalTime, TimezoneOffset, apply_timezone_offset};

/// A signed calendar interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateInterval {
    pub negative: bool,
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl DateInterval {
    pub fn new(negative: bool, years: u32, months: u32, days: u32) -> Self {
        Self {
            negative,
            years,
            months,
            days,
        }
    }

    /// Apply the interval to a civil date.
    pub fn apply_to(&self, date: NaiveDate) -> Result<NaiveDate, TimeError> {
        let overflow =
            || TimeError::UnsupportedInstant(format!("{date} {self} is outside the calendar"));
        let year_months = self.years.checked_mul(12).ok_or_else(overflow)?;

        let shift_months = |d: NaiveDate, n: u32| {
            if self.negative {
                d.checked_sub_months(Months::new(n))
            } else {
                d.checked_add_months(Months::new(n))
            }
        };

        let d = shift_months(date, year_months).ok_or_else(overflow)?;
        let d = shift_months(d, self.months).ok_or_else(overflow)?;
        let days = Days::new(u64::from(self.days));
        let d = if self.negative {
            d.checked_sub_days(days)
        } else {
            d.checked_add_days(days)
        };
        d.ok_or_else(overflow)
    }

    fn parse(s: &str) -> Result<Self, TimeError> {
        let invalid = |why: String| TimeError::InvalidDateSpec(format!("'{s}': {why}"));

        let (negative, body) = match s.as_bytes().first() {
            Some(b'+') => (false, &s[1..]),
            Some(b'-') => (true, &s[1..]),
            _ => (false, s),
        };
        if body.is_empty() {
            return Err(invalid(
                "expected YYYY-MM-DD or an interval like +1y2m3d".into(),
            ));
        }

        let mut interval = Self {
            negative,
            ..Self::default()
        };
        let mut last_rank: Option<u8> = None;
        let mut rest = body;
        while !rest.is_empty() {
            let n_digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if n_digits == 0 {
                let why = match rest.chars().next() {
                    Some('+' | '-') => "a sign is only allowed at the start".to_string(),
                    Some(c) => format!("expected a number before '{c}'"),
                    None => "unexpected end".to_string(),
                };
                return Err(invalid(why));
            }
            let value: u32 = rest[..n_digits]
                .parse()
                .map_err(|_| invalid(format!("{} is too large", &rest[..n_digits])))?;
            let unit = rest[n_digits..]
                .chars()
                .next()
                .ok_or_else(|| invalid(format!("missing unit after {value}")))?;
            let rank = match unit {
                'y' => 0,
                'm' => 1,
                'd' => 2,
                other => {
                    return Err(invalid(format!(
                        "unknown unit '{other}', expected y, m or d"
                    )));
                }
            };
            if last_rank.is_some_and(|r| r >= rank) {
                return Err(invalid(
                    "each unit may appear once, in y, m, d order".into(),
                ));
            }
            last_rank = Some(rank);
            match rank {
                0 => interval.years = value,
                1 => interval.months = value,
                _ => interval.days = value,
            }
            rest = &rest[n_digits + unit.len_utf8()..];
        }
        Ok(interval)
    }
}

impl Display for DateInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.negative { "-" } else { "+" })?;
        if self.years != 0 {
            write!(f, "{}y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}m", self.months)?;
        }
        if self.days != 0 || (self.years == 0 && self.months == 0) {
            write!(f, "{}d", self.days)?;
        }
        Ok(())
    }
}

/// The `--date` argument: an absolute date or an interval from the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateSpec {
    Absolute(NaiveDate),
    Interval(DateInterval),
}

fn looks_absolute(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

impl FromStr for DateSpec {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if looks_absolute(s) {
            return NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Self::Absolute)
                .map_err(|e| TimeError::InvalidDateSpec(format!("'{s}': {e}")));
        }
        DateInterval::parse(s).map(Self::Interval)
    }
}

impl Display for DateSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absolute(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Interval(interval) => interval.fmt(f),
        }
    }
}

/// Resolve a date argument against a reference instant, in UTC.
pub fn resolve_date(spec: &DateSpec, reference: Instant) -> Result<Instant, TimeError> {
    resolve_date_in(spec, reference, TimezoneOffset::UTC)
}

/// Resolve a date argument against a reference instant, in the civil time of
/// `offset`.
///
/// Absolute dates resolve to local midnight. Intervals keep the reference's
/// local time of day and move its local date.
pub fn resolve_date_in(
    spec: &DateSpec,
    reference: Instant,
    offset: TimezoneOffset,
) -> Result<Instant, TimeError> {
    let civil = match spec {
        DateSpec::Absolute(date) => date.and_time(NaiveTime::MIN),
        DateSpec::Interval(interval) => {
            let local = apply_timezone_offset(reference, offset)?;
            interval
                .apply_to(local.date())?
                .and_time(local.datetime().time())
        }
    };
    let resolved = LocalTime::from_civil(civil, offset).to_instant();
    tracing::debug!(%spec, %reference, %resolved, "resolved date argument");
    Ok(resolved)
}
