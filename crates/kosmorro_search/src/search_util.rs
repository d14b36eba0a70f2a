//! Shared root-finding helpers.

/// Outcome of a bracketed bisection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bisection {
    /// Last point where the predicate was false.
    pub lo: f64,
    /// First known point where the predicate is true.
    pub hi: f64,
    /// Whether `hi - lo` dropped under the tolerance before the cap.
    pub converged: bool,
}

/// Narrow `[lo, hi]` around the first point where `changed` turns true.
///
/// Requires `changed(lo) == false` and `changed(hi) == true`; the predicate
/// must switch only once inside the bracket.
pub(crate) fn bisect_transition<E>(
    mut lo: f64,
    mut hi: f64,
    tolerance: f64,
    max_iterations: usize,
    mut changed: impl FnMut(f64) -> Result<bool, E>,
) -> Result<Bisection, E> {
    for _ in 0..max_iterations {
        if hi - lo < tolerance {
            return Ok(Bisection {
                lo,
                hi,
                converged: true,
            });
        }
        let mid = 0.5 * (lo + hi);
        if changed(mid)? {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ok(Bisection {
        lo,
        hi,
        converged: hi - lo < tolerance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_step_location() {
        let r = bisect_transition::<()>(0.0, 10.0, 1e-6, 64, |x| Ok(x >= std::f64::consts::PI))
            .unwrap();
        assert!(r.converged);
        assert!(r.hi >= std::f64::consts::PI && r.hi - std::f64::consts::PI < 1e-6);
        assert!(r.lo < std::f64::consts::PI);
    }

    #[test]
    fn iteration_cap_is_respected() {
        let mut calls = 0;
        let r = bisect_transition::<()>(0.0, 1.0e9, 1e-12, 5, |x| {
            calls += 1;
            Ok(x > 1.0)
        })
        .unwrap();
        assert_eq!(calls, 5);
        assert!(!r.converged);
    }

    #[test]
    fn errors_propagate() {
        let r = bisect_transition(0.0, 1.0, 1e-3, 64, |_| Err("boom"));
        assert_eq!(r, Err("boom"));
    }
}
