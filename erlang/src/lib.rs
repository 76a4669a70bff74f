//! # Erlang-B Teletraffic Math
//!
//! `erlang` provides the Erlang-B loss formula for a trunk group with no
//! queueing, plus the two monotone searches circuit dimensioning needs:
//! the minimal trunk count meeting a blocking target, and the offered
//! load a fixed trunk group can carry at that target.

use num_traits::{AsPrimitive, Float};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ErlangError {
    #[error("parameter '{0}' is out of range")]
    Range(&'static str),

    #[error("no trunk count up to {0} meets the blocking target")]
    Unbounded(usize),
}

/// Hard cap on the trunk search. Offered loads needing more trunks than
/// this are reported as unbounded rather than searched further.
pub const MAX_TRUNKS: usize = 10_000;

/// Blocking probability of `offered_erlangs` over `trunks` servers.
///
/// Iterative form of the recursion `B(0) = 1`,
/// `B(k) = A·B(k-1) / (k + A·B(k-1))`, numerically stable for large trunk
/// counts where the factorial form overflows.
pub fn blocking<T>(trunks: usize, offered_erlangs: T) -> T
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    let mut b = T::one();
    for k in 1..=trunks {
        let ab = offered_erlangs * b;
        b = ab / (k.as_() + ab);
    }
    b
}

/// Minimal number of trunks carrying `offered_erlangs` with blocking no
/// worse than `target_blocking`.
///
/// Blocking is monotone decreasing in the trunk count, so a binary search
/// over `1..=MAX_TRUNKS` suffices.
pub fn trunks_for<T>(offered_erlangs: T, target_blocking: T) -> Result<usize, ErlangError>
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    if !(offered_erlangs > T::zero()) || !offered_erlangs.is_finite() {
        return Err(ErlangError::Range("offered_erlangs"));
    }
    check_target(target_blocking)?;

    if blocking(MAX_TRUNKS, offered_erlangs) > target_blocking {
        return Err(ErlangError::Unbounded(MAX_TRUNKS));
    }

    let (mut lo, mut hi) = (0usize, MAX_TRUNKS);
    // Invariant: blocking(lo) > target >= blocking(hi).
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if blocking(mid, offered_erlangs) > target_blocking {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(hi)
}

/// Offered load, in Erlangs, that `trunks` servers carry at exactly
/// `target_blocking`.
///
/// Blocking is monotone increasing in the offered load; the root is
/// bracketed by geometric expansion and then bisected. The returned load
/// is the lower bound of the final bracket, so its blocking never exceeds
/// the target.
pub fn offered_capacity<T>(trunks: usize, target_blocking: T) -> Result<T, ErlangError>
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    if trunks == 0 || trunks > MAX_TRUNKS {
        return Err(ErlangError::Range("trunks"));
    }
    check_target(target_blocking)?;

    let mut hi = trunks.as_();
    while blocking(trunks, hi) <= target_blocking {
        hi = hi + hi;
    }

    let mut lo = T::zero();
    for _ in 0..128 {
        let mid = (lo + hi) / (T::one() + T::one());
        if blocking(trunks, mid) <= target_blocking {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}

fn check_target<T>(target_blocking: T) -> Result<(), ErlangError>
where
    T: Float,
{
    if target_blocking > T::zero() && target_blocking < T::one() {
        Ok(())
    } else {
        Err(ErlangError::Range("target_blocking"))
    }
}

#[cfg(test)]
mod tests {
    use super::{blocking, offered_capacity, trunks_for, ErlangError, MAX_TRUNKS};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_blocking_closed_form() {
        // B(n, 1.0) has simple closed forms for small n.
        assert_approx_eq!(blocking(1, 1.0f64), 0.5, 1e-12);
        assert_approx_eq!(blocking(2, 1.0f64), 0.2, 1e-12);
        assert_approx_eq!(blocking(3, 1.0f64), 0.0625, 1e-12);
        assert_approx_eq!(blocking(4, 1.0f64), 0.015384615384615385, 1e-12);
    }

    #[test]
    fn test_blocking_zero_load() {
        assert_eq!(blocking(10, 0.0), 0.0);
        assert_eq!(blocking(0, 5.0), 1.0);
    }

    #[test]
    fn test_trunks_for_unit_load() {
        // B(3, 1.0) = 0.0625 > 0.05 >= B(4, 1.0).
        assert_eq!(trunks_for(1.0, 0.05).unwrap(), 4);
    }

    #[test]
    fn test_trunks_for_classic_table_values() {
        // 1% blocking over 10 trunks carries ~4.46 Erlangs.
        assert_eq!(trunks_for(4.46, 0.01).unwrap(), 10);
    }

    #[test]
    fn test_trunks_monotone_in_target() {
        let mut last = usize::MAX;
        for target in [0.001, 0.01, 0.02, 0.05, 0.1, 0.5] {
            let n = trunks_for(25.0, target).unwrap();
            assert!(n <= last, "target {target} needed {n} > {last}");
            last = n;
        }
    }

    #[test]
    fn test_offered_capacity_classic_table_values() {
        assert_approx_eq!(offered_capacity(10, 0.01f64).unwrap(), 4.461176857577691, 1e-6);
        assert_approx_eq!(offered_capacity(30, 0.02f64).unwrap(), 21.93156526261885, 1e-6);
    }

    #[test]
    fn test_offered_capacity_round_trip() {
        for trunks in [5, 30, 120] {
            let load = offered_capacity(trunks, 0.02f64).unwrap();
            assert_approx_eq!(blocking(trunks, load), 0.02, 1e-9);
        }
    }

    #[test]
    fn test_range_errors() {
        assert!(matches!(
            trunks_for(0.0, 0.01),
            Err(ErlangError::Range("offered_erlangs"))
        ));
        assert!(matches!(
            trunks_for(1.0, 0.0),
            Err(ErlangError::Range("target_blocking"))
        ));
        assert!(matches!(
            trunks_for(1.0, 1.0),
            Err(ErlangError::Range("target_blocking"))
        ));
        assert!(matches!(
            offered_capacity(0, 0.01),
            Err(ErlangError::Range("trunks"))
        ));
    }

    #[test]
    fn test_unbounded_search() {
        // Even MAX_TRUNKS servers cannot hold this load at 0.1% blocking.
        let load = (MAX_TRUNKS as f64) * 2.0;
        assert!(matches!(
            trunks_for(load, 0.001),
            Err(ErlangError::Unbounded(MAX_TRUNKS))
        ));
    }
}
