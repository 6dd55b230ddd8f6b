//! Pivot levels — standard, Fibonacci, and Camarilla variants.
//!
//! Computed from a single prior-session high/low/close triple rather than a
//! series; the report layer uses them as intraday support/resistance marks.

use serde::{Deserialize, Serialize};

/// Pivot point with three support and three resistance levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotLevels {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

/// Classic floor-trader pivots.
pub fn standard_pivots(high: f64, low: f64, close: f64) -> PivotLevels {
    let pivot = (high + low + close) / 3.0;
    let range = high - low;
    PivotLevels {
        pivot,
        r1: 2.0 * pivot - low,
        r2: pivot + range,
        r3: high + 2.0 * (pivot - low),
        s1: 2.0 * pivot - high,
        s2: pivot - range,
        s3: low - 2.0 * (high - pivot),
    }
}

/// Fibonacci pivots: retracement multiples of the prior range around the
/// standard pivot.
pub fn fibonacci_pivots(high: f64, low: f64, close: f64) -> PivotLevels {
    let pivot = (high + low + close) / 3.0;
    let range = high - low;
    PivotLevels {
        pivot,
        r1: pivot + 0.382 * range,
        r2: pivot + 0.618 * range,
        r3: pivot + range,
        s1: pivot - 0.382 * range,
        s2: pivot - 0.618 * range,
        s3: pivot - range,
    }
}

/// Camarilla pivots: tight bands derived from the close.
pub fn camarilla_pivots(high: f64, low: f64, close: f64) -> PivotLevels {
    let range = high - low;
    PivotLevels {
        pivot: (high + low + close) / 3.0,
        r1: close + range * 1.1 / 12.0,
        r2: close + range * 1.1 / 6.0,
        r3: close + range * 1.1 / 4.0,
        s1: close - range * 1.1 / 12.0,
        s2: close - range * 1.1 / 6.0,
        s3: close - range * 1.1 / 4.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    const H: f64 = 110.0;
    const L: f64 = 100.0;
    const C: f64 = 106.0;

    #[test]
    fn standard_pivot_point() {
        let p = standard_pivots(H, L, C);
        assert_approx(p.pivot, (H + L + C) / 3.0, DEFAULT_EPSILON);
        assert_approx(p.r1, 2.0 * p.pivot - L, DEFAULT_EPSILON);
        assert_approx(p.s1, 2.0 * p.pivot - H, DEFAULT_EPSILON);
    }

    #[test]
    fn levels_are_ordered() {
        for p in [
            standard_pivots(H, L, C),
            fibonacci_pivots(H, L, C),
            camarilla_pivots(H, L, C),
        ] {
            assert!(p.r3 >= p.r2 && p.r2 >= p.r1, "resistances out of order: {p:?}");
            assert!(p.s1 >= p.s2 && p.s2 >= p.s3, "supports out of order: {p:?}");
            assert!(p.r1 > p.s1, "r1 should sit above s1: {p:?}");
        }
    }

    #[test]
    fn fibonacci_symmetry() {
        let p = fibonacci_pivots(H, L, C);
        assert_approx(p.r1 - p.pivot, p.pivot - p.s1, DEFAULT_EPSILON);
        assert_approx(p.r3 - p.pivot, p.pivot - p.s3, DEFAULT_EPSILON);
    }

    #[test]
    fn camarilla_bands_center_on_close() {
        let p = camarilla_pivots(H, L, C);
        assert_approx(p.r1 - C, C - p.s1, DEFAULT_EPSILON);
    }

    #[test]
    fn zero_range_collapses_levels() {
        let p = standard_pivots(100.0, 100.0, 100.0);
        assert_approx(p.pivot, 100.0, DEFAULT_EPSILON);
        assert_approx(p.r1, 100.0, DEFAULT_EPSILON);
        assert_approx(p.s3, 100.0, DEFAULT_EPSILON);
    }
}
