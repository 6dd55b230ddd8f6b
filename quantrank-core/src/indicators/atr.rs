//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR applies Wilder smoothing to the TR series; first valid value at index
//! `period`.

use super::{check_len, IndicatorError};

/// True Range series from aligned high/low/close.
///
/// TR[0] is undefined (no previous close).
pub fn true_range(
    high: &[f64],
    low: &[f64],
    close: &[f64],
) -> Result<Vec<f64>, IndicatorError> {
    let n = close.len();
    check_len("high", high.len(), n)?;
    check_len("low", low.len(), n)?;

    let mut tr = vec![f64::NAN; n];
    for i in 1..n {
        let h = high[i];
        let l = low[i];
        let pc = close[i - 1];
        if !h.is_nan() && !l.is_nan() && !pc.is_nan() {
            tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
        }
    }
    Ok(tr)
}

/// Wilder smoothing: seed with a simple mean of the first `period` defined
/// values starting at `start`, then s = (s*(period-1) + new)/period.
///
/// Input entries before `start` are ignored; NaN after the seed taints the
/// tail, matching the EMA policy.
pub fn wilder_smooth(values: &[f64], start: usize, period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || start + period > n {
        return result;
    }

    let mut sum = 0.0;
    for &v in &values[start..start + period] {
        if v.is_nan() {
            return result;
        }
        sum += v;
    }
    let seed = sum / period as f64;
    let seed_idx = start + period - 1;
    result[seed_idx] = seed;

    let mut prev = seed;
    for i in (seed_idx + 1)..n {
        if values[i].is_nan() {
            return result;
        }
        let s = (prev * (period as f64 - 1.0) + values[i]) / period as f64;
        result[i] = s;
        prev = s;
    }

    result
}

pub fn atr(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
) -> Result<Vec<f64>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::ZeroPeriod);
    }
    let tr = true_range(high, low, close)?;
    // TR starts at index 1, so the first ATR lands at index `period`.
    Ok(wilder_smooth(&tr, 1, period))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn true_range_gap_up() {
        // Gap: previous close 100, today's range 105-103
        let high = [101.0, 105.0];
        let low = [99.0, 103.0];
        let close = [100.0, 104.0];
        let tr = true_range(&high, &low, &close).unwrap();
        assert!(tr[0].is_nan());
        // max(105-103, |105-100|, |103-100|) = 5
        assert_approx(tr[1], 5.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_constant_range() {
        // Every bar: high-low = 2, no gaps
        let n = 10;
        let high: Vec<f64> = vec![101.0; n];
        let low: Vec<f64> = vec![99.0; n];
        let close: Vec<f64> = vec![100.0; n];
        let result = atr(&high, &low, &close, 3).unwrap();
        for i in 0..3 {
            assert!(result[i].is_nan(), "expected NaN at index {i}");
        }
        for &v in &result[3..] {
            assert_approx(v, 2.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn atr_wilder_lookback_is_period() {
        let n = 20;
        let high: Vec<f64> = (0..n).map(|i| 102.0 + i as f64).collect();
        let low: Vec<f64> = (0..n).map(|i| 98.0 + i as f64).collect();
        let close: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let result = atr(&high, &low, &close, 14).unwrap();
        for i in 0..14 {
            assert!(result[i].is_nan());
        }
        assert!(!result[14].is_nan());
    }

    #[test]
    fn atr_length_mismatch() {
        let result = atr(&[1.0, 2.0], &[1.0], &[1.0, 2.0], 3);
        assert!(matches!(
            result,
            Err(IndicatorError::LengthMismatch { series: "low", .. })
        ));
    }

    #[test]
    fn atr_empty_input() {
        assert!(atr(&[], &[], &[], 14).unwrap().is_empty());
    }
}
