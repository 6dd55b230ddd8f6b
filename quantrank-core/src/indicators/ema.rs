//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * value[t] + (1 - alpha) * EMA[t-1], with
//! alpha = 2 / (period + 1). Seed: SMA of the first `period` values.
//! First valid value at index period-1.

use super::IndicatorError;

pub fn ema(values: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::ZeroPeriod);
    }
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n < period {
        return Ok(result);
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    let mut sum = 0.0;
    for &v in values.iter().take(period) {
        if v.is_nan() {
            return Ok(result); // NaN in seed window: series never starts
        }
        sum += v;
    }
    let seed = sum / period as f64;
    result[period - 1] = seed;

    let mut prev = seed;
    for i in period..n {
        if values[i].is_nan() {
            // once the recurrence sees NaN, everything after is tainted
            return Ok(result);
        }
        let e = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = e;
        prev = e;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_period_1_equals_input() {
        let result = ema(&[100.0, 200.0, 300.0], 1).unwrap();
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_3_known_values() {
        // alpha = 0.5, seed at index 2: SMA(10,11,12) = 11.0
        // EMA[3] = 0.5*13 + 0.5*11 = 12.0; EMA[4] = 0.5*14 + 0.5*12 = 13.0
        let result = ema(&[10.0, 11.0, 12.0, 13.0, 14.0], 3).unwrap();
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
        assert_approx(result[4], 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_nan_in_seed_produces_all_nan() {
        let result = ema(&[10.0, f64::NAN, 12.0, 13.0], 3).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn ema_nan_after_seed_taints_tail() {
        let result = ema(&[10.0, 11.0, 12.0, f64::NAN, 14.0], 3).unwrap();
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert!(result[3].is_nan());
        assert!(result[4].is_nan());
    }

    #[test]
    fn ema_empty_input() {
        assert!(ema(&[], 3).unwrap().is_empty());
    }
}
