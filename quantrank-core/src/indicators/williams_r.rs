//! Williams %R.
//!
//! %R = -100 * (highest_high - close) / (highest_high - lowest_low) over the
//! trailing window. Range [-100, 0]; flat windows read as -50.

use super::{check_len, IndicatorError};

pub fn williams_r(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
) -> Result<Vec<f64>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::ZeroPeriod);
    }
    let n = close.len();
    check_len("high", high.len(), n)?;
    check_len("low", low.len(), n)?;

    let mut result = vec![f64::NAN; n];
    if n < period {
        return Ok(result);
    }

    for i in (period - 1)..n {
        let mut hh = f64::NEG_INFINITY;
        let mut ll = f64::INFINITY;
        let mut any_nan = close[i].is_nan();
        for j in (i + 1 - period)..=i {
            if high[j].is_nan() || low[j].is_nan() {
                any_nan = true;
                break;
            }
            hh = hh.max(high[j]);
            ll = ll.min(low[j]);
        }
        if any_nan {
            continue;
        }
        let range = hh - ll;
        result[i] = if range > 0.0 {
            (-100.0 * (hh - close[i]) / range).clamp(-100.0, 0.0)
        } else {
            -50.0
        };
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn williams_r_close_at_high_is_zero() {
        let high = [10.0, 11.0, 12.0];
        let low = [9.0, 10.0, 11.0];
        let close = [9.5, 10.5, 12.0];
        let result = williams_r(&high, &low, &close, 3).unwrap();
        assert_approx(result[2], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn williams_r_close_at_low_is_minus_100() {
        let high = [10.0, 11.0, 12.0];
        let low = [9.0, 10.0, 11.0];
        let close = [9.5, 10.5, 9.0];
        let result = williams_r(&high, &low, &close, 3).unwrap();
        assert_approx(result[2], -100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn williams_r_range() {
        let high: Vec<f64> = (0..30).map(|i| 102.0 + (i as f64 * 0.6).cos() * 4.0).collect();
        let low: Vec<f64> = high.iter().map(|h| h - 3.0).collect();
        let close: Vec<f64> = high.iter().map(|h| h - 1.5).collect();
        let result = williams_r(&high, &low, &close, 14).unwrap();
        for &v in result.iter().filter(|v| !v.is_nan()) {
            assert!((-100.0..=0.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn williams_r_flat_window() {
        let result = williams_r(&[100.0; 5], &[100.0; 5], &[100.0; 5], 3).unwrap();
        assert_approx(result[4], -50.0, DEFAULT_EPSILON);
    }

    #[test]
    fn williams_r_length_mismatch() {
        assert!(williams_r(&[1.0, 2.0], &[1.0], &[1.0, 2.0], 3).is_err());
    }
}
