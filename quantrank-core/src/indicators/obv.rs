//! On-Balance Volume (OBV).
//!
//! Running total of volume, added on up-closes and subtracted on
//! down-closes. OBV[0] = 0; defined from the first bar.

use super::{check_len, IndicatorError};

pub fn obv(close: &[f64], volume: &[f64]) -> Result<Vec<f64>, IndicatorError> {
    let n = close.len();
    check_len("volume", volume.len(), n)?;

    let mut result = vec![f64::NAN; n];
    if n == 0 {
        return Ok(result);
    }
    result[0] = 0.0;

    let mut running = 0.0;
    for i in 1..n {
        if close[i].is_nan() || close[i - 1].is_nan() || volume[i].is_nan() {
            // unchanged on void bars; OBV is a cumulative line
            result[i] = running;
            continue;
        }
        if close[i] > close[i - 1] {
            running += volume[i];
        } else if close[i] < close[i - 1] {
            running -= volume[i];
        }
        result[i] = running;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn obv_accumulates_signed_volume() {
        let close = [10.0, 11.0, 10.5, 10.5, 12.0];
        let volume = [100.0, 200.0, 150.0, 80.0, 300.0];
        let result = obv(&close, &volume).unwrap();
        assert_approx(result[0], 0.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON); // up
        assert_approx(result[2], 50.0, DEFAULT_EPSILON); // down
        assert_approx(result[3], 50.0, DEFAULT_EPSILON); // unchanged
        assert_approx(result[4], 350.0, DEFAULT_EPSILON); // up
    }

    #[test]
    fn obv_empty_input() {
        assert!(obv(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn obv_length_mismatch() {
        assert!(obv(&[1.0, 2.0], &[100.0]).is_err());
    }
}
