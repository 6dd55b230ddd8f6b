//! Relative Strength Index (RSI).
//!
//! Wilder smoothing of average gains and losses: the seed is a simple mean
//! over the first `period` changes, then avg = (avg*(period-1) + new)/period.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss). First valid value at index
//! `period`.
//! Edge cases: avg_loss == 0 → 100; avg_gain == 0 → 0; no movement → 50.

use super::IndicatorError;

pub fn rsi(values: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::ZeroPeriod);
    }
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n < period + 1 {
        return Ok(result);
    }

    let mut changes = vec![f64::NAN; n];
    for i in 1..n {
        let curr = values[i];
        let prev = values[i - 1];
        if !curr.is_nan() && !prev.is_nan() {
            changes[i] = curr - prev;
        }
    }

    // Seed: simple mean of gains and losses over the first `period` changes
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for &ch in &changes[1..=period] {
        if ch.is_nan() {
            return Ok(result);
        }
        if ch > 0.0 {
            avg_gain += ch;
        } else {
            avg_loss -= ch;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    result[period] = rsi_from_averages(avg_gain, avg_loss);

    let alpha = 1.0 / period as f64;
    for i in (period + 1)..n {
        if changes[i].is_nan() {
            return Ok(result);
        }
        let gain = changes[i].max(0.0);
        let loss = (-changes[i]).max(0.0);
        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;
        result[i] = rsi_from_averages(avg_gain, avg_loss);
    }

    Ok(result)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn rsi_all_gains() {
        let result = rsi(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0], 3).unwrap();
        assert_approx(result[3], 100.0, 1e-6);
    }

    #[test]
    fn rsi_all_losses() {
        let result = rsi(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0], 3).unwrap();
        assert_approx(result[3], 0.0, 1e-6);
    }

    #[test]
    fn rsi_wilder_reference_series() {
        // Classic 14-period worked example: 16 closes, first 14 outputs
        // undefined, the rest bounded.
        let closes = [
            44.0, 44.34, 44.09, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            45.61, 46.28, 46.28, 46.00,
        ];
        let result = rsi(&closes, 14).unwrap();
        for i in 0..14 {
            assert!(result[i].is_nan(), "expected NaN at index {i}");
        }
        for &v in &result[14..] {
            assert!(!v.is_nan());
            assert!((0.0..=100.0).contains(&v), "RSI out of bounds: {v}");
        }
    }

    #[test]
    fn rsi_bounds() {
        let closes = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0];
        let result = rsi(&closes, 3).unwrap();
        for (i, &v) in result.iter().enumerate() {
            if !v.is_nan() {
                assert!(
                    (0.0..=100.0).contains(&v),
                    "RSI out of bounds at index {i}: {v}"
                );
            }
        }
    }

    #[test]
    fn rsi_nan_in_seed_window() {
        let result = rsi(&[100.0, 101.0, f64::NAN, 103.0, 104.0], 3).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rsi_empty_input() {
        assert!(rsi(&[], 14).unwrap().is_empty());
    }
}
