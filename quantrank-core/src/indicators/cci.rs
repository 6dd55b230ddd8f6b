//! Commodity Channel Index (CCI).
//!
//! CCI = (typical - SMA(typical)) / (0.015 * mean absolute deviation), both
//! over the trailing window. First valid value at index period-1.

use super::{check_len, IndicatorError};

pub fn cci(
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

    let typical: Vec<f64> = (0..n)
        .map(|i| {
            if high[i].is_nan() || low[i].is_nan() || close[i].is_nan() {
                f64::NAN
            } else {
                (high[i] + low[i] + close[i]) / 3.0
            }
        })
        .collect();

    let mut result = vec![f64::NAN; n];
    if n < period {
        return Ok(result);
    }

    for i in (period - 1)..n {
        let window = &typical[(i + 1 - period)..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let sma = window.iter().sum::<f64>() / period as f64;
        let mad = window.iter().map(|v| (v - sma).abs()).sum::<f64>() / period as f64;
        if mad < 1e-15 {
            result[i] = 0.0; // flat window
        } else {
            result[i] = (typical[i] - sma) / (0.015 * mad);
        }
    }

    Ok(result)
}
