//! Moving Average Convergence/Divergence (MACD).
//!
//! MACD line = EMA(fast) - EMA(slow); signal = EMA of the MACD line;
//! histogram = MACD - signal. First valid MACD at index slow-1, first valid
//! signal once `signal_period` MACD values exist.

use super::ema::ema;
use super::IndicatorError;

/// Aligned MACD output series.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd(
    values: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdSeries, IndicatorError> {
    if fast_period == 0 || slow_period == 0 || signal_period == 0 {
        return Err(IndicatorError::ZeroPeriod);
    }
    let n = values.len();
    let fast = ema(values, fast_period)?;
    let slow = ema(values, slow_period)?;

    let mut macd_line = vec![f64::NAN; n];
    for i in 0..n {
        if !fast[i].is_nan() && !slow[i].is_nan() {
            macd_line[i] = fast[i] - slow[i];
        }
    }

    // The signal EMA runs over the defined portion of the MACD line only;
    // the seed window starts at the first defined MACD value.
    let first_defined = macd_line.iter().position(|v| !v.is_nan());
    let mut signal = vec![f64::NAN; n];
    if let Some(start) = first_defined {
        let defined = &macd_line[start..];
        let sig = ema(defined, signal_period)?;
        for (offset, v) in sig.into_iter().enumerate() {
            signal[start + offset] = v;
        }
    }

    let mut histogram = vec![f64::NAN; n];
    for i in 0..n {
        if !macd_line[i].is_nan() && !signal[i].is_nan() {
            histogram[i] = macd_line[i] - signal[i];
        }
    }

    Ok(MacdSeries {
        macd: macd_line,
        signal,
        histogram,
    })
}
