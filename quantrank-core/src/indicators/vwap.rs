//! Volume-Weighted Average Price (VWAP), cumulative and anchored.
//!
//! Typical price = (high + low + close) / 3. VWAP[t] = cumulative
//! (typical * volume) / cumulative volume from the anchor forward. Entries
//! before the anchor are undefined.

use super::{check_len, IndicatorError};

/// VWAP anchored at the start of the series.
pub fn vwap(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: &[f64],
) -> Result<Vec<f64>, IndicatorError> {
    anchored_vwap(high, low, close, volume, 0)
}

/// VWAP anchored at `anchor` (e.g. a regime change or earnings date).
pub fn anchored_vwap(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: &[f64],
    anchor: usize,
) -> Result<Vec<f64>, IndicatorError> {
    let n = close.len();
    check_len("high", high.len(), n)?;
    check_len("low", low.len(), n)?;
    check_len("volume", volume.len(), n)?;

    let mut result = vec![f64::NAN; n];
    let mut pv = 0.0;
    let mut v = 0.0;
    for i in anchor..n {
        if high[i].is_nan() || low[i].is_nan() || close[i].is_nan() || volume[i].is_nan() {
            // void bar: carry the line forward without contribution
            if v > 0.0 {
                result[i] = pv / v;
            }
            continue;
        }
        let typical = (high[i] + low[i] + close[i]) / 3.0;
        pv += typical * volume[i];
        v += volume[i];
        if v > 0.0 {
            result[i] = pv / v;
        }
    }

    Ok(result)
}
