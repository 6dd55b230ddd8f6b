//! Average Directional Index (ADX) with +DI / -DI.
//!
//! Directional movement is Wilder-smoothed over `period`, DIs are derived
//! from smoothed DM over smoothed TR, and ADX is a second Wilder smoothing of
//! the DX series. DIs become defined at index `period`; ADX at index
//! `2*period - 1`.

use super::atr::{true_range, wilder_smooth};
use super::IndicatorError;

/// Aligned ADX output. All defined values lie in [0,100].
#[derive(Debug, Clone)]
pub struct AdxSeries {
    pub adx: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
}

pub fn adx(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
) -> Result<AdxSeries, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::ZeroPeriod);
    }
    let n = close.len();
    let tr = true_range(high, low, close)?;

    let mut plus_dm = vec![f64::NAN; n];
    let mut minus_dm = vec![f64::NAN; n];
    for i in 1..n {
        let up = high[i] - high[i - 1];
        let down = low[i - 1] - low[i];
        if up.is_nan() || down.is_nan() {
            continue;
        }
        plus_dm[i] = if up > down && up > 0.0 { up } else { 0.0 };
        minus_dm[i] = if down > up && down > 0.0 { down } else { 0.0 };
    }

    let smooth_tr = wilder_smooth(&tr, 1, period);
    let smooth_plus = wilder_smooth(&plus_dm, 1, period);
    let smooth_minus = wilder_smooth(&minus_dm, 1, period);

    let mut plus_di = vec![f64::NAN; n];
    let mut minus_di = vec![f64::NAN; n];
    let mut dx = vec![f64::NAN; n];
    for i in 0..n {
        let str_ = smooth_tr[i];
        if str_.is_nan() || str_ <= 0.0 || smooth_plus[i].is_nan() || smooth_minus[i].is_nan() {
            continue;
        }
        let p = 100.0 * smooth_plus[i] / str_;
        let m = 100.0 * smooth_minus[i] / str_;
        plus_di[i] = p;
        minus_di[i] = m;
        let sum = p + m;
        dx[i] = if sum > 0.0 {
            100.0 * (p - m).abs() / sum
        } else {
            0.0
        };
    }

    // Second smoothing pass over DX, starting where DX becomes defined.
    let adx = match dx.iter().position(|v| !v.is_nan()) {
        Some(start) => wilder_smooth(&dx, start, period),
        None => vec![f64::NAN; n],
    };

    Ok(AdxSeries {
        adx,
        plus_di,
        minus_di,
    })
}
