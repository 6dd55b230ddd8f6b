//! Stochastic oscillator (%K / %D).
//!
//! %K = 100 * (close - lowest_low) / (highest_high - lowest_low) over the
//! trailing `k_period`; %D = SMA(%K, d_period). Flat windows (no range)
//! read as 50.

use super::sma::sma;
use super::{check_len, IndicatorError};

#[derive(Debug, Clone)]
pub struct StochasticSeries {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

pub fn stochastic(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    k_period: usize,
    d_period: usize,
) -> Result<StochasticSeries, IndicatorError> {
    if k_period == 0 || d_period == 0 {
        return Err(IndicatorError::ZeroPeriod);
    }
    let n = close.len();
    check_len("high", high.len(), n)?;
    check_len("low", low.len(), n)?;

    let mut k = vec![f64::NAN; n];
    for i in (k_period - 1)..n {
        let window = (i + 1 - k_period)..=i;
        let mut hh = f64::NEG_INFINITY;
        let mut ll = f64::INFINITY;
        let mut any_nan = close[i].is_nan();
        for j in window {
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
        k[i] = if range > 0.0 {
            (100.0 * (close[i] - ll) / range).clamp(0.0, 100.0)
        } else {
            50.0
        };
    }

    // %D smooths the defined portion of %K only
    let first_defined = k.iter().position(|v| !v.is_nan());
    let mut d = vec![f64::NAN; n];
    if let Some(start) = first_defined {
        let smoothed = sma(&k[start..], d_period)?;
        for (offset, v) in smoothed.into_iter().enumerate() {
            d[start + offset] = v;
        }
    }

    Ok(StochasticSeries { k, d })
}
