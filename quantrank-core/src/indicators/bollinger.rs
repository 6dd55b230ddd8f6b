//! Bollinger Bands.
//!
//! Middle = SMA(period); upper/lower = middle ± k * population standard
//! deviation over the same trailing window.

use super::sma::sma;
use super::stats::rolling_std_population;
use super::IndicatorError;

/// Aligned band series. Wherever defined, upper >= middle >= lower.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn bollinger(values: &[f64], period: usize, k: f64) -> Result<BollingerSeries, IndicatorError> {
    let middle = sma(values, period)?;
    let std = rolling_std_population(values, period)?;
    let n = values.len();

    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];
    for i in 0..n {
        if !middle[i].is_nan() && !std[i].is_nan() {
            upper[i] = middle[i] + k * std[i];
            lower[i] = middle[i] - k * std[i];
        }
    }

    Ok(BollingerSeries {
        upper,
        middle,
        lower,
    })
}
