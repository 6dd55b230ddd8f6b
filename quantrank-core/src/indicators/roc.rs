//! Rate of Change (ROC).
//!
//! ROC[t] = 100 * (value[t] - value[t-period]) / value[t-period].
//! First valid value at index `period`.

use super::IndicatorError;

pub fn roc(values: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::ZeroPeriod);
    }
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in period..n {
        let base = values[i - period];
        let curr = values[i];
        if base.is_nan() || curr.is_nan() || base == 0.0 {
            continue;
        }
        result[i] = 100.0 * (curr - base) / base;
    }
    Ok(result)
}
