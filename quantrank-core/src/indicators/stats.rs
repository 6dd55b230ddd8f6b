//! Statistical helpers shared by indicators and factor models.

use super::IndicatorError;

/// Mean of a slice; 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n-1 denominator); 0.0 below two observations.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Rolling population standard deviation over a trailing window.
///
/// NaN until the window fills, like every indicator output.
pub fn rolling_std_population(values: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::ZeroPeriod);
    }
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n < period {
        return Ok(result);
    }

    for i in (period - 1)..n {
        let window = &values[(i + 1 - period)..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let m = window.iter().sum::<f64>() / period as f64;
        let variance = window.iter().map(|v| (v - m).powi(2)).sum::<f64>() / period as f64;
        result[i] = variance.sqrt();
    }

    Ok(result)
}

/// Simple period-over-period returns: r[t] = (v[t] - v[t-1]) / v[t-1].
///
/// Output has one fewer entry than the input. Non-positive denominators
/// produce NaN.
pub fn simple_returns(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return Vec::new();
    }
    values
        .windows(2)
        .map(|w| {
            if w[0] > 0.0 && !w[0].is_nan() && !w[1].is_nan() {
                (w[1] - w[0]) / w[0]
            } else {
                f64::NAN
            }
        })
        .collect()
}

/// Annualized realized volatility from a close series, assuming 252 trading
/// days. None below two usable returns.
pub fn annualized_volatility(closes: &[f64]) -> Option<f64> {
    let returns: Vec<f64> = simple_returns(closes)
        .into_iter()
        .filter(|r| !r.is_nan())
        .collect();
    if returns.len() < 2 {
        return None;
    }
    Some(std_dev(&returns) * (252.0f64).sqrt())
}

/// CAPM beta of a ticker's returns against benchmark returns.
///
/// beta = cov(r_ticker, r_bench) / var(r_bench). The two close series must be
/// date-aligned and equal length. None when the benchmark variance is
/// (numerically) zero or fewer than two paired returns survive.
pub fn beta(
    ticker_closes: &[f64],
    benchmark_closes: &[f64],
) -> Result<Option<f64>, IndicatorError> {
    super::check_len("benchmark", benchmark_closes.len(), ticker_closes.len())?;

    let rt = simple_returns(ticker_closes);
    let rb = simple_returns(benchmark_closes);

    let pairs: Vec<(f64, f64)> = rt
        .iter()
        .zip(rb.iter())
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(&a, &b)| (a, b))
        .collect();
    if pairs.len() < 2 {
        return Ok(None);
    }

    let mean_t = pairs.iter().map(|p| p.0).sum::<f64>() / pairs.len() as f64;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / pairs.len() as f64;

    let mut cov = 0.0;
    let mut var_b = 0.0;
    for (t, b) in &pairs {
        cov += (t - mean_t) * (b - mean_b);
        var_b += (b - mean_b).powi(2);
    }
    if var_b < 1e-15 {
        return Ok(None);
    }
    Ok(Some(cov / var_b))
}
