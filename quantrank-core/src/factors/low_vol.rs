//! Low-volatility factor.
//!
//! Rewards quiet names: inverse annualized realized volatility blended with
//! inverse CAPM beta against the benchmark.

use super::{blend, scale_linear};
use crate::domain::{FactorName, FactorScore};
use crate::indicators::stats::{annualized_volatility, beta};
use crate::indicators::IndicatorError;

const W_REALIZED_VOL: f64 = 0.60;
const W_BETA: f64 = 0.40;

/// Score from ticker and benchmark close series, both ending at the same
/// as-of date. The series may differ in length (a name that listed after the
/// benchmark's first bar has a shorter history); beta is computed over the
/// trailing window the two have in common, while realized volatility uses
/// the ticker's full history.
pub fn low_volatility_score(
    closes: &[f64],
    benchmark_closes: &[f64],
) -> Result<FactorScore, IndicatorError> {
    let vol = annualized_volatility(closes).map(|v| scale_linear(v, 0.60, 0.10));

    let common = closes.len().min(benchmark_closes.len());
    let b = beta(
        &closes[closes.len() - common..],
        &benchmark_closes[benchmark_closes.len() - common..],
    )?
    .map(|b| scale_linear(b, 2.0, 0.0));

    let value = blend(&[(vol, W_REALIZED_VOL), (b, W_BETA)]);
    Ok(FactorScore::new(FactorName::LowVolatility, value))
}
