//! Factor models — pure functions mapping raw inputs to 0–100 scores.
//!
//! Every factor is monotonic toward "more attractive" and degrades to the
//! neutral score (50) when its inputs are structurally missing. A factor
//! never fails a ticker; only malformed input (mismatched series lengths)
//! is an error, and that is caught at the indicator layer.

pub mod low_vol;
pub mod momentum;
pub mod quality;
pub mod smart_money;
pub mod value;

pub use low_vol::low_volatility_score;
pub use momentum::momentum_score;
pub use quality::quality_score;
pub use smart_money::{smart_money_score, SmartMoneyParams};
pub use value::value_score;

/// Linearly map `x` onto [0,100] between `worst` and `best`, clamped.
///
/// `worst` may exceed `best`; in that case lower raw values score higher
/// (used for the inverse factors: debt, volatility, beta).
pub(crate) fn scale_linear(x: f64, worst: f64, best: f64) -> f64 {
    if x.is_nan() || worst == best {
        return 50.0;
    }
    (100.0 * (x - worst) / (best - worst)).clamp(0.0, 100.0)
}

/// Weighted blend of optional components.
///
/// Missing components are dropped and the remaining weights renormalized;
/// all components missing yields the neutral 50.
pub(crate) fn blend(components: &[(Option<f64>, f64)]) -> f64 {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for (value, weight) in components {
        if let Some(v) = value {
            weighted += v * weight;
            total_weight += weight;
        }
    }
    if total_weight <= 0.0 {
        return 50.0;
    }
    (weighted / total_weight).clamp(0.0, 100.0)
}
