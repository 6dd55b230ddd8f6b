//! Quality factor.
//!
//! Blend of gross profitability ((revenue − COGS) / assets), return on
//! equity, inverse debt-to-equity, and inverse margin volatility. Higher is
//! better on every component after inversion.

use super::{blend, scale_linear};
use crate::domain::{FactorName, FactorScore, FundamentalsSnapshot};
use crate::indicators::stats::std_dev;

// Component weights; renormalized when a component is missing.
const W_GROSS_PROFITABILITY: f64 = 0.40;
const W_ROE: f64 = 0.25;
const W_LEVERAGE: f64 = 0.20;
const W_MARGIN_STABILITY: f64 = 0.15;

pub fn quality_score(fundamentals: &FundamentalsSnapshot) -> FactorScore {
    let gp = fundamentals
        .gross_profitability()
        .map(|gp| scale_linear(gp, 0.0, 0.6));

    let roe = fundamentals
        .return_on_equity
        .map(|roe| scale_linear(roe, 0.0, 0.30));

    let leverage = fundamentals
        .debt_to_equity()
        .map(|de| scale_linear(de, 2.0, 0.0));

    let margin_stability = margin_volatility(fundamentals).map(|mv| scale_linear(mv, 0.10, 0.0));

    let value = blend(&[
        (gp, W_GROSS_PROFITABILITY),
        (roe, W_ROE),
        (leverage, W_LEVERAGE),
        (margin_stability, W_MARGIN_STABILITY),
    ]);
    FactorScore::new(FactorName::Quality, value)
}

/// Standard deviation of trailing net margins. Needs at least three
/// observations to mean anything.
fn margin_volatility(fundamentals: &FundamentalsSnapshot) -> Option<f64> {
    if fundamentals.margin_history.len() < 3 {
        return None;
    }
    Some(std_dev(&fundamentals.margin_history))
}
