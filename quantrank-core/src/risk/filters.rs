//! Hard risk filters.
//!
//! Filters run in a fixed order — market cap, liquidity, price floor,
//! leverage, days-to-cover — and report the first violation only, so the
//! reason attached to a rejected candidate is reproducible. A missing input
//! cannot trigger its filter; the error policy degrades missing data to
//! neutral rather than rejecting the name.

use serde::{Deserialize, Serialize};

/// First-violation reason. Closed set, matched exhaustively in the report
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterReason {
    MarketCap,
    Liquidity,
    PriceFloor,
    Leverage,
    DaysToCover,
}

/// Configured floors and ceilings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFilters {
    pub min_market_cap: f64,
    /// Floor on average daily dollar volume.
    pub min_avg_dollar_volume: f64,
    pub min_price: f64,
    pub max_debt_to_equity: f64,
    pub max_days_to_cover: f64,
}

impl Default for RiskFilters {
    fn default() -> Self {
        Self {
            min_market_cap: 300_000_000.0,
            min_avg_dollar_volume: 2_000_000.0,
            min_price: 5.0,
            max_debt_to_equity: 3.0,
            max_days_to_cover: 10.0,
        }
    }
}

/// Per-candidate observations the filters inspect.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskInputs {
    pub market_cap: Option<f64>,
    pub avg_dollar_volume: Option<f64>,
    pub price: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub days_to_cover: Option<f64>,
}

impl RiskFilters {
    /// Evaluate in fixed order; return the first violation, or None when the
    /// candidate passes.
    pub fn evaluate(&self, inputs: &RiskInputs) -> Option<FilterReason> {
        if inputs.market_cap.is_some_and(|m| m < self.min_market_cap) {
            return Some(FilterReason::MarketCap);
        }
        if inputs
            .avg_dollar_volume
            .is_some_and(|v| v < self.min_avg_dollar_volume)
        {
            return Some(FilterReason::Liquidity);
        }
        if inputs.price.is_some_and(|p| p < self.min_price) {
            return Some(FilterReason::PriceFloor);
        }
        if inputs
            .debt_to_equity
            .is_some_and(|d| d > self.max_debt_to_equity)
        {
            return Some(FilterReason::Leverage);
        }
        if inputs
            .days_to_cover
            .is_some_and(|d| d > self.max_days_to_cover)
        {
            return Some(FilterReason::DaysToCover);
        }
        None
    }
}
