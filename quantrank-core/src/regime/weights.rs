//! Regime- and timeframe-conditioned factor weights.
//!
//! Each (timeframe, regime) cell holds a weight vector over the five factors
//! summing to 1.0. A vector that does not sum to 1 within tolerance is a
//! configuration bug and aborts the run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::MarketRegime;
use crate::domain::{FactorBreakdown, Timeframe};

/// Weight-sum tolerance.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Fatal configuration errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error(
        "factor weights for {timeframe:?}/{regime:?} sum to {sum} (must be 1.0 ± {tolerance})"
    )]
    WeightSum {
        timeframe: Timeframe,
        regime: MarketRegime,
        sum: f64,
        tolerance: f64,
    },
    #[error("factor weight for {timeframe:?}/{regime:?} is negative or non-finite")]
    InvalidWeight {
        timeframe: Timeframe,
        regime: MarketRegime,
    },
}

/// Weight vector over the five factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub quality: f64,
    pub value: f64,
    pub momentum: f64,
    pub low_volatility: f64,
    pub smart_money: f64,
}

impl FactorWeights {
    pub fn sum(&self) -> f64 {
        self.quality + self.value + self.momentum + self.low_volatility + self.smart_money
    }

    fn components(&self) -> [f64; 5] {
        [
            self.quality,
            self.value,
            self.momentum,
            self.low_volatility,
            self.smart_money,
        ]
    }

    /// Weighted sum against a factor breakdown. Both sides are closed
    /// five-field structs, so the pairing cannot drift.
    pub fn apply(&self, breakdown: &FactorBreakdown) -> f64 {
        self.quality * breakdown.quality
            + self.value * breakdown.value
            + self.momentum * breakdown.momentum
            + self.low_volatility * breakdown.low_volatility
            + self.smart_money * breakdown.smart_money
    }
}

/// Full weight table: one vector per (timeframe, regime) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    pub short: RegimeWeights,
    pub medium: RegimeWeights,
    pub long: RegimeWeights,
}

/// Per-regime weights for one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeWeights {
    pub bull: FactorWeights,
    pub bear: FactorWeights,
    pub sideways: FactorWeights,
    pub high_vol: FactorWeights,
}

impl RegimeWeights {
    pub fn get(&self, regime: MarketRegime) -> &FactorWeights {
        match regime {
            MarketRegime::Bull => &self.bull,
            MarketRegime::Bear => &self.bear,
            MarketRegime::Sideways => &self.sideways,
            MarketRegime::HighVol => &self.high_vol,
        }
    }
}

impl WeightTable {
    pub fn get(&self, timeframe: Timeframe, regime: MarketRegime) -> &FactorWeights {
        let per_regime = match timeframe {
            Timeframe::Short => &self.short,
            Timeframe::Medium => &self.medium,
            Timeframe::Long => &self.long,
        };
        per_regime.get(regime)
    }

    /// Validate every cell: weights non-negative, finite, summing to 1.0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for timeframe in Timeframe::ALL {
            for regime in MarketRegime::ALL {
                let weights = self.get(timeframe, regime);
                if weights
                    .components()
                    .iter()
                    .any(|w| !w.is_finite() || *w < 0.0)
                {
                    return Err(ConfigError::InvalidWeight { timeframe, regime });
                }
                let sum = weights.sum();
                if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                    return Err(ConfigError::WeightSum {
                        timeframe,
                        regime,
                        sum,
                        tolerance: WEIGHT_SUM_TOLERANCE,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for WeightTable {
    /// Built-in weights.
    ///
    /// Short horizons lean on momentum and smart money; long horizons lean
    /// on quality and value. Bear and high-vol regimes rotate toward
    /// low-volatility and quality, momentum is de-emphasized where it decays
    /// fastest.
    fn default() -> Self {
        let w = |q: f64, v: f64, m: f64, lv: f64, sm: f64| FactorWeights {
            quality: q,
            value: v,
            momentum: m,
            low_volatility: lv,
            smart_money: sm,
        };
        Self {
            short: RegimeWeights {
                bull: w(0.10, 0.10, 0.45, 0.10, 0.25),
                bear: w(0.20, 0.15, 0.15, 0.30, 0.20),
                sideways: w(0.15, 0.20, 0.25, 0.20, 0.20),
                high_vol: w(0.20, 0.10, 0.10, 0.40, 0.20),
            },
            medium: RegimeWeights {
                bull: w(0.20, 0.15, 0.35, 0.10, 0.20),
                bear: w(0.25, 0.20, 0.10, 0.30, 0.15),
                sideways: w(0.20, 0.25, 0.20, 0.20, 0.15),
                high_vol: w(0.25, 0.15, 0.10, 0.35, 0.15),
            },
            long: RegimeWeights {
                bull: w(0.30, 0.25, 0.20, 0.10, 0.15),
                bear: w(0.35, 0.25, 0.05, 0.25, 0.10),
                sideways: w(0.30, 0.30, 0.10, 0.20, 0.10),
                high_vol: w(0.30, 0.20, 0.05, 0.35, 0.10),
            },
        }
    }
}
