//! Market regime classification.
//!
//! Stateless four-way label derived fresh each cycle from the benchmark's
//! position against its long moving average and a volatility gauge (a
//! VIX-style scalar). Backtests recompute the label per historical date; no
//! transition history is kept.

pub mod weights;

pub use weights::{ConfigError, FactorWeights, WeightTable};

use serde::{Deserialize, Serialize};

use crate::indicators::sma;

/// Prevailing market environment. Closed set: adding a state is a
/// compiler-checked change everywhere weights are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketRegime {
    Bull,
    Bear,
    Sideways,
    HighVol,
}

impl MarketRegime {
    pub const ALL: [MarketRegime; 4] = [
        MarketRegime::Bull,
        MarketRegime::Bear,
        MarketRegime::Sideways,
        MarketRegime::HighVol,
    ];
}

/// Classification thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeThresholds {
    /// Moving-average period for the benchmark trend read.
    pub ma_period: usize,
    /// Volatility gauge level above which HIGH_VOL overrides everything.
    pub high_vol_threshold: f64,
    /// Gauge level below which a benchmark above trend reads as BULL.
    pub low_vol_threshold: f64,
    /// Fractional distance below the moving average that counts as
    /// "materially below" for the BEAR read.
    pub bear_trend_margin: f64,
}

impl Default for RegimeThresholds {
    fn default() -> Self {
        Self {
            ma_period: 200,
            high_vol_threshold: 30.0,
            low_vol_threshold: 20.0,
            bear_trend_margin: 0.02,
        }
    }
}

/// Classify the current environment from the benchmark close series (oldest
/// first) and the volatility gauge as of the same date.
///
/// Precedence: HIGH_VOL overrides everything; then BULL (above trend, calm),
/// then BEAR (materially below trend, elevated volatility), else SIDEWAYS.
/// Insufficient benchmark history reads as SIDEWAYS — the neutral stance.
pub fn classify(
    benchmark_closes: &[f64],
    volatility_gauge: f64,
    thresholds: &RegimeThresholds,
) -> MarketRegime {
    if volatility_gauge >= thresholds.high_vol_threshold {
        return MarketRegime::HighVol;
    }

    let n = benchmark_closes.len();
    if n < thresholds.ma_period {
        return MarketRegime::Sideways;
    }
    let ma_series = match sma(benchmark_closes, thresholds.ma_period) {
        Ok(s) => s,
        Err(_) => return MarketRegime::Sideways,
    };
    let ma = ma_series[n - 1];
    let last = benchmark_closes[n - 1];
    if ma.is_nan() || last.is_nan() {
        return MarketRegime::Sideways;
    }

    if last > ma && volatility_gauge < thresholds.low_vol_threshold {
        MarketRegime::Bull
    } else if last < ma * (1.0 - thresholds.bear_trend_margin)
        && volatility_gauge >= thresholds.low_vol_threshold
    {
        MarketRegime::Bear
    } else {
        MarketRegime::Sideways
    }
}
