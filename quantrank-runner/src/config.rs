//! Serializable backtest configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use quantrank_core::domain::Timeframe;
use quantrank_core::factors::SmartMoneyParams;
use quantrank_core::regime::{self, RegimeThresholds, WeightTable};
use quantrank_core::risk::{KellyParams, RiskFilters};
use quantrank_core::scoring::ScoreParams;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("start date {start} is not before end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("universe is empty")]
    EmptyUniverse,
    #[error("rebalance cadence must be at least 1 day")]
    ZeroCadence,
    #[error("top_n must be at least 1")]
    ZeroTopN,
    #[error("transaction cost must be non-negative and below 1.0, got {0}")]
    InvalidTransactionCost(f64),
    #[error("initial capital must be positive, got {0}")]
    InvalidCapital(f64),
    #[error("stop/target percentages must be positive when set")]
    InvalidExitLevels,
    #[error(transparent)]
    Weights(#[from] regime::ConfigError),
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Everything needed to reproduce a backtest. The core never reads ambient
/// state; all thresholds and weight tables travel in this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Backtest start date (inclusive).
    pub start_date: NaiveDate,
    /// Backtest end date (inclusive).
    pub end_date: NaiveDate,
    /// Tickers to score each cycle.
    pub universe: Vec<String>,
    /// Holding horizon the scoring targets.
    pub timeframe: Timeframe,
    /// Days between rebalances (7 = weekly).
    #[serde(default = "default_cadence")]
    pub rebalance_every_days: u32,
    /// Number of top-ranked picks held.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Transaction cost charged on entry and exit notional (0.001 = 10 bps).
    #[serde(default = "default_transaction_cost")]
    pub transaction_cost_pct: f64,
    #[serde(default = "default_capital")]
    pub initial_capital: f64,
    /// Close a position when its return falls to -stop_loss_pct.
    #[serde(default)]
    pub stop_loss_pct: Option<f64>,
    /// Close a position when its return reaches take_profit_pct.
    #[serde(default)]
    pub take_profit_pct: Option<f64>,
    #[serde(default)]
    pub regime_thresholds: RegimeThresholds,
    #[serde(default)]
    pub weights: WeightTable,
    #[serde(default)]
    pub risk_filters: RiskFilters,
    #[serde(default)]
    pub kelly: KellyParams,
    #[serde(default)]
    pub score: ScoreParams,
    #[serde(default)]
    pub smart_money: SmartMoneyParams,
}

fn default_cadence() -> u32 {
    7
}

fn default_top_n() -> usize {
    10
}

fn default_transaction_cost() -> f64 {
    0.001
}

fn default_capital() -> f64 {
    100_000.0
}

impl BacktestConfig {
    /// Minimal config over a universe; everything else defaulted.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        universe: Vec<String>,
        timeframe: Timeframe,
    ) -> Self {
        Self {
            start_date,
            end_date,
            universe,
            timeframe,
            rebalance_every_days: default_cadence(),
            top_n: default_top_n(),
            transaction_cost_pct: default_transaction_cost(),
            initial_capital: default_capital(),
            stop_loss_pct: None,
            take_profit_pct: None,
            regime_thresholds: RegimeThresholds::default(),
            weights: WeightTable::default(),
            risk_filters: RiskFilters::default(),
            kelly: KellyParams::default(),
            score: ScoreParams::default(),
            smart_money: SmartMoneyParams::default(),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configuration bugs before the run starts. An invalid weight
    /// table aborts here, never mid-backtest.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_date >= self.end_date {
            return Err(ConfigError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.universe.is_empty() {
            return Err(ConfigError::EmptyUniverse);
        }
        if self.rebalance_every_days == 0 {
            return Err(ConfigError::ZeroCadence);
        }
        if self.top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }
        if !(0.0..1.0).contains(&self.transaction_cost_pct) {
            return Err(ConfigError::InvalidTransactionCost(
                self.transaction_cost_pct,
            ));
        }
        if self.initial_capital <= 0.0 {
            return Err(ConfigError::InvalidCapital(self.initial_capital));
        }
        if self.stop_loss_pct.is_some_and(|p| p <= 0.0)
            || self.take_profit_pct.is_some_and(|p| p <= 0.0)
        {
            return Err(ConfigError::InvalidExitLevels);
        }
        self.weights.validate()?;
        Ok(())
    }

    /// Deterministic hash ID: identical configs share a RunId.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("BacktestConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// Rebalance dates at the configured cadence, inclusive of the start,
    /// never past the end.
    pub fn rebalance_dates(&self) -> Vec<NaiveDate> {
        let step = chrono::Duration::days(self.rebalance_every_days as i64);
        let mut dates = Vec::new();
        let mut date = self.start_date;
        while date <= self.end_date {
            dates.push(date);
            date += step;
        }
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> BacktestConfig {
        BacktestConfig::new(
            d(2022, 1, 3),
            d(2023, 1, 3),
            vec!["AAPL".into(), "MSFT".into()],
            Timeframe::Medium,
        )
    }

    #[test]
    fn default_config_validates() {
        sample().validate().unwrap();
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let mut config = sample();
        config.end_date = d(2021, 1, 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn bad_weight_table_is_rejected() {
        let mut config = sample();
        config.weights.medium.bull.quality += 0.3;
        assert!(matches!(config.validate(), Err(ConfigError::Weights(_))));
    }

    #[test]
    fn run_id_is_deterministic_and_config_sensitive() {
        let a = sample();
        let b = sample();
        assert_eq!(a.run_id(), b.run_id());

        let mut c = sample();
        c.top_n = 5;
        assert_ne!(a.run_id(), c.run_id());
    }

    #[test]
    fn rebalance_dates_honor_cadence() {
        let mut config = sample();
        config.end_date = d(2022, 1, 31);
        let dates = config.rebalance_dates();
        assert_eq!(dates[0], d(2022, 1, 3));
        assert_eq!(dates[1], d(2022, 1, 10));
        assert!(*dates.last().unwrap() <= d(2022, 1, 31));
    }

    #[test]
    fn toml_roundtrip() {
        let toml_str = r#"
            start_date = "2022-01-03"
            end_date = "2023-01-03"
            universe = ["AAPL", "MSFT", "NVDA"]
            timeframe = "MEDIUM"
            top_n = 5
            transaction_cost_pct = 0.0005
        "#;
        let config = BacktestConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.universe.len(), 3);
        assert_eq!(config.rebalance_every_days, 7); // default
    }

    #[test]
    fn toml_invalid_config_is_rejected() {
        let toml_str = r#"
            start_date = "2023-01-03"
            end_date = "2022-01-03"
            universe = ["AAPL"]
            timeframe = "SHORT"
        "#;
        assert!(BacktestConfig::from_toml_str(toml_str).is_err());
    }
}
