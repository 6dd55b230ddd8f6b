//! Backtest result artifact.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use quantrank_core::domain::Trade;

use crate::config::RunId;
use crate::metrics::PerformanceMetrics;

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Single point in an equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Per-rebalance diagnostics: how many tickers were scored and how many were
/// skipped for missing data that cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub date: NaiveDate,
    pub scored: usize,
    pub skipped: usize,
}

/// Complete, immutable result of one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub equity_curve: Vec<EquityPoint>,
    /// Benchmark value rebased to the initial capital, aligned with
    /// `equity_curve` by date.
    pub benchmark_curve: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
    pub metrics: PerformanceMetrics,
    pub cycles: Vec<CycleReport>,
    /// Missing-data warnings collected across the run (degraded factors,
    /// skipped tickers). Non-fatal by construction.
    pub warnings: Vec<String>,
}

/// Default schema version when loading older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl BacktestResult {
    /// Total tickers skipped across all cycles.
    pub fn total_skips(&self) -> usize {
        self.cycles.iter().map(|c| c.skipped).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantrank_core::domain::ExitSignal;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> BacktestResult {
        let mut trade = Trade::open("ACME", d(2022, 1, 3), 100.0, 0.05, 75.0);
        trade.close(d(2022, 1, 17), 108.0, ExitSignal::RankDropped);
        BacktestResult {
            schema_version: SCHEMA_VERSION,
            run_id: "abc123".into(),
            equity_curve: vec![
                EquityPoint {
                    date: d(2022, 1, 3),
                    value: 100_000.0,
                },
                EquityPoint {
                    date: d(2022, 1, 10),
                    value: 101_200.0,
                },
            ],
            benchmark_curve: vec![
                EquityPoint {
                    date: d(2022, 1, 3),
                    value: 100_000.0,
                },
                EquityPoint {
                    date: d(2022, 1, 10),
                    value: 100_400.0,
                },
            ],
            trades: vec![trade],
            metrics: PerformanceMetrics::default(),
            cycles: vec![CycleReport {
                date: d(2022, 1, 3),
                scored: 9,
                skipped: 1,
            }],
            warnings: vec!["ACME: no fundamentals as of 2022-01-03".into()],
        }
    }

    #[test]
    fn result_serialization_roundtrip() {
        let result = sample();
        let json = serde_json::to_string(&result).unwrap();
        let deser: BacktestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deser);
    }

    #[test]
    fn total_skips_sums_cycles() {
        assert_eq!(sample().total_skips(), 1);
    }
}
