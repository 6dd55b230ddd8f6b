//! Backtest orchestration on top of `quantrank-core`.
//!
//! The runner owns everything stateful about a run: configuration loading
//! and validation, the walk-forward rebalance engine, performance metrics,
//! and result artifacts. The core stays pure; all data access goes through
//! the `MarketData` port supplied by the caller.

pub mod config;
pub mod engine;
pub mod export;
pub mod metrics;
pub mod result;

pub use config::{BacktestConfig, ConfigError, RunId};
pub use engine::{run_backtest, EngineError};
pub use metrics::PerformanceMetrics;
pub use result::{BacktestResult, CycleReport, EquityPoint, SCHEMA_VERSION};
