//! Data-provider port.
//!
//! The core consumes already-normalized observations through this trait; the
//! HTTP/scraping adapters that implement it live outside the crate and own
//! all retry, rate-limit, and caching policy. Every accessor is bounded by
//! an as-of date so the backtest engine can guarantee no lookahead.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{FundamentalsSnapshot, PriceBar, SmartMoneyEvent};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no price history for {ticker}")]
    NoHistory { ticker: String },
    #[error("benchmark series unavailable")]
    BenchmarkUnavailable,
}

/// Synchronous, already-validated market data access.
///
/// Implementations must return series in ascending date order and must not
/// include observations dated after `as_of`.
pub trait MarketData: Send + Sync {
    /// Daily bars for a ticker, up to and including `as_of`.
    fn bars(&self, ticker: &str, as_of: NaiveDate) -> Result<Vec<PriceBar>, ProviderError>;

    /// Fundamentals as most recently reported on or before `as_of`.
    fn fundamentals(
        &self,
        ticker: &str,
        as_of: NaiveDate,
    ) -> Result<FundamentalsSnapshot, ProviderError>;

    /// Smart-money event log entries effective on or before `as_of`.
    fn smart_money_events(
        &self,
        ticker: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<SmartMoneyEvent>, ProviderError>;

    /// Benchmark index bars up to and including `as_of`.
    fn benchmark_bars(&self, as_of: NaiveDate) -> Result<Vec<PriceBar>, ProviderError>;

    /// Volatility gauge level (VIX-style) as of the date.
    fn volatility_gauge(&self, as_of: NaiveDate) -> Result<f64, ProviderError>;
}
