//! FundamentalsSnapshot — point-in-time company fundamentals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Point-in-time fundamentals for one ticker.
///
/// Every field the factor models read is optional: providers routinely return
/// partial statements, and a missing field degrades the affected factor
/// component to neutral rather than failing the ticker. Snapshots are
/// recomputed each cycle and not retained, except as growth-delta inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    pub ticker: String,
    pub as_of: Option<NaiveDate>,
    pub revenue: Option<f64>,
    pub cogs: Option<f64>,
    pub total_assets: Option<f64>,
    pub earnings: Option<f64>,
    pub book_value: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub debt: Option<f64>,
    pub equity: Option<f64>,
    pub market_cap: Option<f64>,
    pub shares_outstanding: Option<f64>,
    pub return_on_equity: Option<f64>,
    /// Trailing net-margin observations, oldest first. Used for margin
    /// stability scoring; fewer than three observations is treated as missing.
    #[serde(default)]
    pub margin_history: Vec<f64>,
    /// Institutional ownership as a fraction of float, current and prior
    /// quarter.
    pub institutional_ownership: Option<f64>,
    pub institutional_ownership_prev: Option<f64>,
    /// Short interest expressed as days-to-cover.
    pub days_to_cover: Option<f64>,
}

impl FundamentalsSnapshot {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// Gross profitability: (revenue − COGS) / total assets.
    ///
    /// None when any input is missing or assets are non-positive.
    pub fn gross_profitability(&self) -> Option<f64> {
        let revenue = self.revenue?;
        let cogs = self.cogs?;
        let assets = self.total_assets?;
        if assets <= 0.0 {
            return None;
        }
        Some((revenue - cogs) / assets)
    }

    /// Debt-to-equity ratio. None when equity is missing or non-positive.
    pub fn debt_to_equity(&self) -> Option<f64> {
        let debt = self.debt?;
        let equity = self.equity?;
        if equity <= 0.0 {
            return None;
        }
        Some(debt / equity)
    }

    /// Earnings yield: earnings / market cap. Negative earnings yield a
    /// negative value; callers decide how to score it.
    pub fn earnings_yield(&self) -> Option<f64> {
        let earnings = self.earnings?;
        let mcap = self.market_cap?;
        if mcap <= 0.0 {
            return None;
        }
        Some(earnings / mcap)
    }

    /// Book-to-market ratio. None unless both sides are positive-definite.
    pub fn book_to_market(&self) -> Option<f64> {
        let book = self.book_value?;
        let mcap = self.market_cap?;
        if mcap <= 0.0 || book <= 0.0 {
            return None;
        }
        Some(book / mcap)
    }

    /// Free-cash-flow yield: FCF / market cap.
    pub fn fcf_yield(&self) -> Option<f64> {
        let fcf = self.free_cash_flow?;
        let mcap = self.market_cap?;
        if mcap <= 0.0 {
            return None;
        }
        Some(fcf / mcap)
    }

    /// Quarter-over-quarter change in institutional ownership, in fraction
    /// points of float.
    pub fn institutional_qoq_change(&self) -> Option<f64> {
        Some(self.institutional_ownership? - self.institutional_ownership_prev?)
    }
}
