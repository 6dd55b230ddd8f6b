//! Trade — a simulated position opened and closed by the backtest engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Why the engine closed a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitSignal {
    /// Ticker fell out of the top-N ranking at a rebalance.
    RankDropped,
    StopLoss,
    TakeProfit,
    /// Position still open when the run ended; closed at last price.
    EndOfRun,
}

/// One simulated round trip. Created on entry with the exit side empty,
/// completed when the engine closes the position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub ticker: String,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    /// Position size as a fraction of equity at entry.
    pub size_pct: f64,
    /// Conviction score that triggered the entry.
    pub entry_score: f64,
    pub exit_date: Option<NaiveDate>,
    pub exit_price: Option<f64>,
    pub exit_signal: Option<ExitSignal>,
    pub return_pct: Option<f64>,
    pub holding_days: Option<i64>,
}

impl Trade {
    pub fn open(
        ticker: impl Into<String>,
        entry_date: NaiveDate,
        entry_price: f64,
        size_pct: f64,
        entry_score: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            entry_date,
            entry_price,
            size_pct,
            entry_score,
            exit_date: None,
            exit_price: None,
            exit_signal: None,
            return_pct: None,
            holding_days: None,
        }
    }

    /// Close the trade. Exit date must strictly follow the entry date.
    pub fn close(&mut self, exit_date: NaiveDate, exit_price: f64, signal: ExitSignal) {
        debug_assert!(exit_date > self.entry_date, "exit must follow entry");
        self.exit_date = Some(exit_date);
        self.exit_price = Some(exit_price);
        self.exit_signal = Some(signal);
        self.return_pct = if self.entry_price > 0.0 {
            Some((exit_price - self.entry_price) / self.entry_price)
        } else {
            Some(0.0)
        };
        self.holding_days = Some((exit_date - self.entry_date).num_days());
    }

    pub fn is_open(&self) -> bool {
        self.exit_date.is_none()
    }

    pub fn is_winner(&self) -> bool {
        self.return_pct.is_some_and(|r| r > 0.0)
    }
}
