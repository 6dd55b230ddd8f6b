//! Backtest engine — walk-forward simulation over rebalance cycles.
//!
//! Each cycle: classify the regime, score the universe as of the cycle date,
//! close positions whose exit condition fired, then open the top-ranked
//! names sized by the risk overlay. All data access goes through the
//! [`MarketData`] port with the cycle date as the as-of bound, so the engine
//! cannot observe anything dated after the decision point.
//!
//! Missing data for one ticker skips that ticker for the cycle and records a
//! warning; an open position in a skipped ticker is held until the data
//! returns. Missing benchmark data is fatal: the regime classifier cannot
//! run without it, and a silently defaulted regime would corrupt the run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use rayon::prelude::*;
use thiserror::Error;

use quantrank_core::domain::{
    ExitSignal, FactorBreakdown, FundamentalsSnapshot, PriceBar, Trade,
};
use quantrank_core::factors::{
    low_volatility_score, momentum_score, quality_score, smart_money_score, value_score,
};
use quantrank_core::provider::{MarketData, ProviderError};
use quantrank_core::regime;
use quantrank_core::risk::RiskInputs;
use quantrank_core::scoring::{score_universe, Candidate};

use crate::config::{BacktestConfig, ConfigError};
use crate::metrics::PerformanceMetrics;
use crate::result::{BacktestResult, CycleReport, EquityPoint, SCHEMA_VERSION};

/// Bars averaged for the liquidity filter's dollar-volume input.
const LIQUIDITY_WINDOW: usize = 20;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("benchmark data unavailable at {date}: {source}")]
    Benchmark {
        date: NaiveDate,
        source: ProviderError,
    },
    #[error("run cancelled")]
    Cancelled,
}

/// An open position and the index of its trade record.
struct OpenPosition {
    ticker: String,
    shares: f64,
    last_price: f64,
    trade_idx: usize,
}

/// Per-ticker outcome of the parallel scoring pass.
enum TickerOutcome {
    Scored {
        candidate: Candidate,
        price: f64,
        warnings: Vec<String>,
    },
    Skipped {
        warning: String,
    },
}

/// Run a full backtest.
///
/// `cancel` is a cooperative flag checked once per rebalance cycle; setting
/// it mid-run aborts with [`EngineError::Cancelled`] rather than returning a
/// partial result.
pub fn run_backtest(
    config: &BacktestConfig,
    provider: &dyn MarketData,
    cancel: Option<&AtomicBool>,
) -> Result<BacktestResult, EngineError> {
    config.validate()?;

    let mut cash = config.initial_capital;
    let mut positions: Vec<OpenPosition> = Vec::new();
    let mut trades: Vec<Trade> = Vec::new();
    let mut equity_curve: Vec<EquityPoint> = Vec::new();
    let mut benchmark_curve: Vec<EquityPoint> = Vec::new();
    let mut cycles: Vec<CycleReport> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let mut benchmark_base: Option<f64> = None;

    for date in config.rebalance_dates() {
        if cancel.is_some_and(|f| f.load(Ordering::Relaxed)) {
            return Err(EngineError::Cancelled);
        }

        let benchmark_bars = provider
            .benchmark_bars(date)
            .map_err(|source| EngineError::Benchmark { date, source })?;
        let gauge = provider
            .volatility_gauge(date)
            .map_err(|source| EngineError::Benchmark { date, source })?;
        let benchmark_closes: Vec<f64> = benchmark_bars.iter().map(|b| b.close).collect();
        let regime = regime::classify(&benchmark_closes, gauge, &config.regime_thresholds);

        // Score every ticker in parallel; collect preserves universe order
        // so the run stays deterministic.
        let outcomes: Vec<TickerOutcome> = config
            .universe
            .par_iter()
            .map(|ticker| evaluate_ticker(ticker, date, provider, config, &benchmark_closes))
            .collect();

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut prices: HashMap<String, f64> = HashMap::new();
        let mut skipped = 0usize;
        for outcome in outcomes {
            match outcome {
                TickerOutcome::Scored {
                    candidate,
                    price,
                    warnings: ticker_warnings,
                } => {
                    prices.insert(candidate.ticker.clone(), price);
                    candidates.push(candidate);
                    warnings.extend(ticker_warnings);
                }
                TickerOutcome::Skipped { warning } => {
                    skipped += 1;
                    warnings.push(warning);
                }
            }
        }

        let universe_scores = score_universe(
            &candidates,
            regime,
            config.timeframe,
            &config.weights,
            &config.risk_filters,
            &config.kelly,
            &config.score,
        )
        .map_err(|e| EngineError::Config(e.into()))?;

        let held_rank: Vec<&str> = universe_scores
            .picks
            .iter()
            .take(config.top_n)
            .map(|s| s.ticker.as_str())
            .collect();

        // Exits first so freed capital is available for this cycle's entries.
        // Stop and target take precedence over a rank drop. A position whose
        // ticker was skipped this cycle is held through the data gap: its
        // absence from the ranking is a data artifact, not a rank drop.
        let mut still_open: Vec<OpenPosition> = Vec::new();
        for mut position in positions {
            let scored = prices.contains_key(&position.ticker);
            if let Some(&price) = prices.get(&position.ticker) {
                position.last_price = price;
            }
            let price = position.last_price;
            let entry_date = trades[position.trade_idx].entry_date;
            let entry_price = trades[position.trade_idx].entry_price;
            let ret = if entry_price > 0.0 {
                (price - entry_price) / entry_price
            } else {
                0.0
            };

            let signal = if !scored {
                None
            } else if config.stop_loss_pct.is_some_and(|p| ret <= -p) {
                Some(ExitSignal::StopLoss)
            } else if config.take_profit_pct.is_some_and(|p| ret >= p) {
                Some(ExitSignal::TakeProfit)
            } else if !held_rank.contains(&position.ticker.as_str()) {
                Some(ExitSignal::RankDropped)
            } else {
                None
            };

            match signal {
                Some(signal) if date > entry_date => {
                    let notional = position.shares * price;
                    cash += notional - notional * config.transaction_cost_pct;
                    trades[position.trade_idx].close(date, price, signal);
                }
                _ => still_open.push(position),
            }
        }
        positions = still_open;

        // Entries: top-N picks not already held, sized by the risk overlay
        // against current equity, bounded by available cash.
        let marked_value: f64 = positions.iter().map(|p| p.shares * p.last_price).sum();
        let equity = cash + marked_value;
        for pick in universe_scores.picks.iter().take(config.top_n) {
            if positions.iter().any(|p| p.ticker == pick.ticker) {
                continue;
            }
            if pick.position_size_pct <= 0.0 {
                continue;
            }
            let Some(&price) = prices.get(&pick.ticker) else {
                continue;
            };
            if price <= 0.0 {
                continue;
            }
            let target = equity * pick.position_size_pct;
            let affordable = cash / (1.0 + config.transaction_cost_pct);
            let notional = target.min(affordable);
            if notional < 1e-6 {
                continue;
            }
            cash -= notional * (1.0 + config.transaction_cost_pct);
            trades.push(Trade::open(
                pick.ticker.clone(),
                date,
                price,
                notional / equity,
                pick.value,
            ));
            positions.push(OpenPosition {
                ticker: pick.ticker.clone(),
                shares: notional / price,
                last_price: price,
                trade_idx: trades.len() - 1,
            });
        }

        let marked_value: f64 = positions.iter().map(|p| p.shares * p.last_price).sum();
        equity_curve.push(EquityPoint {
            date,
            value: cash + marked_value,
        });

        if let Some(&last_close) = benchmark_closes.last().filter(|c| c.is_finite()) {
            let base = *benchmark_base.get_or_insert(last_close);
            benchmark_curve.push(EquityPoint {
                date,
                value: config.initial_capital * last_close / base,
            });
        }

        cycles.push(CycleReport {
            date,
            scored: candidates.len(),
            skipped,
        });
    }

    // Close whatever is still open at the final price so the trade log is
    // complete. A position opened on the last cycle stays open.
    for position in &positions {
        let entry_date = trades[position.trade_idx].entry_date;
        if config.end_date > entry_date {
            let price = position.last_price;
            let notional = position.shares * price;
            cash += notional - notional * config.transaction_cost_pct;
            trades[position.trade_idx].close(config.end_date, price, ExitSignal::EndOfRun);
        }
    }

    let equity_values: Vec<f64> = equity_curve.iter().map(|p| p.value).collect();
    let benchmark_values: Vec<f64> = benchmark_curve.iter().map(|p| p.value).collect();
    let periods_per_year = 365.25 / config.rebalance_every_days as f64;
    let metrics = PerformanceMetrics::compute(
        &equity_values,
        &benchmark_values,
        &trades,
        periods_per_year,
    );

    Ok(BacktestResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        equity_curve,
        benchmark_curve,
        trades,
        metrics,
        cycles,
        warnings,
    })
}

/// Build one ticker's scoring inputs as of the cycle date.
///
/// No price history skips the ticker. Missing fundamentals or event data
/// degrade the affected factors to neutral and record a warning.
fn evaluate_ticker(
    ticker: &str,
    date: NaiveDate,
    provider: &dyn MarketData,
    config: &BacktestConfig,
    benchmark_closes: &[f64],
) -> TickerOutcome {
    let bars = match provider.bars(ticker, date) {
        Ok(bars) if !bars.is_empty() => bars,
        Ok(_) => {
            return TickerOutcome::Skipped {
                warning: format!("{ticker}: no price history as of {date}"),
            }
        }
        Err(e) => {
            return TickerOutcome::Skipped {
                warning: format!("{ticker}: {e}"),
            }
        }
    };
    let mut warnings = Vec::new();

    let fundamentals = match provider.fundamentals(ticker, date) {
        Ok(f) => f,
        Err(e) => {
            warnings.push(format!("{ticker}: fundamentals unavailable as of {date}: {e}"));
            FundamentalsSnapshot::new(ticker)
        }
    };
    let events = match provider.smart_money_events(ticker, date) {
        Ok(events) => events,
        Err(e) => {
            warnings.push(format!("{ticker}: smart-money log unavailable as of {date}: {e}"));
            Vec::new()
        }
    };

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();

    let momentum = match momentum_score(&closes, &volumes, None) {
        Ok(score) => score.value,
        Err(e) => {
            warnings.push(format!("{ticker}: momentum degraded: {e}"));
            50.0
        }
    };
    let low_volatility = match low_volatility_score(&closes, benchmark_closes) {
        Ok(score) => score.value,
        Err(e) => {
            warnings.push(format!("{ticker}: low-volatility degraded: {e}"));
            50.0
        }
    };

    let breakdown = FactorBreakdown {
        quality: quality_score(&fundamentals).value,
        value: value_score(&fundamentals).value,
        momentum,
        low_volatility,
        smart_money: smart_money_score(&events, &fundamentals, date, &config.smart_money).value,
    };

    let price = closes[closes.len() - 1];
    let risk = RiskInputs {
        market_cap: fundamentals.market_cap,
        avg_dollar_volume: avg_dollar_volume(&bars),
        price: Some(price),
        debt_to_equity: fundamentals.debt_to_equity(),
        days_to_cover: fundamentals.days_to_cover,
    };

    TickerOutcome::Scored {
        candidate: Candidate {
            ticker: ticker.to_string(),
            breakdown,
            risk,
        },
        price,
        warnings,
    }
}

/// Mean dollar volume over the trailing liquidity window, void bars excluded.
fn avg_dollar_volume(bars: &[PriceBar]) -> Option<f64> {
    let start = bars.len().saturating_sub(LIQUIDITY_WINDOW);
    let recent: Vec<f64> = bars[start..]
        .iter()
        .filter(|b| !b.is_void())
        .map(|b| b.dollar_volume())
        .collect();
    if recent.is_empty() {
        return None;
    }
    Some(recent.iter().sum::<f64>() / recent.len() as f64)
}
