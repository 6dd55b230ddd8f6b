//! Performance metrics computed from an equity curve and trade log.
//!
//! Every metric is a pure function: series and/or trade list in, scalar out.
//! No dependencies on the engine or the data port. Annualization uses the
//! observation frequency of the equity curve (`periods_per_year`), which the
//! engine derives from the rebalance cadence.

use serde::{Deserialize, Serialize};

use quantrank_core::domain::Trade;

/// Aggregate performance statistics for a single backtest run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub annual_return: f64,
    /// Annualized excess return over the benchmark after removing the beta
    /// component.
    pub alpha: f64,
    /// Sensitivity of portfolio returns to benchmark returns.
    pub beta: f64,
    pub sharpe: f64,
    pub sortino: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    /// Fraction of the portfolio traded per year (entries plus exits).
    pub turnover: f64,
    pub trade_count: usize,
}

impl PerformanceMetrics {
    /// Compute all metrics. `equity` and `benchmark` must be aligned on the
    /// same observation dates.
    pub fn compute(
        equity: &[f64],
        benchmark: &[f64],
        trades: &[Trade],
        periods_per_year: f64,
    ) -> Self {
        let strat_returns = periodic_returns(equity);
        let bench_returns = periodic_returns(benchmark);
        let (alpha, beta) = alpha_beta(&strat_returns, &bench_returns, periods_per_year);
        Self {
            total_return: total_return(equity),
            annual_return: annual_return(equity, periods_per_year),
            alpha,
            beta,
            sharpe: sharpe_ratio(&strat_returns, periods_per_year),
            sortino: sortino_ratio(&strat_returns, periods_per_year),
            max_drawdown: max_drawdown(equity),
            win_rate: win_rate(trades),
            turnover: turnover(trades, equity.len(), periods_per_year),
            trade_count: trades.len(),
        }
    }
}

/// Total return as a fraction: (final - initial) / initial.
pub fn total_return(equity: &[f64]) -> f64 {
    if equity.len() < 2 {
        return 0.0;
    }
    let initial = equity[0];
    let final_eq = equity[equity.len() - 1];
    if initial <= 0.0 {
        return 0.0;
    }
    (final_eq - initial) / initial
}

/// Compound annual growth rate. Returns 0.0 for short or degenerate curves.
pub fn annual_return(equity: &[f64], periods_per_year: f64) -> f64 {
    if equity.len() < 2 || periods_per_year <= 0.0 {
        return 0.0;
    }
    let initial = equity[0];
    let final_eq = equity[equity.len() - 1];
    if initial <= 0.0 || final_eq <= 0.0 {
        return 0.0;
    }
    let years = (equity.len() - 1) as f64 / periods_per_year;
    if years <= 0.0 {
        return 0.0;
    }
    (final_eq / initial).powf(1.0 / years) - 1.0
}

/// Annualized Sharpe ratio over periodic returns, zero risk-free rate.
/// Returns 0.0 when variance is zero or fewer than two observations.
pub fn sharpe_ratio(returns: &[f64], periods_per_year: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(returns);
    let std = std_dev(returns);
    if std < 1e-15 {
        return 0.0;
    }
    (mean / std) * periods_per_year.sqrt()
}

/// Annualized Sortino ratio (downside deviation only). Returns 0.0 when
/// there is no downside.
pub fn sortino_ratio(returns: &[f64], periods_per_year: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(returns);
    let downside_sq: Vec<f64> = returns.iter().filter(|&&r| r < 0.0).map(|r| r * r).collect();
    if downside_sq.is_empty() {
        return 0.0;
    }
    let downside_std = (downside_sq.iter().sum::<f64>() / returns.len() as f64).sqrt();
    if downside_std < 1e-15 {
        return 0.0;
    }
    (mean / downside_std) * periods_per_year.sqrt()
}

/// Maximum drawdown as a negative fraction (-0.15 = 15% drawdown).
pub fn max_drawdown(equity: &[f64]) -> f64 {
    if equity.len() < 2 {
        return 0.0;
    }
    let mut peak = equity[0];
    let mut max_dd = 0.0_f64;
    for &eq in equity {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (eq - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Regression of portfolio returns on benchmark returns over the aligned
/// prefix. Beta is cov/var; alpha is the annualized intercept. Falls back to
/// (0, 0) when the benchmark has no variance or too few observations.
pub fn alpha_beta(
    strat_returns: &[f64],
    bench_returns: &[f64],
    periods_per_year: f64,
) -> (f64, f64) {
    let n = strat_returns.len().min(bench_returns.len());
    if n < 2 {
        return (0.0, 0.0);
    }
    let strat = &strat_returns[..n];
    let bench = &bench_returns[..n];
    let strat_mean = mean_f64(strat);
    let bench_mean = mean_f64(bench);

    let mut cov = 0.0;
    let mut var = 0.0;
    for i in 0..n {
        cov += (strat[i] - strat_mean) * (bench[i] - bench_mean);
        var += (bench[i] - bench_mean).powi(2);
    }
    if var < 1e-15 {
        return (0.0, 0.0);
    }
    let beta = cov / var;
    let alpha = (strat_mean - beta * bench_mean) * periods_per_year;
    (alpha, beta)
}

/// Fraction of closed trades with a positive return.
pub fn win_rate(trades: &[Trade]) -> f64 {
    let closed: Vec<&Trade> = trades.iter().filter(|t| !t.is_open()).collect();
    if closed.is_empty() {
        return 0.0;
    }
    let winners = closed.iter().filter(|t| t.is_winner()).count();
    winners as f64 / closed.len() as f64
}

/// Annual turnover: entry plus exit notional as a fraction of equity, per
/// year. Trades record size as a fraction of equity, so notional cancels.
pub fn turnover(trades: &[Trade], periods: usize, periods_per_year: f64) -> f64 {
    if trades.is_empty() || periods < 2 || periods_per_year <= 0.0 {
        return 0.0;
    }
    let traded: f64 = trades.iter().map(|t| 2.0 * t.size_pct).sum();
    let years = (periods - 1) as f64 / periods_per_year;
    if years <= 0.0 {
        return 0.0;
    }
    traded / years
}

/// Simple period-over-period returns of a value series.
pub fn periodic_returns(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return Vec::new();
    }
    values
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quantrank_core::domain::ExitSignal;

    const WEEKLY: f64 = 52.0;

    fn make_trade(return_pct: f64) -> Trade {
        let entry = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let exit = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        let mut t = Trade::open("SPY", entry, 100.0, 0.05, 70.0);
        t.close(exit, 100.0 * (1.0 + return_pct), ExitSignal::RankDropped);
        t
    }

    #[test]
    fn total_return_known() {
        let eq = vec![100_000.0, 100_500.0, 110_000.0];
        assert!((total_return(&eq) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn total_return_degenerate() {
        assert_eq!(total_return(&[100_000.0]), 0.0);
        assert_eq!(total_return(&[]), 0.0);
    }

    #[test]
    fn annual_return_one_year_weekly() {
        // 53 weekly points spanning one year, 10% total gain.
        let mut eq = vec![100_000.0];
        let per_period = (1.1_f64).powf(1.0 / 52.0);
        for i in 1..53 {
            eq.push(eq[i - 1] * per_period);
        }
        let a = annual_return(&eq, WEEKLY);
        assert!((a - 0.1).abs() < 1e-6, "expected ~10%, got {a}");
    }

    #[test]
    fn sharpe_zero_variance_is_zero() {
        let returns = vec![0.001; 50];
        assert_eq!(sharpe_ratio(&returns, WEEKLY), 0.0);
    }

    #[test]
    fn sharpe_positive_for_positive_returns() {
        let returns: Vec<f64> = (0..52).map(|i| if i % 2 == 0 { 0.004 } else { 0.001 }).collect();
        assert!(sharpe_ratio(&returns, WEEKLY) > 0.0);
    }

    #[test]
    fn sortino_no_downside_is_zero() {
        let returns = vec![0.002, 0.001, 0.003];
        assert_eq!(sortino_ratio(&returns, WEEKLY), 0.0);
    }

    #[test]
    fn sortino_with_downside_positive_for_uptrend() {
        let returns = vec![0.01, -0.002, 0.008, -0.001, 0.012];
        assert!(sortino_ratio(&returns, WEEKLY) > 0.0);
    }

    #[test]
    fn max_drawdown_known() {
        let eq = vec![100_000.0, 110_000.0, 90_000.0, 95_000.0];
        let expected = (90_000.0 - 110_000.0) / 110_000.0;
        assert!((max_drawdown(&eq) - expected).abs() < 1e-10);
    }

    #[test]
    fn max_drawdown_monotonic_is_zero() {
        let eq: Vec<f64> = (0..100).map(|i| 100_000.0 + i as f64 * 100.0).collect();
        assert_eq!(max_drawdown(&eq), 0.0);
    }

    #[test]
    fn beta_of_identical_series_is_one() {
        let bench = vec![0.01, -0.02, 0.015, 0.003, -0.008];
        let (alpha, beta) = alpha_beta(&bench, &bench, WEEKLY);
        assert!((beta - 1.0).abs() < 1e-12);
        assert!(alpha.abs() < 1e-12);
    }

    #[test]
    fn beta_scales_with_leverage() {
        let bench = vec![0.01, -0.02, 0.015, 0.003, -0.008];
        let levered: Vec<f64> = bench.iter().map(|r| r * 2.0).collect();
        let (_, beta) = alpha_beta(&levered, &bench, WEEKLY);
        assert!((beta - 2.0).abs() < 1e-12);
    }

    #[test]
    fn constant_outperformance_shows_up_as_alpha() {
        let bench = vec![0.01, -0.02, 0.015, 0.003, -0.008];
        let strat: Vec<f64> = bench.iter().map(|r| r + 0.001).collect();
        let (alpha, beta) = alpha_beta(&strat, &bench, WEEKLY);
        assert!((beta - 1.0).abs() < 1e-12);
        assert!((alpha - 0.001 * WEEKLY).abs() < 1e-9);
    }

    #[test]
    fn flat_benchmark_gives_zero_alpha_beta() {
        let bench = vec![0.0; 10];
        let strat = vec![0.01; 10];
        assert_eq!(alpha_beta(&strat, &bench, WEEKLY), (0.0, 0.0));
    }

    #[test]
    fn win_rate_ignores_open_trades() {
        let entry = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let trades = vec![
            make_trade(0.05),
            make_trade(-0.02),
            Trade::open("MSFT", entry, 300.0, 0.05, 65.0),
        ];
        assert!((win_rate(&trades) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn win_rate_empty() {
        assert_eq!(win_rate(&[]), 0.0);
    }

    #[test]
    fn turnover_scales_with_trade_count() {
        // 53 weekly points = one year; each trade is 5% in, 5% out.
        let few = vec![make_trade(0.01); 2];
        let many = vec![make_trade(0.01); 10];
        let t_few = turnover(&few, 53, WEEKLY);
        let t_many = turnover(&many, 53, WEEKLY);
        assert!((t_few - 0.2).abs() < 1e-9);
        assert!((t_many - 1.0).abs() < 1e-9);
    }

    #[test]
    fn compute_all_metrics_are_finite() {
        let mut eq = vec![100_000.0];
        let mut bench = vec![100_000.0];
        for i in 1..53 {
            let r = if i % 3 == 0 { 0.997 } else { 1.004 };
            eq.push(eq[i - 1] * r);
            bench.push(bench[i - 1] * 1.001);
        }
        let trades = vec![make_trade(0.05), make_trade(-0.02), make_trade(0.03)];
        let m = PerformanceMetrics::compute(&eq, &bench, &trades, WEEKLY);
        assert_eq!(m.trade_count, 3);
        assert!((m.win_rate - 2.0 / 3.0).abs() < 1e-10);
        for v in [
            m.total_return,
            m.annual_return,
            m.alpha,
            m.beta,
            m.sharpe,
            m.sortino,
            m.max_drawdown,
            m.turnover,
        ] {
            assert!(v.is_finite());
        }
    }
}
