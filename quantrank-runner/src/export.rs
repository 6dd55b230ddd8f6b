//! Result export — JSON, CSV, and Markdown artifact generation.
//!
//! All persisted artifacts carry a `schema_version` field. Versions newer
//! than this build supports are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use quantrank_core::domain::Trade;

use crate::result::{BacktestResult, EquityPoint, SCHEMA_VERSION};

/// Serialize a `BacktestResult` to pretty JSON.
pub fn export_json(result: &BacktestResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize BacktestResult to JSON")
}

/// Deserialize a `BacktestResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<BacktestResult> {
    let result: BacktestResult =
        serde_json::from_str(json).context("failed to deserialize BacktestResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

/// Export the trade log as CSV.
///
/// Open trades emit empty exit columns.
pub fn export_trades_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "ticker",
        "entry_date",
        "entry_price",
        "size_pct",
        "entry_score",
        "exit_date",
        "exit_price",
        "exit_signal",
        "return_pct",
        "holding_days",
    ])?;

    for t in trades {
        wtr.write_record([
            t.ticker.as_str(),
            &t.entry_date.to_string(),
            &format!("{:.6}", t.entry_price),
            &format!("{:.6}", t.size_pct),
            &format!("{:.2}", t.entry_score),
            &t.exit_date.map(|d| d.to_string()).unwrap_or_default(),
            &t.exit_price.map(|p| format!("{p:.6}")).unwrap_or_default(),
            &t.exit_signal
                .map(|s| format!("{s:?}"))
                .unwrap_or_default(),
            &t.return_pct.map(|r| format!("{r:.6}")).unwrap_or_default(),
            &t.holding_days.map(|d| d.to_string()).unwrap_or_default(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export an equity curve as CSV with date and value columns.
pub fn export_equity_csv(curve: &[EquityPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "value"])?;
    for point in curve {
        wtr.write_record([&point.date.to_string(), &format!("{:.2}", point.value)])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Generate a Markdown summary report for a single run.
pub fn generate_report(result: &BacktestResult) -> String {
    let mut md = String::with_capacity(1024);
    let m = &result.metrics;

    md.push_str("# Backtest Report\n\n");

    md.push_str("## Run\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Run ID | {} |\n", result.run_id));
    if let (Some(first), Some(last)) = (result.equity_curve.first(), result.equity_curve.last()) {
        md.push_str(&format!("| Period | {} to {} |\n", first.date, last.date));
    }
    md.push_str(&format!("| Cycles | {} |\n", result.cycles.len()));
    md.push_str(&format!("| Skipped Tickers | {} |\n", result.total_skips()));
    md.push('\n');

    md.push_str("## Performance\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Total Return | {:.2}% |\n", m.total_return * 100.0));
    md.push_str(&format!("| Annual Return | {:.2}% |\n", m.annual_return * 100.0));
    md.push_str(&format!("| Alpha | {:.2}% |\n", m.alpha * 100.0));
    md.push_str(&format!("| Beta | {:.3} |\n", m.beta));
    md.push_str(&format!("| Sharpe | {:.3} |\n", m.sharpe));
    md.push_str(&format!("| Sortino | {:.3} |\n", m.sortino));
    md.push_str(&format!("| Max Drawdown | {:.2}% |\n", m.max_drawdown * 100.0));
    md.push_str(&format!("| Win Rate | {:.1}% |\n", m.win_rate * 100.0));
    md.push_str(&format!("| Turnover | {:.1}x |\n", m.turnover));
    md.push_str(&format!("| Trades | {} |\n", m.trade_count));
    md.push('\n');

    if !result.warnings.is_empty() {
        md.push_str("## Data Quality\n\n");
        for warning in &result.warnings {
            md.push_str(&format!("- {warning}\n"));
        }
        md.push('\n');
    }

    md
}

/// Save the artifact set for one run under `output_dir/{run_id}/`:
/// `manifest.json`, `trades.csv`, `equity.csv`, and `report.md`.
/// Returns the created directory.
pub fn save_artifacts(result: &BacktestResult, output_dir: &Path) -> Result<PathBuf> {
    let run_dir = output_dir.join(&result.run_id);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("manifest.json"), export_json(result)?)?;
    std::fs::write(run_dir.join("trades.csv"), export_trades_csv(&result.trades)?)?;
    std::fs::write(
        run_dir.join("equity.csv"),
        export_equity_csv(&result.equity_curve)?,
    )?;
    std::fs::write(run_dir.join("report.md"), generate_report(result))?;

    Ok(run_dir)
}

/// Load a `BacktestResult` from an artifact directory's manifest.json.
pub fn load_artifacts(dir: &Path) -> Result<BacktestResult> {
    let manifest_path = dir.join("manifest.json");
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}
