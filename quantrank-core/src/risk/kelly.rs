//! Fractional-Kelly position sizing.
//!
//! Full Kelly: f* = w − (1 − w) / r, with win rate w and average win/loss
//! ratio r. Full Kelly is famously too aggressive for estimated inputs, so
//! the overlay scales it down (quarter-Kelly by default), then by the
//! candidate's conviction, and finally clamps into [min, max].

use serde::{Deserialize, Serialize};

/// Sizing parameters. Win rate and ratio come from the strategy's estimated
/// historical edge, not from the candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KellyParams {
    /// Estimated win rate, in (0,1).
    pub win_rate: f64,
    /// Average win divided by average loss.
    pub avg_win_loss_ratio: f64,
    /// Kelly fraction; 0.25 is quarter-Kelly.
    pub fraction: f64,
    /// Per-position floor, fraction of capital.
    pub min_size_pct: f64,
    /// Per-position ceiling, fraction of capital.
    pub max_size_pct: f64,
}

impl Default for KellyParams {
    fn default() -> Self {
        Self {
            win_rate: 0.55,
            avg_win_loss_ratio: 1.6,
            fraction: 0.25,
            min_size_pct: 0.01,
            max_size_pct: 0.08,
        }
    }
}

/// Position size as a fraction of capital for a candidate with the given
/// conviction score (0–100).
///
/// Monotonic: higher conviction never yields a smaller size. A non-positive
/// Kelly estimate (no edge) sizes at the floor.
pub fn position_size(params: &KellyParams, conviction: f64) -> f64 {
    let conviction = conviction.clamp(0.0, 100.0);
    if params.avg_win_loss_ratio <= 0.0 {
        return params.min_size_pct;
    }
    let kelly = params.win_rate - (1.0 - params.win_rate) / params.avg_win_loss_ratio;
    if kelly <= 0.0 {
        return params.min_size_pct;
    }
    let scaled = kelly * params.fraction * (conviction / 100.0);
    scaled.clamp(params.min_size_pct, params.max_size_pct)
}
