//! Score aggregator — cross-sectional composite scoring and ranking.
//!
//! Combines per-ticker factor breakdowns using the regime- and
//! timeframe-conditioned weight vector, spreads an uninformatively clustered
//! distribution, applies the risk overlay, and produces a fully deterministic
//! ranking. Weight application is a required argument: there is no internal
//! default table a caller could silently fall back to.

use serde::{Deserialize, Serialize};

use crate::domain::{CompositeScore, ConvictionLevel, FactorBreakdown, Timeframe};
use crate::regime::{ConfigError, MarketRegime, WeightTable};
use crate::risk::{position_size, KellyParams, RiskFilters, RiskInputs};

/// One ticker's inputs to the aggregator: factor breakdown plus the
/// observations the risk filters inspect. Factor computation already
/// happened; a ticker whose factors failed upstream arrives here with a
/// neutral breakdown rather than being dropped.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub ticker: String,
    pub breakdown: FactorBreakdown,
    pub risk: RiskInputs,
}

/// Aggregator tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreParams {
    /// Minimum cross-sectional standard deviation of composite scores.
    /// Distributions tighter than this are linearly stretched around the
    /// mean so the ranking stays informative.
    pub min_spread: f64,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self { min_spread: 8.0 }
    }
}

/// Output: every candidate scored (filtered names included, flagged), plus
/// the pick list with filtered names removed. Both are sorted by score
/// descending, ties broken by momentum then ticker.
#[derive(Debug, Clone)]
pub struct UniverseScores {
    pub scores: Vec<CompositeScore>,
    pub picks: Vec<CompositeScore>,
}

/// Score a universe snapshot for one timeframe under one regime.
///
/// The weight table is validated up front; an invalid table is a fatal
/// configuration error, not a per-ticker failure.
pub fn score_universe(
    candidates: &[Candidate],
    regime: MarketRegime,
    timeframe: Timeframe,
    weights: &WeightTable,
    filters: &RiskFilters,
    kelly: &KellyParams,
    params: &ScoreParams,
) -> Result<UniverseScores, ConfigError> {
    weights.validate()?;
    let vector = weights.get(timeframe, regime);

    let raw: Vec<f64> = candidates
        .iter()
        .map(|c| vector.apply(&c.breakdown).clamp(0.0, 100.0))
        .collect();
    let spread = spread_scores(&raw, params.min_spread);

    let mut scores: Vec<CompositeScore> = candidates
        .iter()
        .zip(spread.iter())
        .map(|(candidate, &value)| {
            let filter_reason = filters.evaluate(&candidate.risk);
            let filtered = filter_reason.is_some();
            CompositeScore {
                ticker: candidate.ticker.clone(),
                timeframe,
                value,
                breakdown: candidate.breakdown,
                regime_used: regime,
                conviction: ConvictionLevel::from_score(value),
                position_size_pct: if filtered {
                    0.0
                } else {
                    position_size(kelly, value)
                },
                filtered,
                filter_reason,
            }
        })
        .collect();

    scores.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                b.breakdown
                    .momentum
                    .partial_cmp(&a.breakdown.momentum)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then_with(|| a.ticker.cmp(&b.ticker))
    });

    let picks = scores.iter().filter(|s| !s.filtered).cloned().collect();

    Ok(UniverseScores { scores, picks })
}

/// Rank-preserving spread stretch.
///
/// A linear stretch around the cross-sectional mean, applied only when the
/// distribution is tighter than `min_spread`. Linearity preserves order;
/// clamping to [0,100] can merge extremes but never reorders. A degenerate
/// distribution (zero variance) is left alone — every name is genuinely
/// tied.
pub fn spread_scores(raw: &[f64], min_spread: f64) -> Vec<f64> {
    if raw.len() < 2 {
        return raw.to_vec();
    }
    let mean = raw.iter().sum::<f64>() / raw.len() as f64;
    let variance = raw.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / raw.len() as f64;
    let std = variance.sqrt();
    if std < 1e-12 || std >= min_spread {
        return raw.to_vec();
    }
    let factor = min_spread / std;
    raw.iter()
        .map(|v| (mean + (v - mean) * factor).clamp(0.0, 100.0))
        .collect()
}
