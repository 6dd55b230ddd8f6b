//! Momentum factor.
//!
//! Core signal is the classic 12-minus-1-month return: trailing twelve
//! months excluding the most recent month, which is dominated by short-term
//! reversal. Blended with a volume-weighted momentum reading and an optional
//! analyst estimate-revision signal.

use super::{blend, scale_linear};
use crate::domain::{FactorName, FactorScore};
use crate::indicators::{check_len, IndicatorError};

/// Trading days in the momentum lookback (≈12 months).
const LOOKBACK: usize = 252;
/// Trading days skipped at the end (≈1 month of reversal noise).
const SKIP: usize = 21;
/// Window for the volume-weighted component (≈6 months).
const VOLUME_WINDOW: usize = 126;

const W_TWELVE_MINUS_ONE: f64 = 0.60;
const W_VOLUME_WEIGHTED: f64 = 0.30;
const W_ESTIMATE_REVISION: f64 = 0.10;

/// Score price momentum from aligned close and volume series (oldest first).
///
/// `estimate_revision` is the fractional change in consensus estimates, when
/// an estimates provider is wired up; pass None otherwise.
pub fn momentum_score(
    closes: &[f64],
    volumes: &[f64],
    estimate_revision: Option<f64>,
) -> Result<FactorScore, IndicatorError> {
    check_len("volume", volumes.len(), closes.len())?;

    let twelve_minus_one =
        twelve_minus_one_return(closes).map(|r| scale_linear(r, -0.30, 0.50));
    let volume_weighted =
        volume_weighted_momentum(closes, volumes).map(|r| scale_linear(r, -0.002, 0.002));
    let revision = estimate_revision.map(|r| scale_linear(r, -0.20, 0.20));

    let value = blend(&[
        (twelve_minus_one, W_TWELVE_MINUS_ONE),
        (volume_weighted, W_VOLUME_WEIGHTED),
        (revision, W_ESTIMATE_REVISION),
    ]);
    Ok(FactorScore::new(FactorName::Momentum, value))
}

/// Return over [t-252, t-21]. None without a full year of history.
fn twelve_minus_one_return(closes: &[f64]) -> Option<f64> {
    let n = closes.len();
    if n < LOOKBACK + 1 {
        return None;
    }
    let base = closes[n - 1 - LOOKBACK];
    let recent = closes[n - 1 - SKIP];
    if base <= 0.0 || base.is_nan() || recent.is_nan() {
        return None;
    }
    Some(recent / base - 1.0)
}

/// Mean of daily returns weighted by relative volume over the trailing
/// window. Heavy-volume up days count more than drifting ones.
fn volume_weighted_momentum(closes: &[f64], volumes: &[f64]) -> Option<f64> {
    let n = closes.len();
    if n < VOLUME_WINDOW + 1 {
        return None;
    }
    let window_closes = &closes[n - VOLUME_WINDOW - 1..];
    let window_volumes = &volumes[n - VOLUME_WINDOW..];

    let avg_volume = window_volumes.iter().filter(|v| !v.is_nan()).sum::<f64>()
        / window_volumes.iter().filter(|v| !v.is_nan()).count().max(1) as f64;
    if avg_volume <= 0.0 {
        return None;
    }

    let mut sum = 0.0;
    let mut count = 0usize;
    for i in 1..window_closes.len() {
        let prev = window_closes[i - 1];
        let curr = window_closes[i];
        let vol = window_volumes[i - 1];
        if prev <= 0.0 || prev.is_nan() || curr.is_nan() || vol.is_nan() {
            continue;
        }
        sum += (curr / prev - 1.0) * (vol / avg_volume);
        count += 1;
    }
    if count < 2 {
        return None;
    }
    Some(sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trending(n: usize, daily: f64) -> Vec<f64> {
        let mut closes = vec![100.0];
        for _ in 1..n {
            let last = *closes.last().unwrap();
            closes.push(last * (1.0 + daily));
        }
        closes
    }

    #[test]
    fn uptrend_outranks_downtrend() {
        let up = trending(300, 0.001);
        let down = trending(300, -0.001);
        let volumes = vec![1_000_000.0; 300];
        let u = momentum_score(&up, &volumes, None).unwrap();
        let d = momentum_score(&down, &volumes, None).unwrap();
        assert!(u.value > d.value);
        assert!(u.value > 60.0);
        assert!(d.value < 40.0);
    }

    #[test]
    fn insufficient_history_is_neutral() {
        let closes = trending(60, 0.002);
        let volumes = vec![1_000_000.0; 60];
        let score = momentum_score(&closes, &volumes, None).unwrap();
        assert_eq!(score.value, 50.0);
    }

    #[test]
    fn twelve_minus_one_excludes_recent_month() {
        // Flat year, then a violent final month. The skip window means the
        // rally must not lift the 12-1 component.
        let mut closes = vec![100.0; 260];
        for i in 239..260 {
            closes[i] = 100.0 + (i - 238) as f64 * 3.0;
        }
        let r = twelve_minus_one_return(&closes).unwrap();
        assert!(
            r.abs() < 1e-9,
            "recent-month rally leaked into 12-1 momentum: {r}"
        );
    }

    #[test]
    fn estimate_revision_shifts_score() {
        let closes = trending(300, 0.0005);
        let volumes = vec![1_000_000.0; 300];
        let base = momentum_score(&closes, &volumes, None).unwrap();
        let upgraded = momentum_score(&closes, &volumes, Some(0.20)).unwrap();
        let downgraded = momentum_score(&closes, &volumes, Some(-0.20)).unwrap();
        assert!(upgraded.value > base.value);
        assert!(downgraded.value < base.value);
    }

    #[test]
    fn length_mismatch_is_error() {
        assert!(momentum_score(&[1.0, 2.0], &[100.0], None).is_err());
    }

    #[test]
    fn score_in_bounds() {
        let closes = trending(300, 0.004);
        let volumes = vec![1_000_000.0; 300];
        let v = momentum_score(&closes, &volumes, Some(1.0)).unwrap().value;
        assert!((0.0..=100.0).contains(&v));
    }
}
