//! Property tests for indicator bounds, sizing monotonicity, and the
//! spread transform.

use proptest::prelude::*;

use quantrank_core::indicators::{adx, bollinger, rsi, stochastic};
use quantrank_core::regime::WeightTable;
use quantrank_core::risk::{position_size, KellyParams};
use quantrank_core::scoring::spread_scores;

fn close_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(10.0f64..500.0, 20..120)
}

proptest! {
    #[test]
    fn rsi_stays_in_bounds(closes in close_series()) {
        let result = rsi(&closes, 14).unwrap();
        for v in result.iter().filter(|v| !v.is_nan()) {
            prop_assert!((0.0..=100.0).contains(v), "RSI out of bounds: {v}");
        }
    }

    #[test]
    fn stochastic_stays_in_bounds(closes in close_series()) {
        let high: Vec<f64> = closes.iter().map(|c| c + 1.5).collect();
        let low: Vec<f64> = closes.iter().map(|c| c - 1.5).collect();
        let result = stochastic(&high, &low, &closes, 14, 3).unwrap();
        for v in result.k.iter().chain(result.d.iter()).filter(|v| !v.is_nan()) {
            prop_assert!((0.0..=100.0).contains(v), "%K/%D out of bounds: {v}");
        }
    }

    #[test]
    fn adx_stays_in_bounds(closes in close_series()) {
        let high: Vec<f64> = closes.iter().map(|c| c + 2.0).collect();
        let low: Vec<f64> = closes.iter().map(|c| c - 2.0).collect();
        let result = adx(&high, &low, &closes, 14).unwrap();
        for series in [&result.adx, &result.plus_di, &result.minus_di] {
            for v in series.iter().filter(|v| !v.is_nan()) {
                prop_assert!((0.0..=100.0).contains(v), "ADX/DI out of bounds: {v}");
            }
        }
    }

    #[test]
    fn bollinger_bands_stay_ordered(closes in close_series()) {
        let bands = bollinger(&closes, 20, 2.0).unwrap();
        for i in 0..closes.len() {
            if !bands.middle[i].is_nan() {
                prop_assert!(bands.upper[i] >= bands.middle[i]);
                prop_assert!(bands.middle[i] >= bands.lower[i]);
            }
        }
    }

    #[test]
    fn kelly_size_is_monotonic_and_clamped(
        win_rate in 0.05f64..0.95,
        ratio in 0.2f64..5.0,
        a in 0.0f64..100.0,
        b in 0.0f64..100.0,
    ) {
        let params = KellyParams {
            win_rate,
            avg_win_loss_ratio: ratio,
            ..KellyParams::default()
        };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let size_lo = position_size(&params, lo);
        let size_hi = position_size(&params, hi);
        prop_assert!(size_hi >= size_lo, "size not monotonic: {size_hi} < {size_lo}");
        for size in [size_lo, size_hi] {
            prop_assert!(size >= params.min_size_pct);
            prop_assert!(size <= params.max_size_pct);
        }
    }

    #[test]
    fn spread_transform_preserves_rank(
        raw in prop::collection::vec(0.0f64..100.0, 2..40),
        min_spread in 1.0f64..15.0,
    ) {
        let spread = spread_scores(&raw, min_spread);
        prop_assert_eq!(spread.len(), raw.len());
        for i in 0..raw.len() {
            prop_assert!((0.0..=100.0).contains(&spread[i]));
            for j in 0..raw.len() {
                if raw[i] < raw[j] {
                    prop_assert!(
                        spread[i] <= spread[j],
                        "rank inverted: raw {} < {} but spread {} > {}",
                        raw[i], raw[j], spread[i], spread[j]
                    );
                }
            }
        }
    }
}

#[test]
fn default_weight_table_cells_sum_to_one() {
    use quantrank_core::domain::Timeframe;
    use quantrank_core::regime::MarketRegime;

    let table = WeightTable::default();
    table.validate().unwrap();
    for timeframe in Timeframe::ALL {
        for regime in MarketRegime::ALL {
            let sum = table.get(timeframe, regime).sum();
            assert!((sum - 1.0).abs() <= 1e-9, "{timeframe:?}/{regime:?}: {sum}");
        }
    }
}
