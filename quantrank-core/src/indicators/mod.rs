//! Technical indicator library.
//!
//! Pure functions over price series. The contract shared by every indicator:
//!
//! - Output is a `Vec<f64>` aligned 1:1 with the input; index 0 is the
//!   earliest observation.
//! - `f64::NAN` is the "undefined" sentinel for positions where the lookback
//!   is not yet satisfied: the first `period - 1` entries for window
//!   indicators, the first `period` entries for Wilder-smoothed ones.
//! - Empty input returns an empty output.
//! - Multi-series indicators validate that the aligned series have equal
//!   lengths and fail fast with `IndicatorError::LengthMismatch` otherwise.
//!   Insufficient history is never an error, only NaN.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod pivots;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stats;
pub mod stochastic;
pub mod vwap;
pub mod williams_r;

pub use adx::{adx, AdxSeries};
pub use atr::{atr, true_range, wilder_smooth};
pub use bollinger::{bollinger, BollingerSeries};
pub use cci::cci;
pub use ema::ema;
pub use macd::{macd, MacdSeries};
pub use obv::obv;
pub use pivots::{camarilla_pivots, fibonacci_pivots, standard_pivots, PivotLevels};
pub use roc::roc;
pub use rsi::rsi;
pub use sma::sma;
pub use stochastic::{stochastic, StochasticSeries};
pub use vwap::{anchored_vwap, vwap};
pub use williams_r::williams_r;

use thiserror::Error;

/// Input validation failures. Insufficient history is not an error; it shows
/// up as NaN in the output instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("aligned series length mismatch: {series} has {got} entries, expected {expected}")]
    LengthMismatch {
        series: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("period must be >= 1")]
    ZeroPeriod,
}

/// Validate that a companion series matches the reference length.
pub(crate) fn check_len(
    series: &'static str,
    len: usize,
    expected: usize,
) -> Result<(), IndicatorError> {
    if len != expected {
        return Err(IndicatorError::LengthMismatch {
            series,
            expected,
            got: len,
        });
    }
    Ok(())
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
