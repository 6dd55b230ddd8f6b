//! QuantRank Core — multi-factor equity scoring.
//!
//! The algorithmic heart of the dashboard:
//! - Domain types (bars, fundamentals, smart-money events, scores, trades)
//! - Technical indicator library over raw price series
//! - Factor models (quality, value, momentum, low-volatility, smart-money)
//! - Regime classifier with regime-conditioned factor weights
//! - Risk overlay (hard filters + fractional-Kelly sizing)
//! - Cross-sectional score aggregator
//!
//! Everything here is pure and deterministic; the only I/O seam is the
//! `provider::MarketData` port the adapters implement.

pub mod domain;
pub mod factors;
pub mod indicators;
pub mod provider;
pub mod regime;
pub mod risk;
pub mod scoring;
