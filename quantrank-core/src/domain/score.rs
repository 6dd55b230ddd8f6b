//! Score types — factor scores, conviction bands, and the composite output.

use serde::{Deserialize, Serialize};

use crate::regime::MarketRegime;
use crate::risk::FilterReason;

/// Holding horizon a composite score targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Timeframe {
    /// Weeks.
    Short,
    /// Months.
    Medium,
    /// A year or more.
    Long,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Short, Timeframe::Medium, Timeframe::Long];
}

/// The five factors the aggregator combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactorName {
    Quality,
    Value,
    Momentum,
    LowVolatility,
    SmartMoney,
}

/// A single factor's normalized output for one ticker.
///
/// Values are always within [0,100]; 50 is the neutral default when the
/// factor's inputs are structurally missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub name: FactorName,
    pub value: f64,
}

impl FactorScore {
    pub fn new(name: FactorName, value: f64) -> Self {
        Self {
            name,
            value: value.clamp(0.0, 100.0),
        }
    }

    /// Neutral score used when a factor cannot be computed.
    pub fn neutral(name: FactorName) -> Self {
        Self { name, value: 50.0 }
    }
}

/// Per-factor breakdown carried on every composite score for transparency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub quality: f64,
    pub value: f64,
    pub momentum: f64,
    pub low_volatility: f64,
    pub smart_money: f64,
}

impl FactorBreakdown {
    pub fn get(&self, name: FactorName) -> f64 {
        match name {
            FactorName::Quality => self.quality,
            FactorName::Value => self.value,
            FactorName::Momentum => self.momentum,
            FactorName::LowVolatility => self.low_volatility,
            FactorName::SmartMoney => self.smart_money,
        }
    }

    /// All five components neutral.
    pub fn neutral() -> Self {
        Self {
            quality: 50.0,
            value: 50.0,
            momentum: 50.0,
            low_volatility: 50.0,
            smart_money: 50.0,
        }
    }
}

/// Conviction band derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConvictionLevel {
    Avoid,
    Hold,
    Buy,
    StrongBuy,
}

impl ConvictionLevel {
    /// Band boundaries: [0,40) Avoid, [40,60) Hold, [60,80) Buy,
    /// [80,100] StrongBuy.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ConvictionLevel::StrongBuy
        } else if score >= 60.0 {
            ConvictionLevel::Buy
        } else if score >= 40.0 {
            ConvictionLevel::Hold
        } else {
            ConvictionLevel::Avoid
        }
    }
}

/// Final output of the score aggregator for one ticker and one timeframe.
///
/// Filtered candidates still receive a score so the report can show why a
/// name was excluded; they never enter the pick list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub ticker: String,
    pub timeframe: Timeframe,
    pub value: f64,
    pub breakdown: FactorBreakdown,
    pub regime_used: MarketRegime,
    pub conviction: ConvictionLevel,
    /// Suggested position size as a fraction of capital, already clamped by
    /// the risk overlay. Zero for filtered candidates.
    pub position_size_pct: f64,
    pub filtered: bool,
    pub filter_reason: Option<FilterReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_score_clamps_to_range() {
        assert_eq!(FactorScore::new(FactorName::Quality, 130.0).value, 100.0);
        assert_eq!(FactorScore::new(FactorName::Quality, -5.0).value, 0.0);
    }

    #[test]
    fn conviction_bands() {
        assert_eq!(ConvictionLevel::from_score(95.0), ConvictionLevel::StrongBuy);
        assert_eq!(ConvictionLevel::from_score(80.0), ConvictionLevel::StrongBuy);
        assert_eq!(ConvictionLevel::from_score(70.0), ConvictionLevel::Buy);
        assert_eq!(ConvictionLevel::from_score(50.0), ConvictionLevel::Hold);
        assert_eq!(ConvictionLevel::from_score(10.0), ConvictionLevel::Avoid);
    }

    #[test]
    fn conviction_levels_are_ordered() {
        assert!(ConvictionLevel::StrongBuy > ConvictionLevel::Buy);
        assert!(ConvictionLevel::Buy > ConvictionLevel::Hold);
        assert!(ConvictionLevel::Hold > ConvictionLevel::Avoid);
    }

    #[test]
    fn composite_score_roundtrip() {
        let score = CompositeScore {
            ticker: "ACME".into(),
            timeframe: Timeframe::Medium,
            value: 72.5,
            breakdown: FactorBreakdown {
                quality: 80.0,
                value: 65.0,
                momentum: 75.0,
                low_volatility: 60.0,
                smart_money: 70.0,
            },
            regime_used: MarketRegime::Bull,
            conviction: ConvictionLevel::Buy,
            position_size_pct: 0.04,
            filtered: false,
            filter_reason: None,
        };
        let json = serde_json::to_string(&score).unwrap();
        let deser: CompositeScore = serde_json::from_str(&json).unwrap();
        assert_eq!(score, deser);
    }
}
