//! SmartMoneyEvent — institutional, insider, and congressional trade records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Source of a smart-money observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SmartMoneyKind {
    /// Quarterly 13F institutional holdings change.
    ThirteenF,
    /// Form 4 insider transaction.
    Insider,
    /// Congressional trading disclosure.
    Congress,
}

/// Trade direction as disclosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    Buy,
    Sell,
}

/// One entry in the append-only smart-money event log for a ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartMoneyEvent {
    pub ticker: String,
    pub kind: SmartMoneyKind,
    pub direction: TradeDirection,
    /// Notional dollar amount of the transaction.
    pub amount: f64,
    /// Reporting person, where disclosed. Cluster detection keys on this.
    pub insider_name: Option<String>,
    pub effective_date: NaiveDate,
}

impl SmartMoneyEvent {
    /// Recency weight relative to `as_of`: 1.0 inside 30 days, 0.5 inside
    /// 60 days, 0.25 beyond. Events dated after `as_of` carry no weight.
    pub fn recency_weight(&self, as_of: NaiveDate) -> f64 {
        let age = (as_of - self.effective_date).num_days();
        if age < 0 {
            0.0
        } else if age < 30 {
            1.0
        } else if age < 60 {
            0.5
        } else {
            0.25
        }
    }

    /// Signed notional: positive for buys, negative for sells.
    pub fn signed_amount(&self) -> f64 {
        match self.direction {
            TradeDirection::Buy => self.amount,
            TradeDirection::Sell => -self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(days_ago: i64, direction: TradeDirection) -> SmartMoneyEvent {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        SmartMoneyEvent {
            ticker: "ACME".into(),
            kind: SmartMoneyKind::Insider,
            direction,
            amount: 10_000.0,
            insider_name: Some("J. Doe".into()),
            effective_date: as_of - chrono::Duration::days(days_ago),
        }
    }

    #[test]
    fn recency_weight_bands() {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(event(10, TradeDirection::Buy).recency_weight(as_of), 1.0);
        assert_eq!(event(45, TradeDirection::Buy).recency_weight(as_of), 0.5);
        assert_eq!(event(90, TradeDirection::Buy).recency_weight(as_of), 0.25);
    }

    #[test]
    fn future_event_carries_no_weight() {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(event(-5, TradeDirection::Buy).recency_weight(as_of), 0.0);
    }

    #[test]
    fn signed_amount() {
        assert_eq!(event(1, TradeDirection::Buy).signed_amount(), 10_000.0);
        assert_eq!(event(1, TradeDirection::Sell).signed_amount(), -10_000.0);
    }

    #[test]
    fn event_serialization_roundtrip() {
        let e = event(10, TradeDirection::Sell);
        let json = serde_json::to_string(&e).unwrap();
        let deser: SmartMoneyEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(e.ticker, deser.ticker);
        assert_eq!(e.kind, deser.kind);
        assert_eq!(e.direction, deser.direction);
        assert_eq!(e.effective_date, deser.effective_date);
    }
}
