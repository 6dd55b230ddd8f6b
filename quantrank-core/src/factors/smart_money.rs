//! Smart-money composite.
//!
//! Three confirmatory signals folded into one 0–100 score:
//! - institutional ownership change quarter over quarter,
//! - insider cluster detection (at least three distinct insiders trading the
//!   same direction inside the lookback window; anything less contributes
//!   nothing),
//! - recency-weighted net flow over the event log (weights 1.0 / 0.5 / 0.25
//!   by age band).

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{blend, scale_linear};
use crate::domain::{
    FactorName, FactorScore, FundamentalsSnapshot, SmartMoneyEvent, TradeDirection,
};

const W_INSTITUTIONAL_QOQ: f64 = 0.40;
const W_INSIDER_CLUSTER: f64 = 0.30;
const W_WEIGHTED_FLOW: f64 = 0.30;

/// Tunables for the smart-money composite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartMoneyParams {
    /// Window for insider cluster detection, in days.
    pub cluster_window_days: i64,
    /// Distinct insiders required to call a cluster.
    pub cluster_min_insiders: usize,
}

impl Default for SmartMoneyParams {
    fn default() -> Self {
        Self {
            cluster_window_days: 90,
            cluster_min_insiders: 3,
        }
    }
}

pub fn smart_money_score(
    events: &[SmartMoneyEvent],
    fundamentals: &FundamentalsSnapshot,
    as_of: NaiveDate,
    params: &SmartMoneyParams,
) -> FactorScore {
    let qoq = fundamentals
        .institutional_qoq_change()
        .map(|chg| scale_linear(chg, -0.05, 0.05));

    let cluster = insider_cluster(events, as_of, params).map(|direction| match direction {
        TradeDirection::Buy => 100.0,
        TradeDirection::Sell => 0.0,
    });

    let flow = recency_weighted_flow(events, as_of).map(|f| scale_linear(f, -1.0, 1.0));

    let value = blend(&[
        (qoq, W_INSTITUTIONAL_QOQ),
        (cluster, W_INSIDER_CLUSTER),
        (flow, W_WEIGHTED_FLOW),
    ]);
    FactorScore::new(FactorName::SmartMoney, value)
}

/// Detect an insider cluster: ≥ `cluster_min_insiders` distinct named
/// insiders trading the same direction within the window. Buys win a tie.
fn insider_cluster(
    events: &[SmartMoneyEvent],
    as_of: NaiveDate,
    params: &SmartMoneyParams,
) -> Option<TradeDirection> {
    let mut buyers: HashSet<&str> = HashSet::new();
    let mut sellers: HashSet<&str> = HashSet::new();

    for event in events {
        let age = (as_of - event.effective_date).num_days();
        if age < 0 || age > params.cluster_window_days {
            continue;
        }
        let Some(name) = event.insider_name.as_deref() else {
            continue;
        };
        match event.direction {
            TradeDirection::Buy => buyers.insert(name),
            TradeDirection::Sell => sellers.insert(name),
        };
    }

    if buyers.len() >= params.cluster_min_insiders {
        Some(TradeDirection::Buy)
    } else if sellers.len() >= params.cluster_min_insiders {
        Some(TradeDirection::Sell)
    } else {
        None
    }
}

/// Net signed notional over gross notional, both recency weighted. Lands in
/// [-1, 1]; None when no event carries weight.
fn recency_weighted_flow(events: &[SmartMoneyEvent], as_of: NaiveDate) -> Option<f64> {
    let mut net = 0.0;
    let mut gross = 0.0;
    for event in events {
        let weight = event.recency_weight(as_of);
        if weight == 0.0 {
            continue;
        }
        net += event.signed_amount() * weight;
        gross += event.amount.abs() * weight;
    }
    if gross <= 0.0 {
        return None;
    }
    Some(net / gross)
}
