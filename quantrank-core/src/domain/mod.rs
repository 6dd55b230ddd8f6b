//! Domain types for the scoring and backtesting core.

pub mod bar;
pub mod fundamentals;
pub mod score;
pub mod smart_money;
pub mod trade;

pub use bar::PriceBar;
pub use fundamentals::FundamentalsSnapshot;
pub use score::{
    CompositeScore, ConvictionLevel, FactorBreakdown, FactorName, FactorScore, Timeframe,
};
pub use smart_money::{SmartMoneyEvent, SmartMoneyKind, TradeDirection};
pub use trade::{ExitSignal, Trade};

/// Ticker symbol alias.
pub type Ticker = String;
