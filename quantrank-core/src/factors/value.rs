//! Value factor.
//!
//! Blend of earnings yield, book-to-market, and free-cash-flow yield.
//! Negative earnings score the earnings-yield component as 0 — cheapness on
//! losses is not cheapness — rather than dropping it or erroring.

use super::{blend, scale_linear};
use crate::domain::{FactorName, FactorScore, FundamentalsSnapshot};

const W_EARNINGS_YIELD: f64 = 0.40;
const W_BOOK_TO_MARKET: f64 = 0.30;
const W_FCF_YIELD: f64 = 0.30;

pub fn value_score(fundamentals: &FundamentalsSnapshot) -> FactorScore {
    let earnings_yield = fundamentals.earnings_yield().map(|ey| {
        if ey < 0.0 {
            0.0
        } else {
            scale_linear(ey, 0.0, 0.12)
        }
    });

    let book_to_market = fundamentals
        .book_to_market()
        .map(|bm| scale_linear(bm, 0.0, 1.0));

    let fcf_yield = fundamentals
        .fcf_yield()
        .map(|fy| scale_linear(fy, 0.0, 0.10));

    let value = blend(&[
        (earnings_yield, W_EARNINGS_YIELD),
        (book_to_market, W_BOOK_TO_MARKET),
        (fcf_yield, W_FCF_YIELD),
    ]);
    FactorScore::new(FactorName::Value, value)
}
