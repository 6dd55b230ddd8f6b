//! Risk overlay — hard candidate filters and fractional-Kelly sizing.

pub mod filters;
pub mod kelly;

pub use filters::{FilterReason, RiskFilters, RiskInputs};
pub use kelly::{position_size, KellyParams};
