//! # Domain Models
//!
//! Canonical domain types for stockscope price queries.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TimeRange`] | Human time-range selection ("1 Day" .. "1 Year") |
//! | [`QueryParameters`] | Provider period/interval pair |
//! | [`Period`] | How far back to fetch (1d, 5d, 1mo, 1y) |
//! | [`Interval`] | Sampling granularity (5m, 30m, 4h, 1wk) |
//! | [`PricePoint`] | Timestamped closing price |
//! | [`PriceSeries`] | Closing prices for one ticker |
//! | [`PriceTable`] | Series for every requested ticker |
//! | [`Symbol`] | Validated ticker |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! All types validate their invariants at construction time.

mod interval;
mod models;
mod period;
mod range;
mod symbol;
mod timestamp;

pub use interval::Interval;
pub use models::{PricePoint, PriceSeries, PriceTable};
pub use period::Period;
pub use range::{resolve, QueryParameters, TimeRange};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
