//! Canonical domain types for security resolution and price history.
//!
//! Everything here is validated at construction and immutable afterwards:
//!
//! - [`SecurityType`] - the supported security classes and their scan order
//! - [`Identity`] - the resolved descriptive record for one security
//! - [`PriceSeries`] - the cached trading-date to close-price mapping
//! - [`ReturnPeriod`] - named return-period tokens
//! - [`UtcDateTime`] - UTC timestamp as reported by the data provider

mod identity;
mod period;
mod series;
mod timestamp;

pub use identity::{Identity, SecurityType};
pub use period::ReturnPeriod;
pub use series::PriceSeries;
pub use timestamp::UtcDateTime;
