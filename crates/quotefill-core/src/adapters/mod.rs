//! HTTP-backed provider implementations.

mod investing;

pub use investing::InvestingAdapter;
