//! Security price lookup and date-filling engine.
//!
//! This crate contains:
//! - Canonical domain models and validation (identity, price series, periods)
//! - A binary-search date index over sparse trading-day calendars
//! - The price query engine with calendar auto-fill expansion
//! - Period-return arithmetic (named tokens, CAGR, explicit start dates)
//! - The provider contract and an HTTP-backed adapter

pub mod adapters;
pub mod date_index;
pub mod domain;
pub mod engine;
pub mod error;
pub mod http_client;
pub mod provider;
pub mod record;
pub mod returns;

pub use adapters::InvestingAdapter;
pub use date_index::find;
pub use domain::{Identity, PriceSeries, ReturnPeriod, SecurityType, UtcDateTime};
pub use engine::{PriceQuery, PriceQueryEngine};
pub use error::LookupError;
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use provider::{
    format_provider_date, HistoryRow, IdentityCandidate, ProviderError, ProviderErrorKind,
    QuoteProvider,
};
pub use record::SecurityRecord;
pub use returns::{ReturnCalculator, ReturnWindow};
