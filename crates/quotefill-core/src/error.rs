use thiserror::Error;
use time::Date;

use crate::domain::SecurityType;
use crate::provider::ProviderError;

/// Top-level error type for resolution and price queries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("date {target} is outside the indexed range {earliest}..={latest}")]
    OutOfBounds {
        target: Date,
        earliest: Date,
        latest: Date,
    },

    #[error("date {date} is after the latest queryable date {latest}")]
    OutOfRange { date: Date, latest: Date },

    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("'{query}' matched {matches} {security_type} entries, expected exactly one")]
    AmbiguousMatch {
        query: String,
        security_type: SecurityType,
        matches: usize,
    },

    #[error("unsupported security type '{value}', expected one of stock, fund, currency_cross")]
    UnsupportedSecurityType { value: String },

    #[error("unsupported return period '{value}', expected one of 1d, 1w, 1m, 3m, 6m, 1y, 3y, ytd, max, cagr")]
    UnsupportedPeriod { value: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
