//! External data-provider contract.
//!
//! The provider is an opaque collaborator: it answers identity searches and
//! hands back a time-ordered close-price history. Everything else (auth,
//! retries, rate limiting) is the provider's own business.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::domain::{Identity, SecurityType, UtcDateTime};

/// One identity row returned by a provider search.
///
/// Any field may be absent; finalization into an [`Identity`] decides what is
/// mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityCandidate {
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub isin: Option<String>,
    pub symbol: Option<String>,
    pub country: Option<String>,
    pub currency: Option<String>,
}

/// One historical row: full UTC timestamp and the day's close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub ts: UtcDateTime,
    pub close: f64,
}

/// Synchronous provider contract.
///
/// `search` is keyed by the type-specific lookup field (ISIN for stocks and
/// funds, pair name for currency crosses). `fetch_history` returns rows in
/// ascending date order with non-trading days absent.
pub trait QuoteProvider: Send + Sync {
    fn search(
        &self,
        security_type: SecurityType,
        identifier: &str,
    ) -> Result<Vec<IdentityCandidate>, ProviderError>;

    fn fetch_history(
        &self,
        identity: &Identity,
        from_date: Date,
        to_date: Date,
    ) -> Result<Vec<HistoryRow>, ProviderError>;
}

const PROVIDER_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year]");

/// Format a calendar date in the day/month/year form the provider expects.
pub fn format_provider_date(date: Date) -> String {
    date.format(PROVIDER_DATE)
        .expect("calendar dates format as DD/MM/YYYY")
}

/// Provider-boundary error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Unavailable,
    InvalidRequest,
    InvalidData,
    NotFound,
    Internal,
}

/// Structured error surfaced by provider implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
    retryable: bool,
}

impl ProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::InvalidData,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::Unavailable => "provider.unavailable",
            ProviderErrorKind::InvalidRequest => "provider.invalid_request",
            ProviderErrorKind::InvalidData => "provider.invalid_data",
            ProviderErrorKind::NotFound => "provider.not_found",
            ProviderErrorKind::Internal => "provider.internal",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}
