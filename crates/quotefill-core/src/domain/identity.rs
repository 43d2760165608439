use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::provider::{IdentityCandidate, ProviderError};

/// Supported security classes, in identification scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityType {
    Stock,
    Fund,
    CurrencyCross,
}

impl SecurityType {
    /// Scan order for identification: first type with exactly one match wins.
    pub const ALL: [Self; 3] = [Self::Stock, Self::Fund, Self::CurrencyCross];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Fund => "fund",
            Self::CurrencyCross => "currency_cross",
        }
    }
}

impl Display for SecurityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityType {
    type Err = LookupError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(Self::Stock),
            "fund" => Ok(Self::Fund),
            "currency_cross" => Ok(Self::CurrencyCross),
            other => Err(LookupError::UnsupportedSecurityType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Resolved descriptive record for one security.
///
/// Immutable once built; `name` and `security_type` are always present, the
/// provider may omit everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub full_name: Option<String>,
    pub security_type: SecurityType,
    pub isin: Option<String>,
    pub symbol: Option<String>,
    pub country: Option<String>,
    pub currency: Option<String>,
}

impl Identity {
    /// Finalize a single search candidate into an identity.
    ///
    /// A currency cross with no currency field derives its quote currency
    /// from the pair name (the part after the slash).
    pub fn from_candidate(
        security_type: SecurityType,
        candidate: IdentityCandidate,
    ) -> Result<Self, LookupError> {
        let name = candidate.name.ok_or_else(|| {
            ProviderError::invalid_data("search result is missing the security name")
        })?;

        let currency = candidate.currency.or_else(|| {
            if security_type == SecurityType::CurrencyCross {
                name.split('/').nth(1).map(str::to_owned)
            } else {
                None
            }
        });

        Ok(Self {
            name,
            full_name: candidate.full_name,
            security_type,
            isin: candidate.isin,
            symbol: candidate.symbol,
            country: candidate.country,
            currency,
        })
    }
}
