//! The resolved security aggregate: identity plus cached price history.

use std::collections::BTreeMap;

use log::debug;
use time::{Date, OffsetDateTime};

use crate::domain::{Identity, PriceSeries, SecurityType};
use crate::engine::{PriceQuery, PriceQueryEngine};
use crate::error::LookupError;
use crate::provider::{ProviderErrorKind, QuoteProvider};
use crate::returns::{ReturnCalculator, ReturnWindow};

/// A fully-resolved security: identity and daily close history for the
/// `[from_date, as_of]` window committed at construction.
///
/// Construction either succeeds completely - identified, history fetched and
/// cached - or fails; there is no partially-resolved state. Afterwards the
/// record is immutable: every query answers from the cache, the provider is
/// never contacted again, and a new window requires a new record.
#[derive(Debug, Clone)]
pub struct SecurityRecord {
    identity: Identity,
    series: PriceSeries,
    from_date: Date,
    as_of: Date,
}

impl SecurityRecord {
    /// Resolve `identifier` and cache its history from `from_date` through
    /// today (system clock, UTC).
    pub fn resolve(
        provider: &dyn QuoteProvider,
        identifier: &str,
        from_date: Date,
    ) -> Result<Self, LookupError> {
        Self::resolve_at(provider, identifier, from_date, OffsetDateTime::now_utc().date())
    }

    /// Resolve with an explicit as-of date. The date caps the fetch window
    /// and acts as "today" for every later query on this record.
    pub fn resolve_at(
        provider: &dyn QuoteProvider,
        identifier: &str,
        from_date: Date,
        as_of: Date,
    ) -> Result<Self, LookupError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(LookupError::InvalidInput {
                reason: String::from("security identifier must not be empty"),
            });
        }
        if from_date > as_of {
            return Err(LookupError::OutOfRange {
                date: from_date,
                latest: as_of,
            });
        }

        let identity = Self::identify(provider, identifier)?;
        debug!(
            "identified '{identifier}' as {} '{}'",
            identity.security_type, identity.name
        );

        let rows = provider.fetch_history(&identity, from_date, as_of)?;
        let series = PriceSeries::from_rows(rows)?;
        debug!(
            "cached {} trading days for '{}' between {from_date} and {as_of}",
            series.len(),
            identity.name
        );

        Ok(Self {
            identity,
            series,
            from_date,
            as_of,
        })
    }

    /// Scan the supported security types in order and finalize on the first
    /// type with exactly one match.
    ///
    /// A provider-side not-found for one type is tolerated and the scan moves
    /// on; any other provider error surfaces immediately. More than one match
    /// for a type is ambiguous, and an exhausted scan is a miss.
    fn identify(
        provider: &dyn QuoteProvider,
        identifier: &str,
    ) -> Result<Identity, LookupError> {
        for security_type in SecurityType::ALL {
            let candidates = match provider.search(security_type, identifier) {
                Ok(candidates) => candidates,
                Err(error) if error.kind() == ProviderErrorKind::NotFound => continue,
                Err(error) => return Err(error.into()),
            };

            match candidates.len() {
                0 => continue,
                1 => {
                    let candidate = candidates
                        .into_iter()
                        .next()
                        .expect("length was checked above");
                    return Identity::from_candidate(security_type, candidate);
                }
                matches => {
                    return Err(LookupError::AmbiguousMatch {
                        query: identifier.to_owned(),
                        security_type,
                        matches,
                    })
                }
            }
        }

        Err(LookupError::NotFound {
            what: format!("no results were found for '{identifier}'"),
        })
    }

    /// The resolved identity, answered from cache.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The cached close history, read-only.
    pub fn price_series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn from_date(&self) -> Date {
        self.from_date
    }

    /// The "today" this record committed to at construction.
    pub fn as_of(&self) -> Date {
        self.as_of
    }

    /// Evaluate one price query window against the cached series.
    pub fn prices(&self, query: PriceQuery) -> Result<BTreeMap<Date, f64>, LookupError> {
        PriceQueryEngine::new(&self.series, self.as_of).prices(query)
    }

    /// Percentage return over a named or explicit window; `Ok(None)` when the
    /// window starts before the cached history does.
    pub fn security_return(&self, window: ReturnWindow) -> Result<Option<f64>, LookupError> {
        ReturnCalculator::new(&self.series, self.as_of).security_return(window)
    }
}
