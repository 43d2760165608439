use std::sync::Arc;

use log::{debug, warn};
use serde::Deserialize;
use time::Date;

use crate::domain::{Identity, SecurityType, UtcDateTime};
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::provider::{
    format_provider_date, HistoryRow, IdentityCandidate, ProviderError, QuoteProvider,
};

const DEFAULT_BASE_URL: &str = "https://api.investing-data.test";
const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Route table for the investing-style REST API, keyed by security type.
///
/// Stocks and funds are looked up by ISIN, currency crosses by pair name;
/// the same path segment serves both the search and history endpoints.
const fn search_route(security_type: SecurityType) -> (&'static str, &'static str) {
    match security_type {
        SecurityType::Stock => ("stocks", "isin"),
        SecurityType::Fund => ("funds", "isin"),
        SecurityType::CurrencyCross => ("currency-crosses", "name"),
    }
}

/// Provider adapter over the investing-style JSON API.
///
/// Pure passthrough: no retries, no rate limiting, no auth. Transport errors
/// and upstream statuses are mapped onto [`ProviderError`] kinds and left for
/// the caller to interpret.
pub struct InvestingAdapter {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl Default for InvestingAdapter {
    fn default() -> Self {
        Self::new(Arc::new(NoopHttpClient))
    }
}

impl InvestingAdapter {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn execute(&self, url: &str) -> Result<String, ProviderError> {
        let request = HttpRequest::get(url).with_timeout_ms(REQUEST_TIMEOUT_MS);
        let response = self.http.execute(request).map_err(|error| {
            ProviderError::unavailable(format!("transport error: {}", error.message()))
        })?;

        if response.status == 404 {
            return Err(ProviderError::not_found(
                "upstream has no data for this request (status 404)",
            ));
        }
        if !response.is_success() {
            warn!("provider returned status {} for {url}", response.status);
            return Err(ProviderError::unavailable(format!(
                "upstream returned status {}",
                response.status
            )));
        }

        Ok(response.body)
    }

    /// The identifier the history endpoint is keyed by, per security type.
    fn history_lookup<'a>(identity: &'a Identity) -> Result<&'a str, ProviderError> {
        match identity.security_type {
            SecurityType::Stock => identity.symbol.as_deref().ok_or_else(|| {
                ProviderError::invalid_request("stock history requires a resolved symbol")
            }),
            SecurityType::Fund | SecurityType::CurrencyCross => Ok(identity.name.as_str()),
        }
    }
}

impl QuoteProvider for InvestingAdapter {
    fn search(
        &self,
        security_type: SecurityType,
        identifier: &str,
    ) -> Result<Vec<IdentityCandidate>, ProviderError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ProviderError::invalid_request("search value must not be empty"));
        }

        let (route, field) = search_route(security_type);
        let url = format!(
            "{}/api/search/{route}?by={field}&value={}",
            self.base_url,
            urlencoding::encode(&identifier.to_uppercase())
        );
        debug!("searching {security_type} entries matching '{identifier}'");

        let body = self.execute(&url)?;
        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|error| {
            ProviderError::invalid_data(format!("malformed search response: {error}"))
        })?;

        Ok(parsed.results.into_iter().map(IdentityCandidate::from).collect())
    }

    fn fetch_history(
        &self,
        identity: &Identity,
        from_date: Date,
        to_date: Date,
    ) -> Result<Vec<HistoryRow>, ProviderError> {
        let lookup = Self::history_lookup(identity)?;
        let (route, _) = search_route(identity.security_type);

        let mut url = format!(
            "{}/api/historical/{route}?lookup={}&from={}&to={}",
            self.base_url,
            urlencoding::encode(lookup),
            urlencoding::encode(&format_provider_date(from_date)),
            urlencoding::encode(&format_provider_date(to_date)),
        );
        if let Some(country) = identity.country.as_deref() {
            url.push_str("&country=");
            url.push_str(&urlencoding::encode(country));
        }
        debug!(
            "fetching {} history for '{}' between {from_date} and {to_date}",
            identity.security_type, identity.name
        );

        let body = self.execute(&url)?;
        let parsed: HistoryResponse = serde_json::from_str(&body).map_err(|error| {
            ProviderError::invalid_data(format!("malformed history response: {error}"))
        })?;

        Ok(parsed
            .rows
            .into_iter()
            .map(|row| HistoryRow {
                ts: row.ts,
                close: row.close,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    isin: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    currency: Option<String>,
}

impl From<SearchRow> for IdentityCandidate {
    fn from(row: SearchRow) -> Self {
        Self {
            name: row.name,
            full_name: row.full_name,
            isin: row.isin,
            symbol: row.symbol,
            country: row.country,
            currency: row.currency,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    rows: Vec<HistoryWireRow>,
}

#[derive(Debug, Deserialize)]
struct HistoryWireRow {
    ts: UtcDateTime,
    close: f64,
}
