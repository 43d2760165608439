//! Shared stubs for record-level behavioral tests.

use std::collections::HashMap;
use std::sync::Mutex;

use quotefill_core::{
    HistoryRow, Identity, IdentityCandidate, ProviderError, QuoteProvider, SecurityType,
    UtcDateTime,
};
use time::Date;

/// Build a history row from a calendar day string and a close price.
pub fn history_row(day: &str, close: f64) -> HistoryRow {
    HistoryRow {
        ts: UtcDateTime::parse(&format!("{day}T00:00:00Z")).expect("test timestamp"),
        close,
    }
}

/// Build an ascending daily history from `(day, close)` pairs.
pub fn daily_history(entries: &[(&str, f64)]) -> Vec<HistoryRow> {
    entries
        .iter()
        .map(|(day, close)| history_row(day, *close))
        .collect()
}

/// A candidate identity row carrying only a name.
pub fn named_candidate(name: &str) -> IdentityCandidate {
    IdentityCandidate {
        name: Some(name.to_owned()),
        ..IdentityCandidate::default()
    }
}

/// Scripted provider that records every call it receives.
///
/// Searches answer from a per-type script (missing type means zero matches);
/// history fetches replay one fixed row set. Call logs are behind mutexes so
/// tests can assert exact call counts and scan order through `&dyn
/// QuoteProvider`.
pub struct ScriptedProvider {
    search_script: HashMap<SecurityType, Result<Vec<IdentityCandidate>, ProviderError>>,
    history: Vec<HistoryRow>,
    pub search_calls: Mutex<Vec<(SecurityType, String)>>,
    pub history_calls: Mutex<Vec<(Date, Date)>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            search_script: HashMap::new(),
            history: Vec::new(),
            search_calls: Mutex::new(Vec::new()),
            history_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_matches(mut self, security_type: SecurityType, rows: Vec<IdentityCandidate>) -> Self {
        self.search_script.insert(security_type, Ok(rows));
        self
    }

    pub fn with_search_error(mut self, security_type: SecurityType, error: ProviderError) -> Self {
        self.search_script.insert(security_type, Err(error));
        self
    }

    pub fn with_history(mut self, rows: Vec<HistoryRow>) -> Self {
        self.history = rows;
        self
    }

    pub fn search_call_count(&self) -> usize {
        self.search_calls.lock().expect("call log").len()
    }

    pub fn history_call_count(&self) -> usize {
        self.history_calls.lock().expect("call log").len()
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteProvider for ScriptedProvider {
    fn search(
        &self,
        security_type: SecurityType,
        identifier: &str,
    ) -> Result<Vec<IdentityCandidate>, ProviderError> {
        self.search_calls
            .lock()
            .expect("call log")
            .push((security_type, identifier.to_owned()));

        match self.search_script.get(&security_type) {
            Some(Ok(rows)) => Ok(rows.clone()),
            Some(Err(error)) => Err(error.clone()),
            None => Ok(Vec::new()),
        }
    }

    fn fetch_history(
        &self,
        _identity: &Identity,
        from_date: Date,
        to_date: Date,
    ) -> Result<Vec<HistoryRow>, ProviderError> {
        self.history_calls
            .lock()
            .expect("call log")
            .push((from_date, to_date));
        Ok(self.history.clone())
    }
}
