use time::Date;

use crate::error::LookupError;
use crate::provider::{HistoryRow, ProviderError};

/// Full in-memory daily close history for one security.
///
/// Dates are strictly increasing and generally non-contiguous (weekends and
/// holidays are absent from the provider feed). Built exactly once from a
/// provider fetch and read-only afterwards; every query answers from this
/// cache and never re-fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    dates: Vec<Date>,
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Collapse provider rows (keyed by full timestamp, ascending) into a
    /// calendar-date series.
    ///
    /// Rows landing on the same calendar date keep the later row's close.
    /// An empty or out-of-order history is rejected.
    pub fn from_rows(rows: Vec<HistoryRow>) -> Result<Self, LookupError> {
        if rows.is_empty() {
            return Err(LookupError::NotFound {
                what: String::from("provider returned no price history"),
            });
        }

        let mut dates: Vec<Date> = Vec::with_capacity(rows.len());
        let mut closes: Vec<f64> = Vec::with_capacity(rows.len());

        for row in rows {
            if !row.close.is_finite() || row.close < 0.0 {
                return Err(ProviderError::invalid_data(format!(
                    "close {} at {} is not a valid price",
                    row.close, row.ts
                ))
                .into());
            }

            let date = row.ts.date();
            match dates.last() {
                Some(last) if *last == date => {
                    *closes.last_mut().expect("closes tracks dates") = row.close;
                }
                Some(last) if *last > date => {
                    return Err(ProviderError::invalid_data(format!(
                        "history rows are not in ascending date order at {date}"
                    ))
                    .into());
                }
                _ => {
                    dates.push(date);
                    closes.push(row.close);
                }
            }
        }

        Ok(Self { dates, closes })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Earliest cached trading date.
    pub fn first_date(&self) -> Date {
        *self.dates.first().expect("series is never empty")
    }

    /// Latest cached trading date.
    pub fn last_date(&self) -> Date {
        *self.dates.last().expect("series is never empty")
    }

    /// The sorted trading-day calendar, for the date index.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Entry at a calendar position, if the index is in range.
    pub fn at(&self, index: usize) -> Option<(Date, f64)> {
        Some((*self.dates.get(index)?, self.closes[index]))
    }

    /// Close at an exact trading date, if present.
    pub fn get(&self, date: Date) -> Option<f64> {
        let index = self.dates.binary_search(&date).ok()?;
        Some(self.closes[index])
    }

    pub fn entries(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.closes.iter().copied())
    }
}
