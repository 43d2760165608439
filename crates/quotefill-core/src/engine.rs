//! Price query modes and calendar auto-fill expansion.

use std::collections::BTreeMap;

use time::Date;

use crate::date_index::find;
use crate::domain::PriceSeries;
use crate::error::LookupError;

/// One price query window. The four variants are the four mutually exclusive
/// query modes; `auto_fill` switches the sparse trading-day view for a
/// calendar view with non-trading days forward-filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceQuery {
    /// Latest close: the price at today's date, resolved to the closest prior
    /// trading day.
    Latest,
    /// The entire cached series. With `auto_fill`, the span from the series'
    /// first date through today is calendar-expanded instead (never beyond
    /// today, even when an explicit range query could fill further).
    All { auto_fill: bool },
    /// Single price at a date.
    ///
    /// Without `auto_fill` the anchor is the closest prior trading day and
    /// the entry is keyed by that resolved date. With `auto_fill` the anchor
    /// advances by one index to the next trading day. The asymmetry is
    /// inherited behavior and is kept as-is; see the pinning test below.
    At { date: Date, auto_fill: bool },
    /// Inclusive date range.
    Range {
        from: Date,
        to: Date,
        auto_fill: bool,
    },
}

/// Query evaluator over one record's cached series.
///
/// Pure in-memory computation; `today` is the as-of date the owning record
/// committed to at construction.
#[derive(Debug, Clone, Copy)]
pub struct PriceQueryEngine<'a> {
    series: &'a PriceSeries,
    today: Date,
}

impl<'a> PriceQueryEngine<'a> {
    pub fn new(series: &'a PriceSeries, today: Date) -> Self {
        Self { series, today }
    }

    /// Evaluate one query window into an ordered date-to-close mapping.
    pub fn prices(&self, query: PriceQuery) -> Result<BTreeMap<Date, f64>, LookupError> {
        let dates = self.series.dates();
        let high = dates.len() - 1;

        match query {
            PriceQuery::Latest => {
                let anchor = find(dates, self.today, 0, high, false)?;
                self.single(anchor)
            }
            PriceQuery::All { auto_fill: false } => Ok(self.series.entries().collect()),
            PriceQuery::All { auto_fill: true } => {
                self.filled(self.series.first_date(), self.today)
            }
            PriceQuery::At { date, auto_fill } => {
                let prior = find(dates, date, 0, high, false)?;
                let anchor = if auto_fill { prior + 1 } else { prior };
                self.single(anchor)
            }
            PriceQuery::Range {
                from,
                to,
                auto_fill,
            } => {
                if to > self.today {
                    return Err(LookupError::OutOfRange {
                        date: to,
                        latest: self.today,
                    });
                }

                let from_index = find(dates, from, 0, high, false)?;
                let to_index = find(dates, to, 0, high, false)?;

                if auto_fill {
                    self.fill_between(from, to, from_index, to_index)
                } else {
                    Ok((from_index..=to_index)
                        .map(|index| self.series.at(index).expect("index within series bounds"))
                        .collect())
                }
            }
        }
    }

    fn single(&self, anchor: usize) -> Result<BTreeMap<Date, f64>, LookupError> {
        let (date, close) = self.series.at(anchor).ok_or_else(|| LookupError::NotFound {
            what: format!("no trading day beyond {}", self.series.last_date()),
        })?;

        let mut prices = BTreeMap::new();
        prices.insert(date, close);
        Ok(prices)
    }

    fn filled(&self, from: Date, to: Date) -> Result<BTreeMap<Date, f64>, LookupError> {
        let dates = self.series.dates();
        let high = dates.len() - 1;
        let from_index = find(dates, from, 0, high, false)?;
        let to_index = find(dates, to, 0, high, false)?;
        self.fill_between(from, to, from_index, to_index)
    }

    /// Forward-fill expansion: one entry per calendar day in `[from, to]`.
    ///
    /// Every day in a gap between two trading days takes the earlier day's
    /// close; days past the last cached trading day take the last known
    /// close through `to`.
    fn fill_between(
        &self,
        from: Date,
        to: Date,
        from_index: usize,
        to_index: usize,
    ) -> Result<BTreeMap<Date, f64>, LookupError> {
        let mut prices = BTreeMap::new();

        for index in from_index..=to_index {
            let (start, close) = self.series.at(index).expect("index within series bounds");
            let until = match self.series.at(index + 1) {
                Some((next, _)) => {
                    let before_next = next.previous_day().expect("trading dates never underflow");
                    if before_next < to {
                        before_next
                    } else {
                        to
                    }
                }
                None => to,
            };

            let mut day = if start < from { from } else { start };
            while day <= until {
                prices.insert(day, close);
                day = day.next_day().expect("filled span is bounded by `to`");
            }
        }

        Ok(prices)
    }
}
