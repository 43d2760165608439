//! Period-return arithmetic over one record's price series.

use time::{Date, Duration, Month};

use crate::domain::{PriceSeries, ReturnPeriod};
use crate::engine::{PriceQuery, PriceQueryEngine};
use crate::error::LookupError;

/// A return window: either a named period token or an explicit start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnWindow {
    Period(ReturnPeriod),
    Since(Date),
}

impl From<ReturnPeriod> for ReturnWindow {
    fn from(period: ReturnPeriod) -> Self {
        Self::Period(period)
    }
}

/// Computes percentage returns from two point queries on the engine.
#[derive(Debug, Clone, Copy)]
pub struct ReturnCalculator<'a> {
    series: &'a PriceSeries,
    today: Date,
}

impl<'a> ReturnCalculator<'a> {
    pub fn new(series: &'a PriceSeries, today: Date) -> Self {
        Self { series, today }
    }

    /// Percentage return over the window: `(ending / beginning - 1) * 100`.
    ///
    /// `ending` is the latest close. `beginning` is the close at the window's
    /// start date, resolved to the closest prior trading day. A beginning
    /// date that predates the earliest cached price yields `Ok(None)` - the
    /// one place an out-of-bounds lookup is swallowed rather than surfaced.
    pub fn security_return(&self, window: ReturnWindow) -> Result<Option<f64>, LookupError> {
        let engine = PriceQueryEngine::new(self.series, self.today);
        let latest = engine.prices(PriceQuery::Latest)?;
        let (latest_date, ending) = latest
            .into_iter()
            .next_back()
            .expect("latest query yields exactly one entry");

        let period = match window {
            ReturnWindow::Since(date) => return self.simple_return(&engine, date, ending),
            ReturnWindow::Period(period) => period,
        };

        match period {
            ReturnPeriod::Cagr => self.cagr(latest_date, ending),
            other => self.simple_return(&engine, self.period_start(other), ending),
        }
    }

    fn simple_return(
        &self,
        engine: &PriceQueryEngine<'_>,
        beginning_date: Date,
        ending: f64,
    ) -> Result<Option<f64>, LookupError> {
        let beginning_prices = match engine.prices(PriceQuery::At {
            date: beginning_date,
            auto_fill: false,
        }) {
            Ok(prices) => prices,
            Err(LookupError::OutOfBounds { .. }) => return Ok(None),
            Err(error) => return Err(error),
        };

        let beginning = beginning_prices
            .into_values()
            .next()
            .expect("point query yields exactly one entry");

        Ok(Some((ending / beginning - 1.0) * 100.0))
    }

    /// Compound annual growth rate from the earliest cached close to the
    /// latest, annualized over 365-day years.
    fn cagr(&self, latest_date: Date, ending: f64) -> Result<Option<f64>, LookupError> {
        let (first_date, beginning) = self.series.at(0).expect("series is never empty");
        let years = (latest_date - first_date).whole_days() as f64 / 365.0;
        if years <= 0.0 {
            return Ok(None);
        }

        Ok(Some(((ending / beginning).powf(1.0 / years) - 1.0) * 100.0))
    }

    fn period_start(&self, period: ReturnPeriod) -> Date {
        match period {
            ReturnPeriod::OneDay => self.today - Duration::days(1),
            ReturnPeriod::OneWeek => self.today - Duration::weeks(1),
            ReturnPeriod::OneMonth => months_back(self.today, 1),
            ReturnPeriod::ThreeMonths => months_back(self.today, 3),
            ReturnPeriod::SixMonths => months_back(self.today, 6),
            ReturnPeriod::OneYear => months_back(self.today, 12),
            ReturnPeriod::ThreeYears => months_back(self.today, 36),
            ReturnPeriod::Ytd => Date::from_calendar_date(self.today.year(), Month::January, 1)
                .expect("January 1st exists in every year"),
            ReturnPeriod::Max => self.series.first_date(),
            ReturnPeriod::Cagr => self.series.first_date(),
        }
    }
}

/// Same calendar day `months` months earlier, clamped to the target month's
/// last day (May 31 minus one month is April 30).
fn months_back(date: Date, months: i32) -> Date {
    let zero_based = date.year() * 12 + i32::from(u8::from(date.month())) - 1 - months;
    let year = zero_based.div_euclid(12);
    let month = Month::try_from((zero_based.rem_euclid(12) + 1) as u8).expect("month in 1..=12");
    let day = date.day().min(time::util::days_in_year_month(year, month));
    Date::from_calendar_date(year, month, day).expect("clamped day is valid for the month")
}
