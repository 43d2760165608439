//! End-to-end return calculations on a resolved record.

use std::str::FromStr;

use quotefill_core::{LookupError, ReturnPeriod, ReturnWindow, SecurityRecord, SecurityType};
use quotefill_tests::{daily_history, named_candidate, ScriptedProvider};
use time::macros::date;

fn record_with(history: Vec<quotefill_core::HistoryRow>, as_of: time::Date) -> SecurityRecord {
    let provider = ScriptedProvider::new()
        .with_matches(SecurityType::CurrencyCross, vec![named_candidate("USD/SEK")])
        .with_history(history);

    SecurityRecord::resolve_at(&provider, "USD/SEK", date!(2020 - 01 - 01), as_of)
        .expect("must resolve")
}

fn assert_close(value: f64, expected: f64) {
    assert!(
        (value - expected).abs() < 1e-9,
        "expected {expected}, got {value}"
    );
}

#[test]
fn one_day_return_against_the_prior_close() {
    let record = record_with(
        daily_history(&[("2022-01-04", 100.0), ("2022-01-05", 103.0)]),
        date!(2022 - 01 - 05),
    );

    let value = record
        .security_return(ReturnWindow::Period(ReturnPeriod::OneDay))
        .expect("must compute")
        .expect("prior close is cached");
    assert_close(value, 3.0);
}

#[test]
fn parsed_period_tokens_drive_the_window() {
    let record = record_with(
        daily_history(&[
            ("2021-12-31", 100.0),
            ("2022-01-03", 102.0),
            ("2022-01-05", 110.0),
        ]),
        date!(2022 - 01 - 07),
    );

    let period = ReturnPeriod::from_str("1W").expect("must parse");
    let value = record
        .security_return(period.into())
        .expect("must compute")
        .expect("window starts inside the series");
    assert_close(value, 10.0);
}

#[test]
fn unknown_period_token_is_unsupported() {
    let err = ReturnPeriod::from_str("2W").expect_err("must fail");
    assert!(matches!(err, LookupError::UnsupportedPeriod { .. }));
}

#[test]
fn ytd_predating_the_cached_history_is_null_not_an_error() {
    let record = record_with(
        daily_history(&[("2022-03-01", 100.0), ("2022-03-02", 104.0)]),
        date!(2022 - 03 - 02),
    );

    let value = record
        .security_return(ReturnWindow::Period(ReturnPeriod::Ytd))
        .expect("out-of-bounds beginning is swallowed");
    assert_eq!(value, None);
}

#[test]
fn ytd_anchors_on_the_last_close_of_the_prior_year() {
    let record = record_with(
        daily_history(&[
            ("2021-12-31", 100.0),
            ("2022-01-03", 102.0),
            ("2022-01-04", 106.0),
        ]),
        date!(2022 - 01 - 04),
    );

    // Jan 1 is not a trading day; the year start resolves back to Dec 31.
    let value = record
        .security_return(ReturnWindow::Period(ReturnPeriod::Ytd))
        .expect("must compute")
        .expect("prior-year close is cached");
    assert_close(value, 6.0);
}

#[test]
fn max_return_uses_the_earliest_cached_close() {
    let record = record_with(
        daily_history(&[
            ("2020-06-01", 50.0),
            ("2021-06-01", 80.0),
            ("2022-06-01", 75.0),
        ]),
        date!(2022 - 06 - 02),
    );

    let value = record
        .security_return(ReturnWindow::Period(ReturnPeriod::Max))
        .expect("must compute")
        .expect("beginning is the earliest cached date");
    assert_close(value, 50.0);
}

#[test]
fn cagr_annualizes_over_365_day_years() {
    // 730 days between the endpoints: exactly two 365-day years.
    let record = record_with(
        daily_history(&[("2020-01-06", 100.0), ("2022-01-05", 121.0)]),
        date!(2022 - 01 - 05),
    );

    let value = record
        .security_return(ReturnWindow::Period(ReturnPeriod::Cagr))
        .expect("must compute")
        .expect("series spans two years");
    assert_close(value, 10.0);
}

#[test]
fn explicit_start_date_is_supported() {
    let record = record_with(
        daily_history(&[
            ("2021-12-31", 100.0),
            ("2022-01-03", 102.0),
            ("2022-01-05", 110.0),
        ]),
        date!(2022 - 01 - 06),
    );

    let value = record
        .security_return(ReturnWindow::Since(date!(2022 - 01 - 01)))
        .expect("must compute")
        .expect("window starts inside the series");
    assert_close(value, 10.0);
}
