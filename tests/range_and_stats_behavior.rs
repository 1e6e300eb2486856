//! Behavior-driven tests for range resolution and summary statistics
//!
//! These tests verify WHAT a user gets when picking a time range and asking
//! for the statistics of a fetched series.

use stockscope_core::{
    moving_average, resolve, summarize, Interval, Period, PriceSeries, QueryParameters,
    StatsError, TimeRange,
};
use stockscope_tests::series_from_closes;

fn series(symbol: &str, closes: &[f64]) -> PriceSeries {
    series_from_closes(symbol, "5 Days", 1_717_000_000, 1_800, closes)
}

// =============================================================================
// Range Resolution
// =============================================================================

#[test]
fn every_offered_range_maps_to_its_query_parameters() {
    // Given: The four ranges offered to the user
    let table = [
        ("1 Day", "1d", "5m"),
        ("5 Days", "5d", "30m"),
        ("1 Month", "1mo", "4h"),
        ("1 Year", "1y", "1wk"),
    ];

    for (label, period, interval) in table {
        // When: The label is resolved
        let params = resolve(label);

        // Then: The provider codes match the lookup table
        assert_eq!(params.period.as_str(), period, "period for {label}");
        assert_eq!(params.interval.as_str(), interval, "interval for {label}");
    }
}

#[test]
fn unrecognized_range_falls_back_to_one_day_instead_of_failing() {
    // Given: Labels the resolver does not know
    for label in ["", "  ", "10 Years", "1 Week", "1mo", "Year"] {
        // When: They are resolved
        let params = resolve(label);

        // Then: The "1 Day" defaults are used
        assert_eq!(params, QueryParameters::new(Period::OneDay, Interval::FiveMinutes));
        assert_eq!(params, TimeRange::OneDay.query_parameters());
    }
}

#[test]
fn resolving_the_same_label_twice_yields_identical_parameters() {
    for range in TimeRange::ALL {
        let first = resolve(range.label());
        let second = resolve(range.label());
        assert_eq!(first, second);
    }
    assert_eq!(resolve("bogus"), resolve("bogus"));
}

// =============================================================================
// Summary Statistics
// =============================================================================

#[test]
fn summary_reports_mean_and_when_extremes_happened() {
    // Given: A series [(t0,10),(t1,20),(t2,5)]
    let series = series("AAPL", &[10.0, 20.0, 5.0]);

    // When: It is summarized
    let stats = summarize(&series).expect("non-empty series");

    // Then: Mean, max and min line up with the samples
    assert!((stats.mean - 11.666_666_666_666_666).abs() < 1e-9);
    assert_eq!(stats.max, 20.0);
    assert_eq!(stats.max_time, series.points[1].timestamp);
    assert_eq!(stats.min, 5.0);
    assert_eq!(stats.min_time, series.points[2].timestamp);
    assert_eq!(stats.count, 3);
}

#[test]
fn summarizing_nothing_is_reported_as_an_empty_series() {
    let series = series("AAPL", &[]);

    let error = summarize(&series).expect_err("empty series must fail");

    assert!(matches!(error, StatsError::EmptySeries { ref symbol } if symbol == "AAPL"));
}

#[test]
fn equal_prices_report_the_earliest_timestamp() {
    // Given: Two samples with the same close
    let series = series("MSFT", &[10.0, 10.0]);

    // When: It is summarized
    let stats = summarize(&series).expect("non-empty series");

    // Then: The first occurrence wins
    assert_eq!(stats.max, 10.0);
    assert_eq!(stats.max_time, series.points[0].timestamp);
    assert_eq!(stats.min_time, series.points[0].timestamp);
}

#[test]
fn each_ticker_is_summarized_from_its_own_series() {
    // Given: Two tickers with disjoint price levels
    let cheap = series("F", &[11.0, 12.0, 13.0]);
    let pricey = series("NVDA", &[900.0, 950.0, 925.0]);

    // When: Both are summarized
    let cheap_stats = summarize(&cheap).expect("non-empty");
    let pricey_stats = summarize(&pricey).expect("non-empty");

    // Then: Neither summary borrows values from the other
    assert_eq!(cheap_stats.max, 13.0);
    assert_eq!(cheap_stats.min, 11.0);
    assert_eq!(pricey_stats.max, 950.0);
    assert_eq!(pricey_stats.min, 900.0);
}

// =============================================================================
// Moving Averages
// =============================================================================

#[test]
fn moving_average_tracks_the_trailing_window() {
    let series = series("AAPL", &[1.0, 2.0, 3.0, 4.0, 5.0]);

    let values = moving_average(&series, 3).expect("valid window");

    assert_eq!(values, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
}

#[test]
fn moving_average_window_of_one_reproduces_closes() {
    let series = series("AAPL", &[3.5, 7.25]);

    let values = moving_average(&series, 1).expect("valid window");

    assert_eq!(values, vec![Some(3.5), Some(7.25)]);
}
