//! Behavior-driven tests for CSV/JSON export
//!
//! These tests verify WHAT ends up on disk when a user exports fetched prices.

use std::fs::File;

use stockscope_core::{
    export_series, export_table, read_csv, read_json, write_csv, ExportError, ExportFormat,
    PriceSeries, PriceTable,
};
use stockscope_tests::series_from_closes;
use tempfile::tempdir;

fn series(symbol: &str, label: &str, closes: &[f64]) -> PriceSeries {
    series_from_closes(symbol, label, 1_717_000_000, 14_400, closes)
}

// =============================================================================
// Round Trips
// =============================================================================

#[test]
fn csv_export_reads_back_the_same_pairs_in_order() {
    // Given: A fetched series with awkward decimals
    let series = series("AAPL", "1 Month", &[189.98, 190.0100000001, 0.1, 1234567.125]);

    // When: It is written as CSV and parsed again
    let mut buffer = Vec::new();
    write_csv(&series, &mut buffer).expect("csv write");
    let parsed = read_csv(buffer.as_slice()).expect("csv read");

    // Then: Timestamps and closes are reproduced exactly, in order
    assert_eq!(parsed, series.points);
}

#[test]
fn json_export_on_disk_reads_back_the_same_pairs() {
    let dir = tempdir().expect("temp dir");
    let series = series("MSFT", "1 Year", &[401.5, 399.75, 410.0]);

    let path = export_series(&series, dir.path(), ExportFormat::Json).expect("export");
    let parsed = read_json(File::open(&path).expect("open export")).expect("json read");

    assert_eq!(parsed, series.points);
}

// =============================================================================
// File Naming and Layout
// =============================================================================

#[test]
fn table_export_writes_one_file_per_ticker_named_by_range() {
    // Given: A two-ticker fetch for "1 Month"
    let dir = tempdir().expect("temp dir");
    let table = PriceTable::new(vec![
        series("AAPL", "1 Month", &[1.0, 2.0]),
        series("^GSPC", "1 Month", &[5000.0]),
    ]);

    // When: The table is exported as CSV
    let paths = export_table(&table, dir.path(), ExportFormat::Csv).expect("export");

    // Then: Each ticker has its own file, named from ticker, period and interval
    let names: Vec<String> = paths
        .iter()
        .map(|path| path.file_name().expect("file name").to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["AAPL_1mo_4h.csv", "GSPC_1mo_4h.csv"]);

    let contents = std::fs::read_to_string(&paths[0]).expect("read csv");
    assert_eq!(contents.lines().next(), Some("timestamp,close"));
    assert_eq!(contents.lines().count(), 3);
}

#[test]
fn re_exporting_overwrites_the_previous_file() {
    let dir = tempdir().expect("temp dir");

    export_series(&series("AAPL", "1 Day", &[1.0, 2.0, 3.0]), dir.path(), ExportFormat::Csv)
        .expect("first export");
    let path = export_series(&series("AAPL", "1 Day", &[9.0]), dir.path(), ExportFormat::Csv)
        .expect("second export");

    let parsed = read_csv(File::open(path).expect("open")).expect("read");
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].close, 9.0);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn writing_into_a_missing_directory_reports_the_target_path() {
    // Given: A directory that does not exist
    let dir = tempdir().expect("temp dir");
    let missing = dir.path().join("does-not-exist");

    // When: An export is attempted there
    let error = export_series(&series("AAPL", "1 Day", &[1.0]), &missing, ExportFormat::Csv)
        .expect_err("export must fail");

    // Then: The I/O error names the file that could not be written
    match error {
        ExportError::Io { path, .. } => {
            assert_eq!(path, missing.join("AAPL_1d_5m.csv"));
        }
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn malformed_csv_is_rejected_on_read() {
    let input = "timestamp,close\n2024-01-01T00:00:00Z,not-a-number\n";

    let error = read_csv(input.as_bytes()).expect_err("must fail");

    assert!(matches!(error, ExportError::Csv(_)));
}

#[test]
fn negative_or_non_finite_closes_are_rejected_on_read() {
    // Given: Exported files edited to hold impossible prices
    let rows = [
        "timestamp,close\n2024-01-01T00:00:00Z,-5.0\n",
        "timestamp,close\n2024-01-01T00:05:00Z,NaN\n",
        "timestamp,close\n2024-01-01T00:10:00Z,inf\n",
    ];

    for input in rows {
        // When: They are read back
        let error = read_csv(input.as_bytes()).expect_err("must fail");

        // Then: The row is refused instead of becoming a price
        assert!(matches!(error, ExportError::Csv(_)), "{input}");
    }
}

#[test]
fn negative_close_in_json_is_rejected_on_read() {
    let input = r#"[{"timestamp":"2024-01-01T00:00:00Z","close":1.0},{"timestamp":"2024-01-01T00:05:00Z","close":-0.5}]"#;

    let error = read_json(input.as_bytes()).expect_err("must fail");

    assert!(matches!(error, ExportError::Json(_)));
}
