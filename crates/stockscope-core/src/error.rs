use std::path::PathBuf;

use thiserror::Error;

use crate::data_source::SourceError;

/// Validation and contract errors exposed by `stockscope-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid period '{value}', expected one of 1d, 5d, 1mo, 1y")]
    InvalidPeriod { value: String },
    #[error("invalid interval '{value}', expected one of 5m, 30m, 4h, 1wk")]
    InvalidInterval { value: String },
    #[error("invalid export format '{value}', expected one of csv, json")]
    InvalidExportFormat { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("unix timestamp {seconds} is out of range")]
    TimestampOutOfRange { seconds: i64 },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
}

/// Failures of the statistics reducers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("cannot summarize an empty price series for {symbol}")]
    EmptySeries { symbol: String },
    #[error("moving average window must be greater than zero")]
    InvalidWindow { window: usize },
}

/// Failures while writing or reading exported price data.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("nothing has been fetched yet; run a fetch before exporting")]
    NothingFetched,
}
