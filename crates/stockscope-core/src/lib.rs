//! # Stockscope Core
//!
//! Historical price lookup, summary statistics and export for stock tickers.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Price sources (Yahoo Finance, synthetic offline data) |
//! | [`data_source`] | Price source trait, fetch request and source errors |
//! | [`domain`] | Time ranges, query parameters, symbols, price series |
//! | [`error`] | Core error types |
//! | [`export`] | CSV and JSON writers/readers |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`session`] | Fetch-then-export workflow holding the last fetch |
//! | [`stats`] | Summary statistics and moving averages |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockscope_core::{Session, Symbol, YahooAdapter};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = Session::new(YahooAdapter::default());
//!     let outcome = session
//!         .generate(vec![Symbol::parse("AAPL")?], "1 Month", &[20])
//!         .await?;
//!
//!     for report in &outcome.reports {
//!         println!("{} mean {:.2}", report.symbol, report.stats.mean);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! label ──▶ resolve ──▶ QueryParameters
//!                            │
//!                            ▼
//!                      PriceSource::fetch ──▶ PriceTable ──▶ summarize / moving_average
//!                                                 │
//!                                                 ▼
//!                                              export (csv/json)
//! ```

pub mod adapters;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod export;
pub mod http_client;
pub mod session;
pub mod stats;

pub use adapters::{SyntheticSource, YahooAdapter};

pub use data_source::{FetchRequest, PriceSource, SourceError, SourceErrorKind, SourceId};

pub use domain::{
    resolve, Interval, Period, PricePoint, PriceSeries, PriceTable, QueryParameters, Symbol,
    TimeRange, UtcDateTime,
};

pub use error::{CoreError, ExportError, StatsError, ValidationError};

pub use export::{
    export_file_name, export_series, export_table, read_csv, read_json, write_csv, write_json,
    ExportFormat,
};

pub use http_client::{HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use session::{build_reports, GenerateOutcome, Session, TickerReport};

pub use stats::{moving_average, summarize, validate_window, MovingAverage, SummaryStats};
