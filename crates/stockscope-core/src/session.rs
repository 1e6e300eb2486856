//! Fetch-then-export workflow.
//!
//! A [`Session`] owns a price source and the most recently fetched table.
//! Each [`Session::generate`] call replaces the table; [`Session::export`]
//! writes whatever was fetched last.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::export::{export_table, ExportFormat};
use crate::stats::{summarize, validate_window, MovingAverage, SummaryStats};
use crate::{
    CoreError, FetchRequest, PriceSource, PriceTable, QueryParameters, SourceId, Symbol, TimeRange,
};

/// Statistics derived from one ticker's series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerReport {
    pub symbol: Symbol,
    pub params: QueryParameters,
    pub stats: SummaryStats,
    pub moving_averages: Vec<MovingAverage>,
}

/// Outcome of a generate action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateOutcome {
    pub source: SourceId,
    /// Time range actually used; differs from the requested label when it fell back.
    pub range: TimeRange,
    pub params: QueryParameters,
    pub reports: Vec<TickerReport>,
}

pub struct Session<S> {
    source: S,
    latest: Option<PriceTable>,
}

impl<S: PriceSource> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            latest: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Table from the last successful fetch.
    pub fn latest(&self) -> Option<&PriceTable> {
        self.latest.as_ref()
    }

    /// Resolve the label, fetch every ticker and summarize each series.
    ///
    /// Window sizes are checked before anything is fetched. A failed fetch
    /// leaves the previously held table untouched.
    pub async fn generate(
        &mut self,
        symbols: Vec<Symbol>,
        label: &str,
        windows: &[usize],
    ) -> Result<GenerateOutcome, CoreError> {
        for window in windows {
            validate_window(*window)?;
        }

        let range = match TimeRange::from_label(label) {
            Some(range) => range,
            None => {
                let fallback = TimeRange::default();
                tracing::warn!(label, fallback = %fallback, "unrecognized time range, using default");
                fallback
            }
        };
        let params = range.query_parameters();
        let request = FetchRequest::new(symbols, params)?;

        tracing::info!(
            source = %self.source.id(),
            symbols = request.symbols.len(),
            %params,
            "fetching prices"
        );
        let table = self.source.fetch(request).await?;
        let reports = build_reports(&table, windows)?;
        self.latest = Some(table);

        Ok(GenerateOutcome {
            source: self.source.id(),
            range,
            params,
            reports,
        })
    }

    /// Export the held table into `dir`, one file per ticker.
    pub fn export(&self, dir: &Path, format: ExportFormat) -> Result<Vec<PathBuf>, CoreError> {
        let table = self.latest.as_ref().ok_or(CoreError::NothingFetched)?;
        Ok(export_table(table, dir, format)?)
    }
}

/// Summaries and moving averages for every series, in table order.
pub fn build_reports(table: &PriceTable, windows: &[usize]) -> Result<Vec<TickerReport>, CoreError> {
    table
        .iter()
        .map(|series| -> Result<TickerReport, CoreError> {
            let stats = summarize(series)?;
            let moving_averages = windows
                .iter()
                .map(|window| MovingAverage::compute(series, *window))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TickerReport {
                symbol: series.symbol.clone(),
                params: series.params,
                stats,
                moving_averages,
            })
        })
        .collect()
}
