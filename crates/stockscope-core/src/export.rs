//! CSV and JSON export of fetched price series.
//!
//! Each ticker is written to its own file named after the ticker, period and
//! interval, e.g. `AAPL_1mo_4h.csv`. CSV files hold a `timestamp,close` header
//! and one row per sample; JSON files hold an array with one
//! `{"timestamp", "close"}` object per sample.

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ExportError, PricePoint, PriceSeries, PriceTable, QueryParameters, Symbol, ValidationError};

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ValidationError::InvalidExportFormat {
                value: other.to_owned(),
            }),
        }
    }
}

/// File name for one ticker's export: `{SYMBOL}_{period}_{interval}.{ext}`.
///
/// Index carets are dropped so the name stays portable (`^GSPC` -> `GSPC`).
pub fn export_file_name(symbol: &Symbol, params: QueryParameters, format: ExportFormat) -> String {
    format!(
        "{}_{}_{}.{}",
        symbol.as_str().trim_start_matches('^'),
        params.period,
        params.interval,
        format.extension()
    )
}

pub fn write_csv<W: Write>(series: &PriceSeries, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in &series.points {
        csv_writer.serialize(point)?;
    }
    if series.is_empty() {
        csv_writer.write_record(["timestamp", "close"])?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<PricePoint>, ExportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut points = Vec::new();
    for record in csv_reader.deserialize::<PricePoint>() {
        points.push(record?);
    }
    Ok(points)
}

pub fn write_json<W: Write>(series: &PriceSeries, mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, &series.points)?;
    writer.flush().map_err(serde_json::Error::io)?;
    Ok(())
}

pub fn read_json<R: Read>(reader: R) -> Result<Vec<PricePoint>, ExportError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write one series into `dir` and return the written path.
pub fn export_series(
    series: &PriceSeries,
    dir: &Path,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_file_name(&series.symbol, series.params, format));
    let file = File::create(&path).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    let writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => write_csv(series, writer),
        ExportFormat::Json => write_json(series, writer),
    }
    .map_err(|error| with_path(error, &path))?;

    tracing::info!(path = %path.display(), rows = series.len(), %format, "exported series");
    Ok(path)
}

/// Write every series of a table into `dir`, one file per ticker.
pub fn export_table(
    table: &PriceTable,
    dir: &Path,
    format: ExportFormat,
) -> Result<Vec<PathBuf>, ExportError> {
    table
        .iter()
        .map(|series| export_series(series, dir, format))
        .collect()
}

/// Report I/O failures surfaced by the encoders against the target file.
fn with_path(error: ExportError, path: &Path) -> ExportError {
    match error {
        ExportError::Csv(error) if error.is_io_error() => ExportError::Io {
            path: path.to_path_buf(),
            source: error.into(),
        },
        ExportError::Json(error) if error.is_io() => ExportError::Io {
            path: path.to_path_buf(),
            source: error.into(),
        },
        other => other,
    }
}
