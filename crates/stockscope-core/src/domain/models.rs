use serde::{Deserialize, Serialize};

use crate::{QueryParameters, Symbol, UtcDateTime, ValidationError};

/// One closing price sample.
///
/// Deserialization goes through [`PricePoint::new`], so rows read back from
/// an export carry the same guarantees as freshly fetched ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPricePoint")]
pub struct PricePoint {
    pub timestamp: UtcDateTime,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: UtcDateTime, close: f64) -> Result<Self, ValidationError> {
        validate_non_negative("close", close)?;
        Ok(Self { timestamp, close })
    }
}

#[derive(Deserialize)]
struct RawPricePoint {
    timestamp: UtcDateTime,
    close: f64,
}

impl TryFrom<RawPricePoint> for PricePoint {
    type Error = ValidationError;

    fn try_from(raw: RawPricePoint) -> Result<Self, Self::Error> {
        Self::new(raw.timestamp, raw.close)
    }
}

/// Closing prices for one ticker, in the order the provider returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    pub params: QueryParameters,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: Symbol, params: QueryParameters, points: Vec<PricePoint>) -> Self {
        Self {
            symbol,
            params,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.close)
    }
}

/// Result of a multi-ticker fetch: one series per requested symbol, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    series: Vec<PriceSeries>,
}

impl PriceTable {
    pub fn new(series: Vec<PriceSeries>) -> Self {
        Self { series }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&PriceSeries> {
        self.series.iter().find(|series| &series.symbol == symbol)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceSeries> {
        self.series.iter()
    }

    pub fn symbols(&self) -> Vec<&Symbol> {
        self.series.iter().map(|series| &series.symbol).collect()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn into_series(self) -> Vec<PriceSeries> {
        self.series
    }
}

impl<'a> IntoIterator for &'a PriceTable {
    type Item = &'a PriceSeries;
    type IntoIter = std::slice::Iter<'a, PriceSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(input: &str) -> UtcDateTime {
        UtcDateTime::parse(input).expect("timestamp")
    }

    #[test]
    fn rejects_non_finite_close() {
        let err = PricePoint::new(ts("2024-01-01T00:00:00Z"), f64::NAN).expect_err("must fail");
        assert_eq!(err, ValidationError::NonFiniteValue { field: "close" });
    }

    #[test]
    fn rejects_negative_close() {
        let err = PricePoint::new(ts("2024-01-01T00:00:00Z"), -1.0).expect_err("must fail");
        assert_eq!(err, ValidationError::NegativeValue { field: "close" });
    }

    #[test]
    fn deserializing_enforces_close_invariants() {
        let valid: PricePoint =
            serde_json::from_str(r#"{"timestamp":"2024-01-01T00:00:00Z","close":12.5}"#)
                .expect("valid point");
        assert_eq!(valid.close, 12.5);

        let negative = serde_json::from_str::<PricePoint>(
            r#"{"timestamp":"2024-01-01T00:00:00Z","close":-5.0}"#,
        );
        let err = negative.expect_err("negative close must fail");
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn table_looks_up_series_by_symbol() {
        let aapl = Symbol::parse("AAPL").expect("symbol");
        let msft = Symbol::parse("MSFT").expect("symbol");
        let table = PriceTable::new(vec![
            PriceSeries::new(aapl.clone(), QueryParameters::default(), Vec::new()),
            PriceSeries::new(msft.clone(), QueryParameters::default(), Vec::new()),
        ]);

        assert_eq!(table.symbols(), vec![&aapl, &msft]);
        assert_eq!(table.get(&msft).map(|series| &series.symbol), Some(&msft));
        assert!(table.get(&Symbol::parse("TSLA").expect("symbol")).is_none());
    }
}
