use std::future::Future;
use std::pin::Pin;

use crate::data_source::{FetchRequest, PriceSource, SourceError, SourceId};
use crate::{PricePoint, PriceSeries, PriceTable, QueryParameters, Symbol, UtcDateTime};

const INVALID_PREFIX: &str = "INVALID";

/// Offline source producing deterministic closes per symbol.
///
/// The series ends at the anchor timestamp and covers the requested period at
/// the requested interval. Symbols starting with `INVALID` behave like
/// unknown tickers.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticSource {
    anchor: UtcDateTime,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new(UtcDateTime::now())
    }
}

impl SyntheticSource {
    pub fn new(anchor: UtcDateTime) -> Self {
        Self { anchor }
    }

    fn series(&self, symbol: &Symbol, params: QueryParameters) -> Result<PriceSeries, SourceError> {
        if symbol.as_str().starts_with(INVALID_PREFIX) {
            return Err(SourceError::invalid_ticker(symbol));
        }

        let step = params.interval.duration();
        let count = (params.period.span().whole_seconds() / step.whole_seconds()).max(1);
        let seed = symbol_seed(symbol);
        let base = 40.0 + (seed % 400) as f64;
        let end = self.anchor.unix_timestamp();

        let mut points = Vec::with_capacity(count as usize);
        for index in 0..count {
            let seconds = end - (count - 1 - index) * step.whole_seconds();
            let timestamp = UtcDateTime::from_unix_timestamp(seconds)
                .map_err(|e| SourceError::internal(e.to_string()).for_symbol(symbol))?;
            let wave = (seed.wrapping_add(index as u64 * 7) % 37) as f64 / 4.0;
            let point = PricePoint::new(timestamp, base + wave)
                .map_err(|e| SourceError::internal(e.to_string()).for_symbol(symbol))?;
            points.push(point);
        }

        Ok(PriceSeries::new(symbol.clone(), params, points))
    }
}

impl PriceSource for SyntheticSource {
    fn id(&self) -> SourceId {
        SourceId::Synthetic
    }

    fn fetch<'a>(
        &'a self,
        req: FetchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceTable, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let series = req
                .symbols
                .iter()
                .map(|symbol| self.series(symbol, req.params))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(PriceTable::new(series))
        })
    }
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}
