use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{FetchRequest, PriceSource, SourceError, SourceId};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{PricePoint, PriceSeries, PriceTable, QueryParameters, Symbol, UtcDateTime};

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const REFERER: &str = "https://finance.yahoo.com/";

/// Yahoo Finance chart adapter.
///
/// Issues one chart request per ticker, sequentially, and keeps only the
/// closing prices.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    auth: HttpAuth,
    timeout_ms: u64,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new())).with_auth(HttpAuth::from_env())
    }
}

impl YahooAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            auth: HttpAuth::None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_auth(mut self, auth: HttpAuth) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch_series(
        &self,
        symbol: &Symbol,
        params: QueryParameters,
    ) -> Result<PriceSeries, SourceError> {
        let request = HttpRequest::get(chart_url(symbol, params))
            .with_header("referer", REFERER)
            .with_auth(&self.auth)
            .with_timeout_ms(self.timeout_ms);

        tracing::debug!(symbol = %symbol, url = %request.url, "requesting yahoo chart");
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| SourceError::transport(error.message()).for_symbol(symbol))?;

        let series = parse_chart(symbol, params, response.status, &response.body)?;
        tracing::info!(symbol = %symbol, points = series.len(), %params, "fetched yahoo chart");
        Ok(series)
    }
}

impl PriceSource for YahooAdapter {
    fn id(&self) -> SourceId {
        SourceId::Yahoo
    }

    fn fetch<'a>(
        &'a self,
        req: FetchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceTable, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let mut series = Vec::with_capacity(req.symbols.len());
            for symbol in &req.symbols {
                series.push(self.fetch_series(symbol, req.params).await?);
            }
            Ok(PriceTable::new(series))
        })
    }
}

fn chart_url(symbol: &Symbol, params: QueryParameters) -> String {
    format!(
        "{CHART_BASE_URL}/{}?range={}&interval={}",
        urlencoding::encode(symbol.as_str()),
        params.period,
        params.interval,
    )
}

/// Turn a chart response into a series, classifying provider failures.
fn parse_chart(
    symbol: &Symbol,
    params: QueryParameters,
    status: u16,
    body: &str,
) -> Result<PriceSeries, SourceError> {
    if status == 429 {
        return Err(SourceError::rate_limited("yahoo rate limited the chart request").for_symbol(symbol));
    }

    let parsed = serde_json::from_str::<YahooChartResponse>(body);

    if let Ok(YahooChartResponse {
        chart: YahooChartData {
            error: Some(error), ..
        },
    }) = &parsed
    {
        if error.code.eq_ignore_ascii_case("Not Found") {
            return Err(SourceError::invalid_ticker(symbol));
        }
        let detail = error.description.as_deref().unwrap_or(error.code.as_str());
        return Err(SourceError::invalid_request(format!("yahoo chart API error: {detail}")).for_symbol(symbol));
    }

    if !(200..300).contains(&status) {
        if status == 404 {
            return Err(SourceError::invalid_ticker(symbol));
        }
        return Err(SourceError::transport(format!("yahoo returned status {status}")).for_symbol(symbol));
    }

    let chart = parsed
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")).for_symbol(symbol))?
        .chart;

    let Some(result) = chart.result.unwrap_or_default().into_iter().next() else {
        return Err(SourceError::invalid_ticker(symbol));
    };
    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|quote| quote.close)
        .unwrap_or_default();

    let mut points = Vec::with_capacity(timestamps.len());
    for (seconds, close) in timestamps.into_iter().zip(closes) {
        let Some(close) = close else {
            continue;
        };
        let timestamp = UtcDateTime::from_unix_timestamp(seconds)
            .map_err(|e| SourceError::internal(e.to_string()).for_symbol(symbol))?;
        let point = PricePoint::new(timestamp, close).map_err(|e| {
            SourceError::internal(format!("yahoo returned an invalid close at {timestamp}: {e}"))
                .for_symbol(symbol)
        })?;
        points.push(point);
    }

    if points.is_empty() {
        return Err(SourceError::invalid_ticker(symbol));
    }

    Ok(PriceSeries::new(symbol.clone(), params, points))
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
