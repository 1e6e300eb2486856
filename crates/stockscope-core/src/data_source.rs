//! Price source trait and request/error types.
//!
//! A [`PriceSource`] turns a [`FetchRequest`] (tickers plus the resolved
//! period/interval) into a [`PriceTable`]. Implementations:
//!
//! | Source | Description |
//! |--------|-------------|
//! | [`YahooAdapter`](crate::YahooAdapter) | Yahoo Finance chart endpoint over HTTP |
//! | [`SyntheticSource`](crate::SyntheticSource) | Deterministic offline series |
//!
//! # Example
//!
//! ```rust,ignore
//! use stockscope_core::{resolve, FetchRequest, PriceSource, Symbol, YahooAdapter};
//!
//! async fn fetch(adapter: &YahooAdapter) -> Result<(), stockscope_core::SourceError> {
//!     let request = FetchRequest::new(vec![Symbol::parse("AAPL")?], resolve("1 Month"))?;
//!     let table = adapter.fetch(request).await?;
//!     for series in &table {
//!         println!("{}: {} points", series.symbol, series.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{PriceTable, QueryParameters, Symbol, ValidationError};

/// Identifier of a price source, reported alongside fetched data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    Yahoo,
    Synthetic,
}

impl SourceId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Synthetic => "synthetic",
        }
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// The provider returned no data for the ticker.
    InvalidTicker,
    /// Network or upstream failure.
    Transport,
    RateLimited,
    InvalidRequest,
    Internal,
}

/// Structured error returned by price sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    symbol: Option<Symbol>,
}

impl SourceError {
    pub fn invalid_ticker(symbol: &Symbol) -> Self {
        Self {
            kind: SourceErrorKind::InvalidTicker,
            message: format!("no price data found for '{symbol}'; the ticker may be invalid or delisted"),
            symbol: Some(symbol.clone()),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
            symbol: None,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            symbol: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            symbol: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            symbol: None,
        }
    }

    /// Attach the ticker being fetched when the error occurred.
    pub fn for_symbol(mut self, symbol: &Symbol) -> Self {
        self.symbol = Some(symbol.clone());
        self
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::InvalidTicker => "source.invalid_ticker",
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.symbol {
            Some(symbol) if self.kind != SourceErrorKind::InvalidTicker => {
                write!(f, "{symbol}: {} ({})", self.message, self.code())
            }
            _ => write!(f, "{} ({})", self.message, self.code()),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<ValidationError> for SourceError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

/// Request payload for a price fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub symbols: Vec<Symbol>,
    pub params: QueryParameters,
}

impl FetchRequest {
    /// Build a request; duplicate symbols are dropped keeping the first occurrence.
    pub fn new(symbols: Vec<Symbol>, params: QueryParameters) -> Result<Self, SourceError> {
        if symbols.is_empty() {
            return Err(SourceError::invalid_request(
                "fetch request must include at least one symbol",
            ));
        }

        let mut unique: Vec<Symbol> = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            if !unique.contains(&symbol) {
                unique.push(symbol);
            }
        }

        Ok(Self {
            symbols: unique,
            params,
        })
    }
}

/// Historical price source contract.
///
/// Implementations fetch every requested ticker and return one series per
/// ticker in request order. A ticker without data fails the whole request
/// with [`SourceErrorKind::InvalidTicker`].
pub trait PriceSource: Send + Sync {
    /// Returns the source identifier.
    fn id(&self) -> SourceId;

    /// Fetches closing prices for every symbol in the request.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if:
    /// - a ticker yields no data
    /// - the transport fails or the provider rate limits the call
    /// - the provider response cannot be parsed
    fn fetch<'a>(
        &'a self,
        req: FetchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceTable, SourceError>> + Send + 'a>>;
}
