//! Market data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over data sources (Yahoo Finance,
//! in-memory fixtures) so the dashboard can be driven offline in tests.

use thiserror::Error;
use tracing::debug;

use crate::domain::{PriceSeries, QuoteSnapshot};
use crate::range::DateRange;

/// Structured error types for provider requests.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("HTTP {status} from provider")]
    HttpStatus { status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("data error: {0}")]
    Other(String),
}

/// A provider request for one symbol failed.
///
/// History and quote failures are deliberately not told apart.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{source}")]
pub struct FetchFailure {
    pub symbol: String,
    #[source]
    pub source: DataError,
}

impl FetchFailure {
    pub fn new(symbol: impl Into<String>, source: DataError) -> Self {
        Self {
            symbol: symbol.into(),
            source,
        }
    }
}

/// Trait for market data providers (Yahoo Finance, in-memory fixtures).
pub trait MarketDataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for a symbol. An empty series is a valid answer.
    fn history(&self, symbol: &str, range: DateRange) -> Result<PriceSeries, DataError>;

    /// Fetch the descriptive/quote snapshot for a symbol.
    fn quote(&self, symbol: &str) -> Result<QuoteSnapshot, DataError>;
}

/// Both halves of one symbol's market data.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerData {
    pub series: PriceSeries,
    pub snapshot: QuoteSnapshot,
}

/// Fetch history and snapshot for one symbol.
///
/// Both requests are issued before the caller looks at the series, so a
/// snapshot failure fails the symbol even when the series would be empty.
pub fn fetch_ticker(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    range: DateRange,
) -> Result<TickerData, FetchFailure> {
    debug!(provider = provider.name(), symbol, %range, "fetching ticker");
    let series = provider
        .history(symbol, range)
        .map_err(|e| FetchFailure::new(symbol, e))?;
    let snapshot = provider
        .quote(symbol)
        .map_err(|e| FetchFailure::new(symbol, e))?;
    Ok(TickerData { series, snapshot })
}
