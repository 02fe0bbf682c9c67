//! Yahoo Finance data provider.
//!
//! Daily bars come from the v8 chart API. The quote snapshot comes from the
//! v10 quoteSummary API, which needs a session cookie plus a "crumb" token;
//! the provider performs that handshake lazily on the first snapshot request.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.
//! Requests are not retried: a failure goes straight back to the caller.

use std::sync::Mutex;
use std::time::Duration;

use chrono::NaiveTime;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use super::provider::{DataError, MarketDataProvider};
use crate::domain::{DailyBar, PriceSeries, QuoteSnapshot};
use crate::range::DateRange;

const CHART_BASE: &str = "https://query2.finance.yahoo.com/v8/finance/chart";
const SUMMARY_BASE: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query2.finance.yahoo.com/v1/test/getcrumb";
const SUMMARY_MODULES: &str = "price,summaryDetail,summaryProfile,defaultKeyStatistics";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance v10 quoteSummary API response.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: SummaryResult,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    result: Option<Vec<SummaryModules>>,
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SummaryModules {
    price: PriceModule,
    summary_detail: SummaryDetailModule,
    summary_profile: SummaryProfileModule,
    default_key_statistics: KeyStatisticsModule,
}

/// Numeric fields arrive as `{"raw": 1.0, "fmt": "1.00"}`, or `{}` when missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawValue {
    raw: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PriceModule {
    short_name: Option<String>,
    regular_market_price: Option<RawValue>,
    market_cap: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SummaryDetailModule {
    fifty_two_week_high: Option<RawValue>,
    #[serde(rename = "forwardPE")]
    forward_pe: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SummaryProfileModule {
    sector: Option<String>,
    industry: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KeyStatisticsModule {
    #[serde(rename = "forwardPE")]
    forward_pe: Option<RawValue>,
}

fn raw(value: Option<RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw).filter(|v| v.is_finite())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    crumb: Mutex<Option<String>>,
}

impl YahooProvider {
    pub fn new() -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .cookie_store(true)
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            crumb: Mutex::new(None),
        })
    }

    /// Append `symbol` to `base` as a single percent-encoded path segment.
    fn symbol_url(base: &str, symbol: &str) -> Result<Url, DataError> {
        let mut url = Url::parse(base)
            .map_err(|e| DataError::Other(format!("bad endpoint {base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| DataError::Other(format!("endpoint {base} cannot take a path")))?
            .push(symbol);
        Ok(url)
    }

    /// Build the chart API URL for a symbol and date range.
    ///
    /// The window runs from midnight UTC on `start` to the last second of `end`.
    fn chart_url(symbol: &str, range: DateRange) -> Result<Url, DataError> {
        let start_ts = range.start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let end_ts = range.end.and_time(NaiveTime::MIN).and_utc().timestamp() + 86_399;
        let mut url = Self::symbol_url(CHART_BASE, symbol)?;
        url.query_pairs_mut()
            .append_pair("period1", &start_ts.to_string())
            .append_pair("period2", &end_ts.to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history");
        Ok(url)
    }

    fn summary_url(symbol: &str, crumb: &str) -> Result<Url, DataError> {
        let mut url = Self::symbol_url(SUMMARY_BASE, symbol)?;
        url.query_pairs_mut()
            .append_pair("modules", SUMMARY_MODULES)
            .append_pair("crumb", crumb);
        Ok(url)
    }

    fn api_error(symbol: &str, err: ApiError) -> DataError {
        if err.code == "Not Found" {
            DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            }
        } else {
            DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
        }
    }

    /// Parse the chart API response into bars inside `range`.
    ///
    /// A result without timestamps is a valid symbol with no trading days in
    /// the window, so it yields an empty series rather than an error.
    fn parse_chart(symbol: &str, range: DateRange, resp: ChartResponse) -> Result<PriceSeries, DataError> {
        let result = match (resp.chart.result, resp.chart.error) {
            (_, Some(err)) => return Err(Self::api_error(symbol, err)),
            (Some(result), None) => result,
            (None, None) => {
                return Err(DataError::ResponseFormatChanged(
                    "empty result with no error".into(),
                ))
            }
        };

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let Some(timestamps) = data.timestamp else {
            return Ok(PriceSeries::empty());
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            // A candle needs all four prices; partial rows are holidays or halts.
            let (Some(open), Some(high), Some(low), Some(close)) = (open, high, low, close) else {
                continue;
            };
            if !range.contains(date) {
                continue;
            }

            bars.push(DailyBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        Ok(PriceSeries::new(bars))
    }

    /// Parse the quoteSummary response into a snapshot.
    fn parse_summary(symbol: &str, resp: SummaryResponse) -> Result<QuoteSnapshot, DataError> {
        let result = match (resp.quote_summary.result, resp.quote_summary.error) {
            (_, Some(err)) => return Err(Self::api_error(symbol, err)),
            (Some(result), None) => result,
            (None, None) => {
                return Err(DataError::ResponseFormatChanged(
                    "empty result with no error".into(),
                ))
            }
        };

        let modules = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })?;

        let forward_pe = raw(modules.default_key_statistics.forward_pe)
            .or_else(|| raw(modules.summary_detail.forward_pe));

        Ok(QuoteSnapshot {
            short_name: non_blank(modules.price.short_name),
            current_price: raw(modules.price.regular_market_price),
            fifty_two_week_high: raw(modules.summary_detail.fifty_two_week_high),
            market_cap: raw(modules.price.market_cap),
            sector: non_blank(modules.summary_profile.sector),
            industry: non_blank(modules.summary_profile.industry),
            forward_pe,
        })
    }

    fn send(&self, url: &str) -> Result<reqwest::blocking::Response, DataError> {
        debug!(url, "GET");
        self.client
            .get(url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))
    }

    /// Return the session crumb, performing the cookie handshake if needed.
    fn crumb(&self, refresh: bool) -> Result<String, DataError> {
        let mut guard = self
            .crumb
            .lock()
            .map_err(|_| DataError::Other("crumb lock poisoned".into()))?;
        if !refresh {
            if let Some(crumb) = guard.as_ref() {
                return Ok(crumb.clone());
            }
        }

        // The cookie endpoint answers 404 but still sets the session cookie.
        self.send(COOKIE_URL)?;
        let resp = self.send(CRUMB_URL)?;
        if !resp.status().is_success() {
            return Err(DataError::AuthenticationRequired(format!(
                "crumb request returned HTTP {}",
                resp.status()
            )));
        }
        let crumb = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?
            .trim()
            .to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(DataError::AuthenticationRequired(
                "Yahoo Finance did not issue a crumb".into(),
            ));
        }

        *guard = Some(crumb.clone());
        Ok(crumb)
    }

    fn check_status(symbol: &str, status: reqwest::StatusCode) -> Result<(), DataError> {
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(DataError::AuthenticationRequired(
                "Yahoo Finance rejected the session".into(),
            ));
        }
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

impl YahooProvider {
    /// A body that did not decode. A 404 still means the symbol is unknown.
    fn undecodable(
        symbol: &str,
        status: reqwest::StatusCode,
        what: &str,
        err: impl std::fmt::Display,
    ) -> DataError {
        match Self::check_status(symbol, status) {
            Err(status_err) => status_err,
            Ok(()) => DataError::ResponseFormatChanged(format!(
                "failed to parse {what} for {symbol}: {err}"
            )),
        }
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn history(&self, symbol: &str, range: DateRange) -> Result<PriceSeries, DataError> {
        let resp = self.send(Self::chart_url(symbol, range)?.as_str())?;
        let status = resp.status();
        // Unknown symbols come back as 404 with a JSON error body.
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            Self::check_status(symbol, status)?;
        }

        let chart: ChartResponse = match resp.json() {
            Ok(chart) => chart,
            Err(e) => return Err(Self::undecodable(symbol, status, "chart", e)),
        };
        Self::parse_chart(symbol, range, chart)
    }

    fn quote(&self, symbol: &str) -> Result<QuoteSnapshot, DataError> {
        let mut resp = self.send(Self::summary_url(symbol, &self.crumb(false)?)?.as_str())?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            warn!(symbol, "quote session expired, refreshing crumb");
            resp = self.send(Self::summary_url(symbol, &self.crumb(true)?)?.as_str())?;
        }

        let status = resp.status();
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            Self::check_status(symbol, status)?;
        }

        let summary: SummaryResponse = match resp.json() {
            Ok(summary) => summary,
            Err(e) => return Err(Self::undecodable(symbol, status, "quote", e)),
        };
        Self::parse_summary(symbol, summary)
    }
}
