//! Watchlist input parsing and the lookback window.

use serde::{Deserialize, Serialize};

/// Ticker text shown when nothing else is configured.
pub const DEFAULT_TICKERS: &str = "BBAI, PLTR, AI";

/// Ordered ticker symbols parsed from free text.
///
/// Repeated symbols are kept: entering `AAPL, aapl` yields two entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    /// Split on commas, trim each piece, drop blanks, upper-case the rest.
    pub fn parse(input: &str) -> Self {
        let symbols = input
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_uppercase)
            .collect();
        Self { symbols }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

/// Number of calendar days to look back, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct LookbackDays(u16);

impl LookbackDays {
    pub const MIN: u16 = 7;
    pub const MAX: u16 = 180;
    pub const DEFAULT: u16 = 30;

    /// Clamp any integer into the allowed window.
    pub fn new(days: i64) -> Self {
        Self(days.clamp(Self::MIN as i64, Self::MAX as i64) as u16)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Move by `delta` days, staying inside the window.
    pub fn step(self, delta: i64) -> Self {
        Self::new(self.0 as i64 + delta)
    }
}

impl Default for LookbackDays {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<i64> for LookbackDays {
    fn from(days: i64) -> Self {
        Self::new(days)
    }
}

impl From<LookbackDays> for i64 {
    fn from(days: LookbackDays) -> Self {
        days.0 as i64
    }
}

impl std::fmt::Display for LookbackDays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything one dashboard run reads from the input widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardInput {
    pub watchlist: Watchlist,
    pub lookback: LookbackDays,
}

impl DashboardInput {
    /// Read the raw widget values: ticker text and slider position.
    pub fn read(ticker_text: &str, slider_days: i64) -> Self {
        Self {
            watchlist: Watchlist::parse(ticker_text),
            lookback: LookbackDays::new(slider_days),
        }
    }
}
