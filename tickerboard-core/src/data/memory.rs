//! In-memory provider with fixed responses per symbol.
//!
//! Used by tests and by `--demo` mode, where no network access is wanted.

use std::collections::HashMap;

use chrono::{Datelike, Weekday};

use super::provider::{DataError, MarketDataProvider};
use crate::domain::{DailyBar, PriceSeries, QuoteSnapshot};
use crate::range::DateRange;

#[derive(Debug, Clone)]
enum Scripted {
    Data {
        bars: Vec<DailyBar>,
        snapshot: QuoteSnapshot,
    },
    Synthetic(QuoteSnapshot),
    HistoryError(DataError),
    QuoteError {
        bars: Vec<DailyBar>,
        error: DataError,
    },
}

/// Provider answering from a symbol → response table.
///
/// Symbols not in the table answer `SymbolNotFound`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    entries: HashMap<String, Scripted>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bars and a snapshot for a symbol.
    pub fn with_symbol(mut self, symbol: &str, bars: Vec<DailyBar>, snapshot: QuoteSnapshot) -> Self {
        self.entries
            .insert(symbol.to_uppercase(), Scripted::Data { bars, snapshot });
        self
    }

    /// Register a snapshot whose bars are generated for whatever range is asked.
    pub fn with_synthetic_symbol(mut self, symbol: &str, snapshot: QuoteSnapshot) -> Self {
        self.entries
            .insert(symbol.to_uppercase(), Scripted::Synthetic(snapshot));
        self
    }

    /// Make the history request for a symbol fail.
    pub fn with_history_error(mut self, symbol: &str, error: DataError) -> Self {
        self.entries
            .insert(symbol.to_uppercase(), Scripted::HistoryError(error));
        self
    }

    /// Serve history for a symbol but fail its quote request.
    pub fn with_quote_error(mut self, symbol: &str, bars: Vec<DailyBar>, error: DataError) -> Self {
        self.entries
            .insert(symbol.to_uppercase(), Scripted::QuoteError { bars, error });
        self
    }

    /// A small fixed universe with synthetic weekday bars, for `--demo`.
    ///
    /// Bars are generated relative to each request's range, so every lookback
    /// window shows data.
    pub fn demo() -> Self {
        Self::new()
            .with_synthetic_symbol(
                "BBAI",
                QuoteSnapshot {
                    short_name: Some("BigBear.ai Holdings, Inc.".into()),
                    current_price: Some(3.42),
                    fifty_two_week_high: Some(10.36),
                    market_cap: Some(862_000_000.0),
                    sector: Some("Technology".into()),
                    industry: Some("Information Technology Services".into()),
                    forward_pe: None,
                },
            )
            .with_synthetic_symbol(
                "PLTR",
                QuoteSnapshot {
                    short_name: Some("Palantir Technologies Inc.".into()),
                    current_price: Some(41.73),
                    fifty_two_week_high: Some(45.12),
                    market_cap: Some(94_650_000_000.0),
                    sector: Some("Technology".into()),
                    industry: Some("Software - Infrastructure".into()),
                    forward_pe: Some(104.32),
                },
            )
            .with_synthetic_symbol(
                "AI",
                QuoteSnapshot {
                    short_name: Some("C3.ai, Inc.".into()),
                    current_price: Some(24.18),
                    fifty_two_week_high: Some(37.11),
                    market_cap: Some(3_010_000_000.0),
                    sector: Some("Technology".into()),
                    industry: Some("Software - Application".into()),
                    forward_pe: Some(18.4),
                },
            )
    }

    fn synthetic_bars(symbol: &str, range: DateRange) -> Vec<DailyBar> {
        let seed: u32 = symbol.bytes().map(u32::from).sum();
        let mut price = 10.0 + (seed % 90) as f64;
        let mut bars = Vec::new();
        for (i, date) in range.start.iter_days().take_while(|d| *d <= range.end).enumerate() {
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }
            let wave = ((i as f64 + seed as f64) * 0.7).sin();
            let open = price;
            let close = (price * (1.0 + 0.02 * wave)).max(0.5);
            bars.push(DailyBar {
                date,
                open,
                high: open.max(close) * 1.01,
                low: open.min(close) * 0.99,
                close,
                volume: Some(1_000_000 + (i as u64) * 1_000),
            });
            price = close;
        }
        bars
    }
}

impl MarketDataProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn history(&self, symbol: &str, range: DateRange) -> Result<PriceSeries, DataError> {
        let bars = match self.entries.get(symbol) {
            Some(Scripted::Data { bars, .. }) | Some(Scripted::QuoteError { bars, .. }) => bars,
            Some(Scripted::Synthetic(_)) => {
                return Ok(PriceSeries::new(Self::synthetic_bars(symbol, range)))
            }
            Some(Scripted::HistoryError(e)) => return Err(e.clone()),
            None => {
                return Err(DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                })
            }
        };
        Ok(PriceSeries::new(
            bars.iter().filter(|b| range.contains(b.date)).cloned().collect(),
        ))
    }

    fn quote(&self, symbol: &str) -> Result<QuoteSnapshot, DataError> {
        match self.entries.get(symbol) {
            Some(Scripted::Data { snapshot, .. }) | Some(Scripted::Synthetic(snapshot)) => {
                Ok(snapshot.clone())
            }
            Some(Scripted::QuoteError { error, .. }) | Some(Scripted::HistoryError(error)) => {
                Err(error.clone())
            }
            None => Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range() -> DateRange {
        DateRange {
            start: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
        }
    }

    fn bar(y: i32, m: u32, d: u32) -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: None,
        }
    }

    #[test]
    fn unknown_symbol_is_not_found() {
        let provider = InMemoryProvider::new();
        assert_eq!(
            provider.history("XYZ", range()),
            Err(DataError::SymbolNotFound { symbol: "XYZ".into() })
        );
    }

    #[test]
    fn history_is_clipped_to_range() {
        let provider = InMemoryProvider::new().with_symbol(
            "SPY",
            vec![bar(2024, 6, 2), bar(2024, 6, 3), bar(2024, 6, 14), bar(2024, 6, 15)],
            QuoteSnapshot::default(),
        );
        let series = provider.history("SPY", range()).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn quote_error_still_serves_history() {
        let provider = InMemoryProvider::new().with_quote_error(
            "SPY",
            vec![bar(2024, 6, 4)],
            DataError::Other("boom".into()),
        );
        assert_eq!(provider.history("SPY", range()).unwrap().len(), 1);
        assert!(provider.quote("SPY").is_err());
    }

    #[test]
    fn demo_symbols_have_weekday_bars() {
        let provider = InMemoryProvider::demo();
        let series = provider.history("PLTR", range()).unwrap();
        // 2024-06-03 (Mon) through 2024-06-14 (Fri): two trading weeks.
        assert_eq!(series.len(), 10);
        assert!(series.bars().iter().all(DailyBar::is_finite));
        assert!(provider.quote("AI").unwrap().forward_pe.is_some());
    }
}
