//! Per-ticker panel rendering.
//!
//! Turns a symbol's quote snapshot and price series into a UI-agnostic
//! [`TickerPanel`]: header, three metrics, a sector caption, a candlestick
//! chart description and a valuation notice. The TUI and the text report
//! both draw from this model.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{DailyBar, PriceSeries, QuoteSnapshot};

/// Forward P/E strictly below this triggers the valuation alert.
pub const VALUATION_ALERT_PE: f64 = 20.0;

/// Chart height in terminal rows when settings don't override it.
pub const DEFAULT_CHART_HEIGHT: u16 = 16;

/// Notice severity, mapped to colours by the front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// A one-line message with a severity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    /// Valuation note for an optional forward P/E. Zero and non-finite values count as missing.
    pub fn valuation(forward_pe: Option<f64>) -> Self {
        match forward_pe.filter(|pe| pe.is_finite() && *pe != 0.0) {
            None => Self::new(Severity::Warning, "No forward PE data available"),
            Some(pe) if pe < VALUATION_ALERT_PE => Self::new(
                Severity::Success,
                format!("Valuation Alert: Forward PE < 20 ({pe:.2})"),
            ),
            Some(pe) => Self::new(Severity::Info, format!("Forward PE: {pe:.2}")),
        }
    }

    pub fn no_history(symbol: &str) -> Self {
        Self::new(
            Severity::Warning,
            format!("No historical data found for {symbol}"),
        )
    }

    pub fn load_error(symbol: &str, message: &str) -> Self {
        Self::new(Severity::Error, format!("Error loading {symbol}: {message}"))
    }
}

/// A labelled summary value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

/// Everything a front end needs to draw the candlestick chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleChart {
    pub title: String,
    pub y_axis_title: &'static str,
    pub height: u16,
    pub bars: Vec<DailyBar>,
}

impl CandleChart {
    pub fn up_count(&self) -> usize {
        self.bars.iter().filter(|b| b.is_increasing()).count()
    }

    pub fn down_count(&self) -> usize {
        self.bars.len() - self.up_count()
    }

    /// Lowest low and highest high across all bars.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        if self.bars.is_empty() {
            return None;
        }
        let low = self.bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let high = self
            .bars
            .iter()
            .map(|b| b.high)
            .fold(f64::NEG_INFINITY, f64::max);
        Some((low, high))
    }

    /// Price bounds padded by 5% of the range, or by 1.0 for a flat series.
    pub fn padded_bounds(&self) -> Option<(f64, f64)> {
        let (low, high) = self.price_bounds()?;
        let range = high - low;
        let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
        Some((low - pad, high + pad))
    }
}

/// Map a price to a row in a plot `rows` tall (0 = top).
pub fn price_to_row(price: f64, lower: f64, upper: f64, rows: u16) -> u16 {
    if (upper - lower).abs() < 1e-9 || rows == 0 {
        return 0;
    }
    let frac = (price - lower) / (upper - lower);
    let y = rows.saturating_sub(1) as f64 * (1.0 - frac);
    y.round().max(0.0).min(rows.saturating_sub(1) as f64) as u16
}

/// A fully rendered ticker block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerPanel {
    pub symbol: String,
    pub header: String,
    pub metrics: [Metric; 3],
    pub caption: String,
    pub chart: CandleChart,
    pub valuation: Notice,
}

/// What the renderer produced for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Rendered {
    Panel(Box<TickerPanel>),
    /// Valid symbol, no bars in range: only a warning is shown.
    NoHistory(Notice),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("bar on {date} has a non-finite price")]
    NonFiniteBar { date: NaiveDate },
}

/// Render options that come from settings rather than data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub chart_height: u16,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            chart_height: DEFAULT_CHART_HEIGHT,
        }
    }
}

/// `$1234.50`. Missing values show as zero.
pub fn format_currency(value: Option<f64>) -> String {
    format!("${:.2}", value.unwrap_or(0.0))
}

/// `$94.65B`. Missing values show as zero.
pub fn format_billions(value: Option<f64>) -> String {
    format!("${:.2}B", value.unwrap_or(0.0) / 1e9)
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

/// Render one symbol's block.
///
/// An empty series short-circuits to the no-history warning; no metrics,
/// chart or valuation note are produced for it.
pub fn render_ticker(
    symbol: &str,
    snapshot: &QuoteSnapshot,
    series: &PriceSeries,
    options: RenderOptions,
) -> Result<Rendered, RenderError> {
    if series.is_empty() {
        return Ok(Rendered::NoHistory(Notice::no_history(symbol)));
    }

    if let Some(bad) = series.bars().iter().find(|b| !b.is_finite()) {
        return Err(RenderError::NonFiniteBar { date: bad.date });
    }

    let header = match snapshot.short_name.as_deref() {
        Some(name) => format!("{symbol} — {name}"),
        None => symbol.to_string(),
    };

    let metrics = [
        Metric {
            label: "Current Price",
            value: format_currency(snapshot.current_price),
        },
        Metric {
            label: "52-Week High",
            value: format_currency(snapshot.fifty_two_week_high),
        },
        Metric {
            label: "Market Cap",
            value: format_billions(snapshot.market_cap),
        },
    ];

    let caption = format!(
        "Sector: {} | Industry: {}",
        or_na(snapshot.sector.as_deref()),
        or_na(snapshot.industry.as_deref())
    );

    let chart = CandleChart {
        title: format!("{symbol} Candlestick Chart"),
        y_axis_title: "Price (USD)",
        height: options.chart_height,
        bars: series.bars().to_vec(),
    };

    Ok(Rendered::Panel(Box::new(TickerPanel {
        symbol: symbol.to_string(),
        header,
        metrics,
        caption,
        chart,
        valuation: Notice::valuation(snapshot.forward_pe),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars() -> PriceSeries {
        PriceSeries::new(vec![
            DailyBar {
                date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                open: 10.0,
                high: 11.0,
                low: 9.0,
                close: 10.5,
                volume: Some(100),
            },
            DailyBar {
                date: NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
                open: 10.5,
                high: 10.8,
                low: 9.7,
                close: 9.9,
                volume: Some(120),
            },
        ])
    }

    fn panel(snapshot: &QuoteSnapshot) -> TickerPanel {
        match render_ticker("PLTR", snapshot, &bars(), RenderOptions::default()).unwrap() {
            Rendered::Panel(p) => *p,
            other => panic!("expected panel, got {other:?}"),
        }
    }

    #[test]
    fn valuation_below_threshold_is_alert() {
        let note = Notice::valuation(Some(18.40));
        assert_eq!(note.severity, Severity::Success);
        assert_eq!(note.text, "Valuation Alert: Forward PE < 20 (18.40)");
    }

    #[test]
    fn zero_forward_pe_counts_as_missing() {
        for pe in [0.0, -0.0] {
            let note = Notice::valuation(Some(pe));
            assert_eq!(note.severity, Severity::Warning);
            assert_eq!(note.text, "No forward PE data available");
        }
        let note = Notice::valuation(Some(-3.5));
        assert_eq!(note.severity, Severity::Success);
    }

    #[test]
    fn valuation_at_or_above_threshold_is_info() {
        let note = Notice::valuation(Some(25.0));
        assert_eq!(note.severity, Severity::Info);
        assert_eq!(note.text, "Forward PE: 25.00");

        let edge = Notice::valuation(Some(20.0));
        assert_eq!(edge.severity, Severity::Info);
        assert_eq!(edge.text, "Forward PE: 20.00");
    }

    #[test]
    fn valuation_missing_is_warning() {
        let note = Notice::valuation(None);
        assert_eq!(note.severity, Severity::Warning);
        assert_eq!(note.text, "No forward PE data available");
        assert_eq!(Notice::valuation(Some(f64::NAN)), note);
    }

    #[test]
    fn currency_and_billions_formatting() {
        assert_eq!(format_currency(Some(41.734)), "$41.73");
        assert_eq!(format_currency(None), "$0.00");
        assert_eq!(format_billions(Some(94_650_000_000.0)), "$94.65B");
        assert_eq!(format_billions(None), "$0.00B");
    }

    #[test]
    fn full_snapshot_renders_every_section() {
        let p = panel(&QuoteSnapshot {
            short_name: Some("Palantir Technologies Inc.".into()),
            current_price: Some(41.73),
            fifty_two_week_high: Some(45.12),
            market_cap: Some(94_650_000_000.0),
            sector: Some("Technology".into()),
            industry: Some("Software - Infrastructure".into()),
            forward_pe: Some(104.32),
        });
        assert_eq!(p.header, "PLTR — Palantir Technologies Inc.");
        assert_eq!(p.metrics[0].value, "$41.73");
        assert_eq!(p.metrics[1].value, "$45.12");
        assert_eq!(p.metrics[2].value, "$94.65B");
        assert_eq!(p.caption, "Sector: Technology | Industry: Software - Infrastructure");
        assert_eq!(p.chart.title, "PLTR Candlestick Chart");
        assert_eq!(p.chart.height, DEFAULT_CHART_HEIGHT);
        assert_eq!(p.chart.bars.len(), 2);
        assert_eq!(p.valuation.text, "Forward PE: 104.32");
    }

    #[test]
    fn empty_snapshot_uses_placeholders() {
        let p = panel(&QuoteSnapshot::default());
        assert_eq!(p.header, "PLTR");
        assert!(p.metrics.iter().all(|m| m.value.starts_with("$0.00")));
        assert_eq!(p.caption, "Sector: N/A | Industry: N/A");
        assert_eq!(p.valuation.severity, Severity::Warning);
    }

    #[test]
    fn empty_series_short_circuits() {
        let rendered = render_ticker(
            "BBAI",
            &QuoteSnapshot::default(),
            &PriceSeries::empty(),
            RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(
            rendered,
            Rendered::NoHistory(Notice::new(
                Severity::Warning,
                "No historical data found for BBAI"
            ))
        );
    }

    #[test]
    fn non_finite_bar_fails_render() {
        let mut raw = bars().bars().to_vec();
        raw[1].high = f64::INFINITY;
        let err = render_ticker(
            "PLTR",
            &QuoteSnapshot::default(),
            &PriceSeries::new(raw),
            RenderOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RenderError::NonFiniteBar {
                date: NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()
            }
        );
    }

    #[test]
    fn chart_counts_and_bounds() {
        let p = panel(&QuoteSnapshot::default());
        assert_eq!(p.chart.up_count(), 1);
        assert_eq!(p.chart.down_count(), 1);
        assert_eq!(p.chart.price_bounds(), Some((9.0, 11.0)));
        let (lower, upper) = p.chart.padded_bounds().unwrap();
        assert!((lower - 8.9).abs() < 1e-9);
        assert!((upper - 11.1).abs() < 1e-9);
    }

    #[test]
    fn price_rows_run_top_down() {
        assert_eq!(price_to_row(11.0, 9.0, 11.0, 11), 0);
        assert_eq!(price_to_row(9.0, 9.0, 11.0, 11), 10);
        assert_eq!(price_to_row(10.0, 9.0, 11.0, 11), 5);
        assert_eq!(price_to_row(50.0, 9.0, 11.0, 11), 0);
        assert_eq!(price_to_row(10.0, 10.0, 10.0, 11), 0);
    }
}
