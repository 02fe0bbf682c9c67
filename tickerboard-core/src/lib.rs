//! Tickerboard Core: watchlist parsing, market data, per-ticker panels.
//!
//! This crate holds everything a dashboard run needs apart from drawing:
//! - Watchlist and lookback parsing from raw widget values
//! - Date window resolution
//! - Market data providers (Yahoo Finance, in-memory fixtures)
//! - Per-ticker panel rendering into a UI-agnostic model
//! - The per-symbol isolate-and-continue pipeline
//! - A plain-text report and TOML settings

pub mod dashboard;
pub mod data;
pub mod domain;
pub mod panel;
pub mod range;
pub mod report;
pub mod settings;
pub mod watchlist;

pub use dashboard::{run_dashboard, Dashboard, TickerError, TickerOutcome};
pub use domain::{DailyBar, PriceSeries, QuoteSnapshot};
pub use panel::{Notice, RenderOptions, Severity, TickerPanel};
pub use range::DateRange;
pub use report::TextReport;
pub use settings::Settings;
pub use watchlist::{DashboardInput, LookbackDays, Watchlist};
