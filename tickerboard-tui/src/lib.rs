//! Tickerboard TUI - terminal watchlist dashboard
//!
//! A ticker text field and a lookback slider drive the dashboard; every
//! applied change reruns the whole pipeline and redraws:
//! - Header, price metrics and sector caption per ticker
//! - Candlestick chart over the lookback window
//! - Forward P/E valuation note
//! - Per-ticker warnings and errors that never stop the other tickers

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::{AppState, Focus};
pub use input::handle_key;
pub use theme::Theme;
