//! Market data providers.

pub mod memory;
pub mod provider;
pub mod yahoo;

pub use memory::InMemoryProvider;
pub use provider::{fetch_ticker, DataError, FetchFailure, MarketDataProvider, TickerData};
pub use yahoo::YahooProvider;
