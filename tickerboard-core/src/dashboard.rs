//! One dashboard run: watchlist in, ordered per-ticker outcomes out.
//!
//! Each symbol is fetched and rendered on its own; a failure is turned into
//! an error notice for that symbol and the loop moves on.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::data::{fetch_ticker, FetchFailure, MarketDataProvider};
use crate::panel::{render_ticker, Notice, RenderError, RenderOptions, Rendered, TickerPanel};
use crate::range::DateRange;
use crate::watchlist::DashboardInput;

/// Anything that can go wrong while producing one symbol's block.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TickerError {
    #[error(transparent)]
    Fetch(#[from] FetchFailure),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

/// Exactly one of these per watchlist entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TickerOutcome {
    Panel(Box<TickerPanel>),
    NoHistory { symbol: String, notice: Notice },
    Failed { symbol: String, notice: Notice },
}

impl TickerOutcome {
    pub fn symbol(&self) -> &str {
        match self {
            TickerOutcome::Panel(panel) => &panel.symbol,
            TickerOutcome::NoHistory { symbol, .. } | TickerOutcome::Failed { symbol, .. } => symbol,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TickerOutcome::Failed { .. })
    }
}

/// The result of one run, in watchlist order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub range: DateRange,
    pub outcomes: Vec<TickerOutcome>,
}

impl Dashboard {
    pub fn panel_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TickerOutcome::Panel(_)))
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}

/// Fetch and render a single symbol, propagating any failure.
pub fn load_ticker(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    range: DateRange,
    options: RenderOptions,
) -> Result<TickerOutcome, TickerError> {
    let data = fetch_ticker(provider, symbol, range)?;
    let outcome = match render_ticker(symbol, &data.snapshot, &data.series, options)? {
        Rendered::Panel(panel) => TickerOutcome::Panel(panel),
        Rendered::NoHistory(notice) => {
            warn!(symbol, %range, "no historical data in range");
            TickerOutcome::NoHistory {
                symbol: symbol.to_string(),
                notice,
            }
        }
    };
    Ok(outcome)
}

/// Run the whole pipeline for the given widget values and date.
///
/// Never fails: every symbol yields exactly one outcome.
pub fn run_dashboard(
    provider: &dyn MarketDataProvider,
    input: &DashboardInput,
    today: NaiveDate,
    options: RenderOptions,
) -> Dashboard {
    let range = DateRange::resolve(today, input.lookback);
    info!(
        provider = provider.name(),
        symbols = input.watchlist.len(),
        %range,
        "running dashboard"
    );

    let outcomes = input
        .watchlist
        .iter()
        .map(|symbol| {
            load_ticker(provider, symbol, range, options).unwrap_or_else(|e| {
                error!(symbol, error = %e, "ticker failed");
                TickerOutcome::Failed {
                    symbol: symbol.to_string(),
                    notice: Notice::load_error(symbol, &e.to_string()),
                }
            })
        })
        .collect();

    Dashboard { range, outcomes }
}
