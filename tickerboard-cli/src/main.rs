//! Tickerboard CLI - print the watchlist dashboard as text.
//!
//! Commands:
//! - `show` - run the dashboard once and print the report (or JSON)
//! - `settings` - print the effective settings and where they came from

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tickerboard_core::data::{InMemoryProvider, MarketDataProvider, YahooProvider};
use tickerboard_core::{run_dashboard, DashboardInput, Settings, TextReport};

#[derive(Parser)]
#[command(
    name = "tickerboard",
    about = "Tickerboard CLI: multi-ticker stock dashboard",
    version
)]
struct Cli {
    /// Settings file (default: <config_dir>/tickerboard/settings.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every ticker and print one block per symbol.
    Show {
        /// Comma-separated tickers (e.g. "aapl, msft"). Defaults to the settings file.
        #[arg(long)]
        tickers: Option<String>,

        /// Lookback in days, clamped to 7..=180. Defaults to the settings file.
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,

        /// End of the window (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        today: Option<String>,

        /// Use built-in synthetic data instead of Yahoo Finance.
        #[arg(long, default_value_t = false)]
        demo: bool,

        /// Print the dashboard as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the effective settings as TOML.
    Settings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let settings = Settings::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Show {
            tickers,
            days,
            today,
            demo,
            json,
        } => run_show(&settings, tickers, days, today, demo, json),
        Commands::Settings => run_settings(&settings, cli.config),
    }
}

/// Stderr logging; `RUST_LOG` overrides the default `warn` filter.
fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
}

/// Merge command-line overrides over the settings-file values.
fn build_input(settings: &Settings, tickers: Option<&str>, days: Option<i64>) -> DashboardInput {
    let text = tickers.unwrap_or(&settings.watchlist.tickers);
    let days = days.unwrap_or_else(|| i64::from(settings.watchlist.days.get()));
    DashboardInput::read(text, days)
}

fn parse_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid --today {s:?}, expected YYYY-MM-DD")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn run_show(
    settings: &Settings,
    tickers: Option<String>,
    days: Option<i64>,
    today: Option<String>,
    demo: bool,
    json: bool,
) -> Result<()> {
    let input = build_input(settings, tickers.as_deref(), days);
    let today = parse_today(today.as_deref())?;
    debug!(%today, demo, symbols = input.watchlist.len(), "show");

    let provider: Box<dyn MarketDataProvider> = if demo {
        Box::new(InMemoryProvider::demo())
    } else {
        Box::new(YahooProvider::new().context("failed to build HTTP client")?)
    };

    let dashboard = run_dashboard(provider.as_ref(), &input, today, settings.render_options());

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print!("{}", TextReport.generate(&dashboard));
    }
    Ok(())
}

fn run_settings(settings: &Settings, explicit: Option<PathBuf>) -> Result<()> {
    match explicit.or_else(Settings::default_path) {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no config directory; using defaults"),
    }
    print!("{}", toml::to_string_pretty(settings)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_flags_parse() {
        let cli = Cli::try_parse_from([
            "tickerboard",
            "show",
            "--tickers",
            "spy, qqq",
            "--days",
            "90",
            "--today",
            "2024-06-30",
            "--demo",
        ])
        .unwrap();
        match cli.command {
            Commands::Show {
                tickers,
                days,
                today,
                demo,
                json,
            } => {
                assert_eq!(tickers.as_deref(), Some("spy, qqq"));
                assert_eq!(days, Some(90));
                assert_eq!(today.as_deref(), Some("2024-06-30"));
                assert!(demo);
                assert!(!json);
            }
            Commands::Settings => panic!("expected show"),
        }
    }

    #[test]
    fn config_is_global() {
        let cli = Cli::try_parse_from(["tickerboard", "settings", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn overrides_win_over_settings() {
        let settings = Settings::default();
        let input = build_input(&settings, Some("msft"), Some(500));
        assert_eq!(input.watchlist.symbols(), ["MSFT"]);
        assert_eq!(input.lookback.get(), 180);

        let input = build_input(&settings, None, None);
        assert_eq!(input.watchlist.symbols(), ["BBAI", "PLTR", "AI"]);
        assert_eq!(input.lookback.get(), 30);
    }

    #[test]
    fn negative_days_clamp_to_minimum() {
        let cli = Cli::try_parse_from(["tickerboard", "show", "--days", "-5"]).unwrap();
        let Commands::Show { days, .. } = cli.command else {
            panic!("expected show");
        };
        assert_eq!(build_input(&Settings::default(), None, days).lookback.get(), 7);
    }

    #[test]
    fn bad_today_is_an_error() {
        assert!(parse_today(Some("30/06/2024")).is_err());
        assert_eq!(
            parse_today(Some("2024-06-30")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
        );
    }
}
