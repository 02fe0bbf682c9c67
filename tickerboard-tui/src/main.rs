//! Tickerboard TUI - watchlist dashboard in the terminal.
//!
//! Layout:
//! 1. Sidebar - ticker text field, lookback slider, parsed watchlist
//! 2. Results - one block per ticker, scrollable
//! 3. Status bar - provider, key hints, last run summary

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tickerboard_core::data::{InMemoryProvider, MarketDataProvider, YahooProvider};
use tickerboard_core::Settings;
use tickerboard_tui::{handle_key, ui, AppState};

#[derive(Parser, Debug)]
#[command(name = "tickerboard-tui", about = "Terminal watchlist dashboard", version)]
struct Args {
    /// Settings file (default: <config_dir>/tickerboard/settings.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use built-in synthetic data instead of Yahoo Finance
    #[arg(long)]
    demo: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let settings = Settings::load_or_default(args.config.as_deref())?;
    let provider: Box<dyn MarketDataProvider> = if args.demo {
        Box::new(InMemoryProvider::demo())
    } else {
        Box::new(YahooProvider::new().context("failed to build HTTP client")?)
    };
    info!(provider = provider.name(), "starting");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = AppState::new(&settings, provider.name());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app, provider.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// File logging, only when `RUST_LOG` is set; stderr belongs to the alternate screen.
fn init_logging() -> Result<()> {
    let Ok(filter) = EnvFilter::try_from_default_env() else {
        return Ok(());
    };
    let dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tickerboard");
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join("tickerboard.log");
    let file = File::create(&path).with_context(|| format!("failed to open {}", path.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    provider: &dyn MarketDataProvider,
) -> Result<()> {
    loop {
        // 1. Rerun the pipeline if an input changed, showing a loading status first.
        if app.needs_refresh {
            let count = app.input().watchlist.len();
            app.set_status(format!("Loading {count} ticker(s)\u{2026}"));
            terminal.draw(|f| ui::draw(f, app))?;
            app.refresh(provider, chrono::Local::now().date_naive());
        }

        // 2. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 3. Wait for input, then drain whatever queued up during a blocking run
        //    so a held key triggers one rerun rather than one per repeat.
        if event::poll(Duration::from_millis(250))? {
            loop {
                if let Event::Key(key) = event::read()? {
                    handle_key(app, key);
                }
                if !app.running || !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
