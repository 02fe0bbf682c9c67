//! Application state: input widgets, last dashboard run, focus, status.

use chrono::NaiveDate;

use tickerboard_core::data::MarketDataProvider;
use tickerboard_core::{run_dashboard, Dashboard, DashboardInput, LookbackDays, RenderOptions, Settings};

/// Which widget receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tickers,
    Days,
    Results,
}

impl Focus {
    pub fn label(self) -> &'static str {
        match self {
            Focus::Tickers => "Tickers",
            Focus::Days => "Days",
            Focus::Results => "Results",
        }
    }

    pub fn next(self) -> Focus {
        match self {
            Focus::Tickers => Focus::Days,
            Focus::Days => Focus::Results,
            Focus::Results => Focus::Tickers,
        }
    }

    pub fn prev(self) -> Focus {
        match self {
            Focus::Tickers => Focus::Results,
            Focus::Days => Focus::Tickers,
            Focus::Results => Focus::Days,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub focus: Focus,

    /// Text currently in the ticker field.
    pub ticker_draft: String,
    /// Text the last run was made with; Enter copies the draft here.
    pub ticker_text: String,
    pub days: LookbackDays,

    pub options: RenderOptions,
    pub dashboard: Option<Dashboard>,
    /// Index of the first outcome shown in the results pane.
    pub scroll: usize,

    /// Set whenever an input changes; the event loop reruns the pipeline.
    pub needs_refresh: bool,
    pub status_message: Option<(String, StatusLevel)>,
    pub provider_name: String,
}

impl AppState {
    pub fn new(settings: &Settings, provider_name: impl Into<String>) -> Self {
        Self {
            running: true,
            focus: Focus::Tickers,
            ticker_draft: settings.watchlist.tickers.clone(),
            ticker_text: settings.watchlist.tickers.clone(),
            days: settings.watchlist.days,
            options: settings.render_options(),
            dashboard: None,
            scroll: 0,
            needs_refresh: true,
            status_message: None,
            provider_name: provider_name.into(),
        }
    }

    pub fn input(&self) -> DashboardInput {
        DashboardInput::read(&self.ticker_text, i64::from(self.days.get()))
    }

    /// True when the ticker field holds edits not yet applied.
    pub fn draft_pending(&self) -> bool {
        self.ticker_draft != self.ticker_text
    }

    /// Apply the ticker draft. Only a real change triggers a rerun.
    pub fn commit_tickers(&mut self) {
        if self.draft_pending() {
            self.ticker_text = self.ticker_draft.clone();
            self.scroll = 0;
            self.needs_refresh = true;
        }
    }

    pub fn revert_tickers(&mut self) {
        self.ticker_draft = self.ticker_text.clone();
    }

    /// Move the slider; a rerun is queued only if the value moved.
    pub fn step_days(&mut self, delta: i64) {
        self.set_days(self.days.step(delta));
    }

    pub fn set_days(&mut self, days: LookbackDays) {
        if days != self.days {
            self.days = days;
            self.needs_refresh = true;
        }
    }

    pub fn outcome_count(&self) -> usize {
        self.dashboard.as_ref().map_or(0, |d| d.outcomes.len())
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.outcome_count() {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll = self.outcome_count().saturating_sub(1);
    }

    /// Run the whole pipeline for the current inputs and store the result.
    pub fn refresh(&mut self, provider: &dyn MarketDataProvider, today: NaiveDate) {
        let input = self.input();
        let dashboard = run_dashboard(provider, &input, today, self.options);

        let panels = dashboard.panel_count();
        let failures = dashboard.failure_count();
        let empty = dashboard.outcomes.len() - panels - failures;
        if input.watchlist.is_empty() {
            self.set_warning("No tickers entered");
        } else if failures > 0 {
            self.set_error(format!(
                "{panels} loaded, {empty} without history, {failures} failed"
            ));
        } else if empty > 0 {
            self.set_warning(format!("{panels} loaded, {empty} without history"));
        } else {
            self.set_status(format!("{panels} loaded for {}", dashboard.range));
        }

        self.dashboard = Some(dashboard);
        self.scroll = self.scroll.min(self.outcome_count().saturating_sub(1));
        self.needs_refresh = false;
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerboard_core::data::InMemoryProvider;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
    }

    #[test]
    fn focus_cycle() {
        assert_eq!(Focus::Tickers.next(), Focus::Days);
        assert_eq!(Focus::Results.next(), Focus::Tickers);
        assert_eq!(Focus::Tickers.prev(), Focus::Results);
        assert_eq!(Focus::Days.prev(), Focus::Tickers);
    }

    #[test]
    fn starts_from_settings_and_wants_a_run() {
        let app = AppState::new(&Settings::default(), "demo");
        assert_eq!(app.ticker_text, "BBAI, PLTR, AI");
        assert_eq!(app.days.get(), 30);
        assert!(app.needs_refresh);
        assert!(app.dashboard.is_none());
    }

    #[test]
    fn commit_only_refreshes_on_change() {
        let mut app = AppState::new(&Settings::default(), "demo");
        app.needs_refresh = false;
        app.commit_tickers();
        assert!(!app.needs_refresh);

        app.ticker_draft = "SPY".into();
        assert!(app.draft_pending());
        app.commit_tickers();
        assert!(app.needs_refresh);
        assert_eq!(app.ticker_text, "SPY");
    }

    #[test]
    fn slider_at_bound_does_not_refresh() {
        let mut app = AppState::new(&Settings::default(), "demo");
        app.set_days(LookbackDays::new(180));
        app.needs_refresh = false;
        app.step_days(1);
        assert_eq!(app.days.get(), 180);
        assert!(!app.needs_refresh);
        app.step_days(-1);
        assert_eq!(app.days.get(), 179);
        assert!(app.needs_refresh);
    }

    #[test]
    fn refresh_stores_dashboard_and_status() {
        let mut app = AppState::new(&Settings::default(), "demo");
        app.refresh(&InMemoryProvider::demo(), today());
        assert!(!app.needs_refresh);
        assert_eq!(app.outcome_count(), 3);
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Info);
        assert!(msg.starts_with("3 loaded"));
    }

    #[test]
    fn refresh_reports_failures() {
        let mut app = AppState::new(&Settings::default(), "demo");
        app.ticker_text = "PLTR, NOPE".into();
        app.refresh(&InMemoryProvider::demo(), today());
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Error);
        assert!(msg.contains("1 failed"));
    }

    #[test]
    fn scroll_is_clamped_to_outcomes() {
        let mut app = AppState::new(&Settings::default(), "demo");
        app.refresh(&InMemoryProvider::demo(), today());
        app.scroll_to_end();
        assert_eq!(app.scroll, 2);
        app.scroll_down();
        assert_eq!(app.scroll, 2);

        app.ticker_text = "PLTR".into();
        app.refresh(&InMemoryProvider::demo(), today());
        assert_eq!(app.scroll, 0);
    }
}
