//! Integration tests for the dashboard pipeline.
//!
//! All data comes from the in-memory provider; nothing touches the network.

use chrono::NaiveDate;
use tickerboard_core::data::{DataError, InMemoryProvider};
use tickerboard_core::panel::Severity;
use tickerboard_core::{
    run_dashboard, DailyBar, DashboardInput, QuoteSnapshot, RenderOptions, TextReport,
    TickerOutcome,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn bars() -> Vec<DailyBar> {
    [(3, 100.0, 102.0), (4, 102.0, 101.0), (5, 101.0, 104.0), (28, 104.0, 103.5)]
        .into_iter()
        .map(|(day, open, close): (u32, f64, f64)| DailyBar {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            open,
            high: open.max(close) + 0.5,
            low: open.min(close) - 0.5,
            close,
            volume: Some(1_000),
        })
        .collect()
}

fn snapshot(forward_pe: Option<f64>) -> QuoteSnapshot {
    QuoteSnapshot {
        short_name: Some("Example Corp".into()),
        current_price: Some(103.5),
        fifty_two_week_high: Some(120.0),
        market_cap: Some(12_340_000_000.0),
        sector: Some("Technology".into()),
        industry: Some("Software".into()),
        forward_pe,
    }
}

fn provider() -> InMemoryProvider {
    InMemoryProvider::new()
        .with_symbol("AAA", bars(), snapshot(Some(18.40)))
        .with_history_error("BBB", DataError::NetworkUnreachable("connection reset".into()))
        .with_symbol("CCC", bars(), snapshot(Some(25.00)))
        .with_symbol("DDD", bars(), snapshot(None))
        .with_symbol("EMPTY", Vec::new(), snapshot(Some(10.0)))
}

fn panel(outcome: &TickerOutcome) -> &tickerboard_core::TickerPanel {
    match outcome {
        TickerOutcome::Panel(p) => p.as_ref(),
        other => panic!("expected a panel, got {other:?}"),
    }
}

#[test]
fn failure_in_the_middle_does_not_stop_the_rest() {
    let input = DashboardInput::read("aaa, bbb, ccc", 30);
    let dash = run_dashboard(&provider(), &input, today(), RenderOptions::default());

    assert_eq!(dash.outcomes.len(), 3);
    assert_eq!(panel(&dash.outcomes[0]).symbol, "AAA");
    assert_eq!(panel(&dash.outcomes[2]).symbol, "CCC");

    let errors: Vec<_> = dash.outcomes.iter().filter(|o| o.is_failure()).collect();
    assert_eq!(errors.len(), 1);
    match errors[0] {
        TickerOutcome::Failed { symbol, notice } => {
            assert_eq!(symbol, "BBB");
            assert_eq!(notice.severity, Severity::Error);
            assert!(notice.text.starts_with("Error loading BBB: "));
            assert!(notice.text.contains("connection reset"));
        }
        _ => unreachable!(),
    }
}

#[test]
fn valuation_branches() {
    let input = DashboardInput::read("AAA, CCC, DDD", 30);
    let dash = run_dashboard(&provider(), &input, today(), RenderOptions::default());

    let alert = &panel(&dash.outcomes[0]).valuation;
    assert_eq!(alert.severity, Severity::Success);
    assert!(alert.text.contains("18.40"));

    let info = &panel(&dash.outcomes[1]).valuation;
    assert_eq!(info.severity, Severity::Info);
    assert!(info.text.contains("25.00"));

    let missing = &panel(&dash.outcomes[2]).valuation;
    assert_eq!(missing.severity, Severity::Warning);
    assert_eq!(missing.text, "No forward PE data available");
}

#[test]
fn empty_series_emits_only_the_warning() {
    let input = DashboardInput::read("EMPTY", 30);
    let dash = run_dashboard(&provider(), &input, today(), RenderOptions::default());

    match &dash.outcomes[..] {
        [TickerOutcome::NoHistory { symbol, notice }] => {
            assert_eq!(symbol, "EMPTY");
            assert_eq!(notice.severity, Severity::Warning);
            assert_eq!(notice.text, "No historical data found for EMPTY");
        }
        other => panic!("unexpected outcomes: {other:?}"),
    }

    let report = TextReport.generate(&dash);
    assert!(report.contains("No historical data found for EMPTY"));
    assert!(!report.contains("Current Price"));
    assert!(!report.contains("Candlestick Chart"));
    assert!(!report.contains("Forward PE"));
}

#[test]
fn short_window_can_leave_a_valid_symbol_empty() {
    // Seven days back from 2024-06-30 reaches 2024-06-23: only the 28th survives.
    let input = DashboardInput::read("AAA", 7);
    let dash = run_dashboard(&provider(), &input, today(), RenderOptions::default());
    assert_eq!(panel(&dash.outcomes[0]).chart.bars.len(), 1);

    let earlier = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    let dash = run_dashboard(&provider(), &input, earlier, RenderOptions::default());
    assert!(matches!(dash.outcomes[0], TickerOutcome::NoHistory { .. }));
}

#[test]
fn duplicates_render_twice() {
    let input = DashboardInput::read("AAA, aaa", 30);
    let dash = run_dashboard(&provider(), &input, today(), RenderOptions::default());
    assert_eq!(dash.outcomes.len(), 2);
    assert_eq!(dash.outcomes[0], dash.outcomes[1]);
}

#[test]
fn rerun_with_same_inputs_is_identical() {
    let input = DashboardInput::read("AAA, BBB, CCC, EMPTY, ZZZ", 45);
    let first = run_dashboard(&provider(), &input, today(), RenderOptions::default());
    let second = run_dashboard(&provider(), &input, today(), RenderOptions::default());
    assert_eq!(first, second);
    assert_eq!(TextReport.generate(&first), TextReport.generate(&second));
}

#[test]
fn every_symbol_gets_exactly_one_outcome() {
    let input = DashboardInput::read("AAA, BBB, CCC, DDD, EMPTY, ZZZ", 90);
    let dash = run_dashboard(&provider(), &input, today(), RenderOptions::default());
    let symbols: Vec<&str> = dash.outcomes.iter().map(TickerOutcome::symbol).collect();
    assert_eq!(symbols, vec!["AAA", "BBB", "CCC", "DDD", "EMPTY", "ZZZ"]);
    assert_eq!(dash.panel_count(), 3);
    assert_eq!(dash.failure_count(), 2);
}

#[test]
fn text_report_lays_out_a_full_panel() {
    let input = DashboardInput::read("AAA", 30);
    let dash = run_dashboard(&provider(), &input, today(), RenderOptions::default());
    let report = TextReport.generate(&dash);

    assert!(report.starts_with("US Stock Tracker: 2024-05-31 to 2024-06-30 (1 tickers)"));
    assert!(report.contains("AAA — Example Corp"));
    assert!(report.contains("Current Price: $103.50"));
    assert!(report.contains("52-Week High: $120.00"));
    assert!(report.contains("Market Cap: $12.34B"));
    assert!(report.contains("Sector: Technology | Industry: Software"));
    assert!(report.contains("AAA Candlestick Chart | 4 bars | 2 up 2 down"));
    assert!(report.contains("[ALERT] Valuation Alert: Forward PE < 20 (18.40)"));
    assert!(report.contains("────"));
}
