//! Keyboard input dispatch: global keys, then the focused widget.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tickerboard_core::LookbackDays;

use crate::app::{AppState, Focus};

/// Slider step for PageUp/PageDown.
const DAYS_PAGE: i64 = 10;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Global keys (always available).
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus = app.focus.prev();
            } else {
                app.focus = app.focus.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        _ => {}
    }

    // 2. Focused widget.
    match app.focus {
        Focus::Tickers => handle_tickers_key(app, key),
        Focus::Days => handle_days_key(app, key),
        Focus::Results => handle_results_key(app, key),
    }
}

fn handle_tickers_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_tickers(),
        KeyCode::Esc => {
            if app.draft_pending() {
                app.revert_tickers();
            } else {
                app.running = false;
            }
        }
        KeyCode::Backspace => {
            app.ticker_draft.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.ticker_draft.push(c);
        }
        _ => {}
    }
}

fn handle_days_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Down | KeyCode::Char('j') => app.step_days(-1),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Up | KeyCode::Char('k') => app.step_days(1),
        KeyCode::PageDown => app.step_days(-DAYS_PAGE),
        KeyCode::PageUp => app.step_days(DAYS_PAGE),
        KeyCode::Home => app.set_days(LookbackDays::new(i64::from(LookbackDays::MIN))),
        KeyCode::End => app.set_days(LookbackDays::new(i64::from(LookbackDays::MAX))),
        _ => {}
    }
}

fn handle_results_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('g') | KeyCode::Home => app.scroll = 0,
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_end(),
        KeyCode::Char('r') => app.needs_refresh = true,
        _ => {}
    }
}
