//! Top-level UI layout: settings sidebar, results pane, status bar.

pub mod dashboard_view;
pub mod sidebar;
pub mod status_bar;
pub mod widgets;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme::Theme;

/// Sidebar width in columns.
const SIDEBAR_WIDTH: u16 = 36;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let theme = Theme::default();

    // Split: main area + 1-line status bar.
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[0]);

    sidebar::render(f, columns[0], app, &theme);
    dashboard_view::render(f, columns[1], app, &theme);
    status_bar::render(f, rows[1], app, &theme);
}
