//! Bottom status bar: provider, focus hints, last status message.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Focus, StatusLevel};
use crate::theme::Theme;

fn hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Tickers => "type, Enter apply, Esc revert",
        Focus::Days => "←/→ ±1, PgUp/PgDn ±10, Home/End",
        Focus::Results => "j/k scroll, g/G ends, r rerun, q quit",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let mut spans: Vec<Span> = vec![
        Span::styled(format!(" [{}] ", app.provider_name), Style::default().fg(theme.neutral)),
        Span::styled(
            format!("Tab:{} | {}", app.focus.label(), hints(app.focus)),
            theme.muted_style(),
        ),
        Span::raw(" | "),
    ];

    if let Some((msg, level)) = &app.status_message {
        let color = match level {
            StatusLevel::Info => theme.accent,
            StatusLevel::Warning => theme.warning,
            StatusLevel::Error => theme.negative,
        };
        spans.push(Span::styled(msg.as_str(), Style::default().fg(color)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
