//! Left sidebar: ticker text field and lookback slider.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use tickerboard_core::LookbackDays;

use crate::app::{AppState, Focus};
use crate::theme::Theme;
use crate::ui::widgets::Slider;

pub const TICKER_LABEL: &str = "Enter tickers (comma-separated)";
pub const DAYS_LABEL: &str = "Days of historical data";

pub fn render(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(app.focus != Focus::Results))
        .title(" Watchlist Settings ")
        .title_style(theme.title(app.focus != Focus::Results));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // label
            Constraint::Length(3), // text field
            Constraint::Length(1), // pending hint
            Constraint::Length(2), // slider
            Constraint::Length(1),
            Constraint::Min(0), // parsed watchlist
        ])
        .split(inner);

    render_ticker_field(f, chunks[0], chunks[1], chunks[2], app, theme);

    let slider = Slider::new(
        DAYS_LABEL,
        app.days.get(),
        LookbackDays::MIN,
        LookbackDays::MAX,
        theme,
    )
    .focused(app.focus == Focus::Days);
    f.render_widget(slider, chunks[3]);

    render_watchlist(f, chunks[5], app, theme);
}

fn render_ticker_field(
    f: &mut Frame,
    label_area: Rect,
    field_area: Rect,
    hint_area: Rect,
    app: &AppState,
    theme: &Theme,
) {
    let focused = app.focus == Focus::Tickers;
    f.render_widget(
        Paragraph::new(Span::styled(TICKER_LABEL, theme.title(focused))),
        label_area,
    );

    let mut spans = vec![Span::styled(
        app.ticker_draft.as_str(),
        Style::default().fg(theme.text_primary),
    )];
    if focused {
        spans.push(Span::styled(
            "\u{258f}",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    // Keep the end of a long draft (where the cursor is) in view.
    let inner_width = field_area.width.saturating_sub(2) as usize;
    let typed = app.ticker_draft.chars().count() + usize::from(focused);
    let scroll_x = typed.saturating_sub(inner_width) as u16;

    let field = Paragraph::new(Line::from(spans))
        .scroll((0, scroll_x))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(focused)),
        );
    f.render_widget(field, field_area);

    if app.draft_pending() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Enter to apply",
                Style::default().fg(theme.warning),
            )),
            hint_area,
        );
    }
}

fn render_watchlist(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let input = app.input();
    let mut lines = vec![Line::from(Span::styled(
        format!("Watching {} symbol(s):", input.watchlist.len()),
        theme.muted_style(),
    ))];
    for symbol in input.watchlist.iter() {
        lines.push(Line::from(Span::styled(
            format!("  {symbol}"),
            Style::default().fg(theme.neutral),
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
