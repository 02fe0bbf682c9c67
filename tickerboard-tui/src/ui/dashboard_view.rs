//! Results pane: one block per watchlist entry, in order, scrolled by entry.
//!
//! A full panel stacks header, metric cards, caption, chart, valuation note
//! and a divider. Entries without history or with a load error are a single
//! notice line.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use ratatui::Frame;

use tickerboard_core::panel::{Metric, Notice, Severity};
use tickerboard_core::{Dashboard, TickerOutcome, TickerPanel};

use crate::app::{AppState, Focus};
use crate::theme::Theme;
use crate::ui::widgets::CandleChartWidget;

/// Rows a panel needs besides its chart.
const PANEL_CHROME_ROWS: u16 = 7;
const METRIC_ROWS: u16 = 3;

pub const TITLE: &str = "US Stock Tracker";

/// Rows an outcome occupies when drawn in full.
pub fn outcome_height(outcome: &TickerOutcome) -> u16 {
    match outcome {
        TickerOutcome::Panel(panel) => PANEL_CHROME_ROWS + panel.chart.height,
        TickerOutcome::NoHistory { .. } | TickerOutcome::Failed { .. } => 1,
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let focused = app.focus == Focus::Results;
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(focused))
        .title(format!(" {TITLE} "))
        .title_style(theme.title(focused));
    if let Some(dashboard) = &app.dashboard {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {} ", dashboard.range),
                theme.muted_style(),
            ))
            .right_aligned(),
        );
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &app.dashboard {
        None => f.render_widget(
            Paragraph::new(Span::styled("Loading\u{2026}", theme.muted_style())),
            inner,
        ),
        Some(dashboard) => f.render_widget(DashboardView::new(dashboard, app.scroll, theme), inner),
    }
}

/// Draws outcomes from `scroll` downward until the area is full.
pub struct DashboardView<'a> {
    dashboard: &'a Dashboard,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> DashboardView<'a> {
    pub fn new(dashboard: &'a Dashboard, scroll: usize, theme: &'a Theme) -> Self {
        Self {
            dashboard,
            scroll,
            theme,
        }
    }
}

impl Widget for DashboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.dashboard.outcomes.is_empty() {
            Paragraph::new(Span::styled("No tickers entered.", self.theme.muted_style()))
                .render(area, buf);
            return;
        }

        let mut y = area.y;
        for (i, outcome) in self.dashboard.outcomes.iter().enumerate().skip(self.scroll) {
            let remaining = area.bottom().saturating_sub(y);
            if remaining == 0 {
                break;
            }
            let wanted = outcome_height(outcome);
            // The first entry is always drawn, clipped if need be; later ones only whole.
            if wanted > remaining && i != self.scroll {
                let more = self.dashboard.outcomes.len() - i;
                let text = format!("\u{2193} {more} more (j to scroll)");
                let style = self.theme.muted_style();
                buf.set_stringn(area.x, area.bottom() - 1, text, area.width as usize, style);
                break;
            }
            let rect = Rect {
                x: area.x,
                y,
                width: area.width,
                height: wanted.min(remaining),
            };
            match outcome {
                TickerOutcome::Panel(panel) => render_panel(panel, rect, buf, self.theme),
                TickerOutcome::NoHistory { notice, .. } | TickerOutcome::Failed { notice, .. } => {
                    notice_line(notice, self.theme).render(rect, buf)
                }
            }
            y += rect.height;
        }
    }
}

fn notice_line<'a>(notice: &'a Notice, theme: &Theme) -> Line<'a> {
    let color = theme.severity_color(notice.severity);
    let icon = match notice.severity {
        Severity::Success => "\u{2714}",
        Severity::Info => "\u{2139}",
        Severity::Warning => "\u{26a0}",
        Severity::Error => "\u{2716}",
    };
    Line::from(vec![
        Span::styled(format!("{icon} "), Style::default().fg(color)),
        Span::styled(notice.text.as_str(), Style::default().fg(color)),
    ])
}

fn render_panel(panel: &TickerPanel, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(METRIC_ROWS),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    Line::from(Span::styled(
        panel.header.as_str(),
        Style::default()
            .fg(theme.text_primary)
            .add_modifier(Modifier::BOLD),
    ))
    .render(chunks[0], buf);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[1]);
    for (metric, rect) in panel.metrics.iter().zip(cards.iter()) {
        metric_card(metric, theme).render(*rect, buf);
    }

    Line::from(Span::styled(panel.caption.as_str(), theme.muted_style())).render(chunks[2], buf);

    CandleChartWidget::new(&panel.chart, theme).render(chunks[3], buf);

    notice_line(&panel.valuation, theme).render(chunks[4], buf);

    let divider = "\u{2500}".repeat(chunks[5].width as usize);
    Line::from(Span::styled(divider, theme.muted_style())).render(chunks[5], buf);
}

fn metric_card<'a>(metric: &'a Metric, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(Span::styled(
        metric.value.as_str(),
        Style::default()
            .fg(theme.text_primary)
            .add_modifier(Modifier::BOLD),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.muted_style())
            .title(Span::styled(metric.label, Style::default().fg(theme.text_secondary))),
    )
}
