//! Candlestick chart widget.
//!
//! Renders a `CandleChart` using direct buffer writes:
//! - Each candle = 1 terminal column
//! - Body: full block if close >= open, medium shade otherwise
//! - Wicks: `|` up to the high and down to the low
//! - Y axis: upper/mid/lower price labels, X axis: first and last date

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use tickerboard_core::panel::{price_to_row, CandleChart};

use crate::theme::Theme;

/// Width of the y-axis label column.
const LABEL_WIDTH: u16 = 9;

pub struct CandleChartWidget<'a> {
    chart: &'a CandleChart,
    theme: &'a Theme,
}

impl<'a> CandleChartWidget<'a> {
    pub fn new(chart: &'a CandleChart, theme: &'a Theme) -> Self {
        Self { chart, theme }
    }
}

impl Widget for CandleChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chart = self.chart;
        let Some((y_lower, y_upper)) = chart.padded_bounds() else {
            Block::default()
                .title(format!(" {} [No Data] ", chart.title))
                .borders(Borders::ALL)
                .border_style(self.theme.muted_style())
                .style(Style::default().bg(self.theme.background))
                .render(area, buf);
            return;
        };

        let title = format!(
            " {} | {} bars | {} up {} down ",
            chart.title,
            chart.bars.len(),
            chart.up_count(),
            chart.down_count(),
        );

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        let inner = block.inner(area);
        block.render(area, buf);

        // Left margin for y labels, bottom row for the date axis.
        let plot_left = inner.x + LABEL_WIDTH;
        let plot_top = inner.y;
        let plot_width = inner.width.saturating_sub(LABEL_WIDTH);
        let plot_height = inner.height.saturating_sub(1);

        if plot_width == 0 || plot_height == 0 {
            return;
        }

        let label_style = self.theme.muted_style();
        let y_labels = [y_upper, (y_upper + y_lower) / 2.0, y_lower];
        let y_positions = [0u16, plot_height / 2, plot_height.saturating_sub(1)];
        for (value, y_pos) in y_labels.iter().zip(y_positions.iter()) {
            buf.set_string(inner.x, plot_top + y_pos, format!("{value:>8.2}"), label_style);
        }

        // Newest bars win when the series is wider than the plot.
        let start_bar = chart.bars.len().saturating_sub(plot_width as usize);
        let visible = &chart.bars[start_bar..];

        for (i, bar) in visible.iter().enumerate() {
            let x = plot_left + i as u16;
            if x >= inner.right() {
                break;
            }

            let is_up = bar.is_increasing();
            let style = Style::default().fg(self.theme.candle_color(is_up));

            let high_y = price_to_row(bar.high, y_lower, y_upper, plot_height);
            let low_y = price_to_row(bar.low, y_lower, y_upper, plot_height);
            let body_top_y = price_to_row(bar.open.max(bar.close), y_lower, y_upper, plot_height);
            let body_bot_y = price_to_row(bar.open.min(bar.close), y_lower, y_upper, plot_height);

            for y in high_y..body_top_y {
                buf.set_string(x, plot_top + y, "|", style);
            }

            let body_char = if is_up { "\u{2588}" } else { "\u{2593}" };
            for y in body_top_y..=body_bot_y {
                buf.set_string(x, plot_top + y, body_char, style);
            }

            for y in (body_bot_y + 1)..=low_y {
                buf.set_string(x, plot_top + y, "|", style);
            }
        }

        // Date axis: first visible date on the left, last on the right, axis title between.
        let axis_y = plot_top + plot_height;
        if let (Some(first), Some(last)) = (visible.first(), visible.last()) {
            let first = first.date.to_string();
            let last = last.date.to_string();
            let axis = format!("{first} .. {last}  ({})", chart.y_axis_title);
            let room = plot_width as usize;
            let text = if axis.chars().count() <= room { axis } else { first };
            buf.set_stringn(plot_left, axis_y, text, room, label_style);
        }
    }
}
