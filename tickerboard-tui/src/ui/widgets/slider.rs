//! Labeled horizontal slider widget.
//!
//! Two rows: the label with the current value, then `min [====    ] max`.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::theme::Theme;

pub struct Slider<'a> {
    label: &'a str,
    value: u16,
    min: u16,
    max: u16,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Slider<'a> {
    pub fn new(label: &'a str, value: u16, min: u16, max: u16, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            min,
            max,
            focused: false,
            theme,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// `[====      ]` with `width` cells between the brackets.
pub fn slider_bar(value: u16, min: u16, max: u16, width: usize) -> String {
    if max <= min {
        return format!("[{}]", "=".repeat(width));
    }
    let frac = (f64::from(value.clamp(min, max) - min) / f64::from(max - min)).clamp(0.0, 1.0);
    let filled = (frac * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(empty))
}

impl Widget for Slider<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let label_style = self.theme.title(self.focused);
        let value_style = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::styled(format!("{}: ", self.label), label_style),
            Span::styled(self.value.to_string(), value_style),
        ])
        .render(Rect { height: 1, ..area }, buf);

        if area.height < 2 {
            return;
        }

        let min_label = self.min.to_string();
        let max_label = self.max.to_string();
        // Labels, two spaces and the brackets.
        let chrome = min_label.len() + max_label.len() + 4;
        let width = (area.width as usize).saturating_sub(chrome).max(1);
        let bar_style = if self.focused {
            Style::default().fg(self.theme.accent)
        } else {
            self.theme.muted_style()
        };

        Line::from(vec![
            Span::styled(min_label, self.theme.muted_style()),
            Span::raw(" "),
            Span::styled(slider_bar(self.value, self.min, self.max, width), bar_style),
            Span::raw(" "),
            Span::styled(max_label, self.theme.muted_style()),
        ])
        .render(
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
            buf,
        );
    }
}
