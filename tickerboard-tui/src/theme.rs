//! Parrot/neon theme tokens for the Tickerboard TUI
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, info notices)
//! - **Positive**: Neon green (rising candles, valuation alerts)
//! - **Negative**: Hot pink (falling candles, load errors)
//! - **Warning**: Neon orange (missing data notices)
//! - **Neutral**: Cool purple (headers, secondary info)
//! - **Muted**: Steel blue (hints, axis labels)

use ratatui::style::{Color, Modifier, Style};
use tickerboard_core::Severity;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (focus, highlights)
    pub accent: Color,
    /// Neon green (rising candles, alerts)
    pub positive: Color,
    /// Hot pink (falling candles, errors)
    pub negative: Color,
    /// Neon orange (warnings)
    pub warning: Color,
    /// Cool purple (neutral info, secondary)
    pub neutral: Color,
    /// Steel blue (muted text, disabled)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
    /// Light gray (secondary text)
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Notice colour by severity.
    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Success => self.positive,
            Severity::Info => self.accent,
            Severity::Warning => self.warning,
            Severity::Error => self.negative,
        }
    }

    /// Candle colour: rising bars positive, falling bars negative.
    pub fn candle_color(&self, increasing: bool) -> Color {
        if increasing {
            self.positive
        } else {
            self.negative
        }
    }

    /// Border style for a focusable widget.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn title(&self, focused: bool) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if focused {
            style.fg(self.accent)
        } else {
            style.fg(self.text_secondary)
        }
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }
}
