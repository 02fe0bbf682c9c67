//! Plain-text dashboard report.

use crate::dashboard::{Dashboard, TickerOutcome};
use crate::panel::{price_to_row, CandleChart, Notice, Severity, TickerPanel};

/// Widest text chart, in bars. Older bars are dropped first.
pub const TEXT_CHART_MAX_BARS: usize = 60;

const SEPARATOR: &str = "────────────────────────────────────────────────────────────";

pub struct TextReport;

impl TextReport {
    pub fn generate(&self, dashboard: &Dashboard) -> String {
        let mut report = format!(
            "US Stock Tracker: {} ({} tickers)\n\n",
            dashboard.range,
            dashboard.outcomes.len()
        );

        if dashboard.outcomes.is_empty() {
            report.push_str("No tickers entered.\n");
            return report;
        }

        for outcome in &dashboard.outcomes {
            match outcome {
                TickerOutcome::Panel(panel) => Self::push_panel(&mut report, panel),
                TickerOutcome::NoHistory { notice, .. } | TickerOutcome::Failed { notice, .. } => {
                    report.push_str(&notice_line(notice));
                    report.push('\n');
                }
            }
        }

        report
    }

    fn push_panel(report: &mut String, panel: &TickerPanel) {
        report.push_str(&panel.header);
        report.push('\n');

        let metrics: Vec<String> = panel
            .metrics
            .iter()
            .map(|m| format!("{}: {}", m.label, m.value))
            .collect();
        report.push_str(&format!("  {}\n", metrics.join("   ")));
        report.push_str(&format!("  {}\n\n", panel.caption));

        report.push_str(&format!(
            "  {} | {} bars | {} up {} down\n",
            panel.chart.title,
            panel.chart.bars.len(),
            panel.chart.up_count(),
            panel.chart.down_count()
        ));
        for row in text_chart(&panel.chart) {
            report.push_str("  ");
            report.push_str(row.trim_end());
            report.push('\n');
        }
        report.push('\n');

        report.push_str(&format!("  {}\n", notice_line(&panel.valuation)));
        report.push_str(SEPARATOR);
        report.push('\n');
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "[ALERT]",
        Severity::Info => "[INFO]",
        Severity::Warning => "[WARN]",
        Severity::Error => "[ERROR]",
    }
}

fn notice_line(notice: &Notice) -> String {
    format!("{} {}", severity_tag(notice.severity), notice.text)
}

/// Draw a candlestick chart as text rows.
///
/// One column per bar. Rising bodies use a full block, falling bodies a
/// medium shade, wicks a pipe. The first column holds y-axis labels and the
/// last row the first and last dates.
pub fn text_chart(chart: &CandleChart) -> Vec<String> {
    let Some((lower, upper)) = chart.padded_bounds() else {
        return vec![format!("{} [No Data]", chart.title)];
    };

    let label_width = 10;
    let plot_height = chart.height.saturating_sub(1).max(1);
    let bars = &chart.bars[chart.bars.len().saturating_sub(TEXT_CHART_MAX_BARS)..];

    let mut grid = vec![vec![' '; bars.len()]; plot_height as usize];
    for (x, bar) in bars.iter().enumerate() {
        let up = bar.is_increasing();
        let high = price_to_row(bar.high, lower, upper, plot_height) as usize;
        let low = price_to_row(bar.low, lower, upper, plot_height) as usize;
        let body_top = price_to_row(bar.open.max(bar.close), lower, upper, plot_height) as usize;
        let body_bot = price_to_row(bar.open.min(bar.close), lower, upper, plot_height) as usize;

        for row in grid.iter_mut().take(body_top).skip(high) {
            row[x] = '|';
        }
        for row in grid.iter_mut().take(body_bot + 1).skip(body_top) {
            row[x] = if up { '█' } else { '▓' };
        }
        for row in grid.iter_mut().take(low + 1).skip(body_bot + 1) {
            row[x] = '|';
        }
    }

    let mid = plot_height / 2;
    let last = plot_height.saturating_sub(1);
    let mut rows: Vec<String> = grid
        .into_iter()
        .enumerate()
        .map(|(y, cells)| {
            let y = y as u16;
            let label = if y == 0 {
                format!("{upper:>8.2} ┤")
            } else if y == mid {
                format!("{:>8.2} ┤", (upper + lower) / 2.0)
            } else if y == last {
                format!("{lower:>8.2} ┤")
            } else {
                format!("{:>8} │", "")
            };
            let mut line = format!("{label:<label_width$}");
            line.extend(cells);
            line
        })
        .collect();

    if let (Some(first), Some(final_bar)) = (bars.first(), bars.last()) {
        rows.push(format!(
            "{:<label_width$}{} .. {}  ({})",
            "",
            first.date,
            final_bar.date,
            chart.y_axis_title
        ));
    }
    rows
}
