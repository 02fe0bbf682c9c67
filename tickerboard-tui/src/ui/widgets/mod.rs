//! Reusable widgets.

pub mod candle_chart;
pub mod slider;

pub use candle_chart::CandleChartWidget;
pub use slider::Slider;
