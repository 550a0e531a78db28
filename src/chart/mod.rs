//! Chart state and data row rendering.

pub mod renderer;
pub mod xy_chart;

// Re-export main types
pub use renderer::{SeriesStyle, XyDataRenderer};
pub use xy_chart::XyChart;
