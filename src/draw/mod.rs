//! Drawing surface abstraction and chart painting.

pub mod surface;
pub mod svg;
pub mod toolkit;

// Re-export main types
pub use surface::Surface;
pub use svg::SvgSurface;
pub use toolkit::{
    draw_axis, draw_bar_chart, draw_grid, draw_line_chart, draw_plot, draw_step_chart,
};
