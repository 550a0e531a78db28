//! Row renderers and render tree composition.

pub mod compose;
pub mod row;

// Re-export main types
pub use compose::{empty, layers, uniform_rows, weighted_rows, RowRenderer};
pub use row::{ChartInfo, RenderedRow, RowPayload};
