//! Render tree nodes produced by row renderers.

use crate::units::Quantity;

/// Reference to the data behind a rendered row, used for hit-testing
/// and selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPayload {
    /// A whole series lane.
    Series(String),
    /// One bucket of a series.
    Bucket { series: String, index: usize },
}

/// One node of the render tree built during a paint. Children stack top
/// to bottom inside the parent's rectangle. The tree lives until the
/// next paint replaces it.
#[derive(Debug, Clone)]
pub struct RenderedRow {
    pub height: u32,
    pub label: Option<String>,
    pub description: Option<String>,
    pub payload: Option<RowPayload>,
    pub children: Vec<RenderedRow>,
}

impl RenderedRow {
    pub fn blank(height: u32) -> Self {
        RenderedRow {
            height,
            label: None,
            description: None,
            payload: None,
            children: Vec::new(),
        }
    }

    /// True when the row carries neither text nor payload nor children.
    pub fn is_blank(&self) -> bool {
        self.label.is_none()
            && self.description.is_none()
            && self.payload.is_none()
            && self.children.is_empty()
    }
}

/// Datapoint information reported by hit-testing.
#[derive(Debug, Clone)]
pub struct ChartInfo {
    pub label: Option<String>,
    pub payload: RowPayload,
    pub x: Option<Quantity>,
    pub y: Option<Quantity>,
}
