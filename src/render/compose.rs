//! Row renderer composition.
//!
//! Renderers are combined into vertical splits or stacked layers. A
//! composite remembers the band geometry of its last render so
//! hit-testing can be routed to the child under a pixel.

use crate::axis::SubdividedRange;
use crate::draw::Surface;
use crate::render::row::{ChartInfo, RenderedRow};
use log::warn;

/// Label of the placeholder row shown when the available height cannot
/// give every child at least one pixel.
pub const TOO_MUCH_CONTENT: &str = "Too much content";
/// Label of the placeholder row shown when every child rendered blank.
pub const NO_CONTENT: &str = "No content";

/// A renderer that paints one row of a chart.
///
/// The row spans `x_range.pixel_extent()` pixels horizontally; `x_range`
/// carries the bucket subdivision the row's series are sampled against.
pub trait RowRenderer {
    /// Render into the local rectangle at the surface origin and
    /// describe what was painted.
    fn render(
        &mut self,
        surface: &mut dyn Surface,
        x_range: &SubdividedRange,
        height: u32,
    ) -> RenderedRow;

    /// Hit-test `(x, y)` against the geometry of the last `render`
    /// call. Returns `None` before the first render or when nothing
    /// was painted at the position.
    fn info_at(&self, x: f64, y: f64) -> Option<ChartInfo>;
}

/// The renderer that paints nothing.
pub fn empty() -> Box<dyn RowRenderer> {
    Box::new(EmptyRenderer)
}

/// Split the available height equally between `renderers`. Rounding
/// spreads the remainder so child heights differ by at most one pixel.
pub fn uniform_rows(renderers: Vec<Box<dyn RowRenderer>>) -> Box<dyn RowRenderer> {
    let weights = vec![1.0; renderers.len()];
    weighted_rows(renderers, weights)
}

/// Split the available height proportionally to `weights`. Missing
/// weights default to 1, surplus weights are ignored; non-positive or
/// non-finite weights fall back to an equal split.
pub fn weighted_rows(
    renderers: Vec<Box<dyn RowRenderer>>,
    weights: Vec<f64>,
) -> Box<dyn RowRenderer> {
    if renderers.is_empty() {
        return empty();
    }
    let mut weights = weights;
    weights.truncate(renderers.len());
    weights.resize(renderers.len(), 1.0);
    if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
        warn!("Non-positive row weights, splitting equally");
        weights = vec![1.0; renderers.len()];
    }
    Box::new(CompositeRenderer {
        children: renderers,
        weights,
        layered: false,
        bands: Vec::new(),
    })
}

/// Render every child over the same rectangle, first to last, so later
/// layers paint on top. The composed row takes label, description,
/// payload and children from the last layer that supplies them.
pub fn layers(renderers: Vec<Box<dyn RowRenderer>>) -> Box<dyn RowRenderer> {
    if renderers.is_empty() {
        return empty();
    }
    let weights = vec![1.0; renderers.len()];
    Box::new(CompositeRenderer {
        children: renderers,
        weights,
        layered: true,
        bands: Vec::new(),
    })
}

struct EmptyRenderer;

impl RowRenderer for EmptyRenderer {
    fn render(
        &mut self,
        _surface: &mut dyn Surface,
        _x_range: &SubdividedRange,
        height: u32,
    ) -> RenderedRow {
        RenderedRow::blank(height)
    }

    fn info_at(&self, _x: f64, _y: f64) -> Option<ChartInfo> {
        None
    }
}

/// Vertical split or layer stack over child renderers. `bands` holds
/// the `(offset, height)` painted for each child by the last render.
struct CompositeRenderer {
    children: Vec<Box<dyn RowRenderer>>,
    weights: Vec<f64>,
    layered: bool,
    bands: Vec<(u32, u32)>,
}

impl CompositeRenderer {
    fn render_split(
        &mut self,
        surface: &mut dyn Surface,
        x_range: &SubdividedRange,
        height: u32,
    ) -> RenderedRow {
        if (height as usize) < self.children.len() {
            return placeholder(surface, x_range.pixel_extent(), height, TOO_MUCH_CONTENT);
        }
        let total: f64 = self.weights.iter().sum();
        let mut rows = Vec::with_capacity(self.children.len());
        let mut cumulative = 0.0;
        let mut band_start = 0u32;
        for (child, weight) in self.children.iter_mut().zip(&self.weights) {
            cumulative += weight;
            // Integer boundaries from the cumulative weight keep the
            // remainder spread over the rows.
            let band_end = (height as f64 * cumulative / total) as u32;
            let band_height = band_end.saturating_sub(band_start);
            surface.push_offset(0.0, band_start as f64);
            rows.push(child.render(surface, x_range, band_height));
            surface.pop_offset();
            self.bands.push((band_start, band_height));
            band_start = band_end;
        }
        if rows.iter().all(RenderedRow::is_blank) {
            return placeholder(surface, x_range.pixel_extent(), height, NO_CONTENT);
        }
        RenderedRow {
            height,
            label: None,
            description: None,
            payload: None,
            children: rows,
        }
    }

    fn render_layers(
        &mut self,
        surface: &mut dyn Surface,
        x_range: &SubdividedRange,
        height: u32,
    ) -> RenderedRow {
        let mut composed = RenderedRow::blank(height);
        let mut any_content = false;
        for child in &mut self.children {
            let row = child.render(surface, x_range, height);
            self.bands.push((0, height));
            any_content |= !row.is_blank();
            if row.label.is_some() {
                composed.label = row.label;
            }
            if row.description.is_some() {
                composed.description = row.description;
            }
            if row.payload.is_some() {
                composed.payload = row.payload;
            }
            if !row.children.is_empty() {
                composed.children = row.children;
            }
        }
        if !any_content {
            return placeholder(surface, x_range.pixel_extent(), height, NO_CONTENT);
        }
        composed
    }
}

impl RowRenderer for CompositeRenderer {
    fn render(
        &mut self,
        surface: &mut dyn Surface,
        x_range: &SubdividedRange,
        height: u32,
    ) -> RenderedRow {
        self.bands.clear();
        if self.layered {
            self.render_layers(surface, x_range, height)
        } else {
            self.render_split(surface, x_range, height)
        }
    }

    fn info_at(&self, x: f64, y: f64) -> Option<ChartInfo> {
        if self.layered {
            // Topmost layer wins.
            for child in self.children.iter().rev() {
                if let Some(info) = child.info_at(x, y) {
                    return Some(info);
                }
            }
            return None;
        }
        for (child, (band_start, band_height)) in self.children.iter().zip(&self.bands) {
            let top = *band_start as f64;
            let bottom = top + *band_height as f64;
            if y >= top && y < bottom {
                return child.info_at(x, y - top);
            }
        }
        None
    }
}

/// Paint a message row instead of the children that did not fit.
fn placeholder(surface: &mut dyn Surface, width: f64, height: u32, message: &str) -> RenderedRow {
    let text_y = (height as f64 + surface.line_height()) / 2.0;
    let text_x = ((width - surface.text_width(message)) / 2.0).max(2.0);
    surface.text(message, text_x, text_y, "#777777");
    RenderedRow {
        height,
        label: Some(message.to_string()),
        description: None,
        payload: None,
        children: Vec::new(),
    }
}
