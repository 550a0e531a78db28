//! XY chart state: range navigation, rendering and selection.
//!
//! The chart owns the full recording range, the visible sub-range and a
//! composed row renderer. Rendering derives two subdivided ranges per
//! paint: a coarse tick range for axis labels and a fine, pixel-aligned
//! bucket range the series are sampled against.

use crate::axis::SubdividedRange;
use crate::draw::{draw_axis, Surface};
use crate::render::{ChartInfo, RenderedRow, RowPayload, RowRenderer};
use crate::units::Quantity;
use crate::utils::config::{
    MIN_PIXELS_PER_BUCKET, MIN_PIXELS_PER_TICK, RANGE_TEST_PIXELS, X_AXIS_HEIGHT,
};
use crate::utils::error::RangeError;
use log::{debug, warn};

const AXIS_COLOR: &str = "#333333";

/// A chart over one x range with zoom, pan, selection and hit-testing.
pub struct XyChart {
    full_start: Quantity,
    full_end: Quantity,
    visible_start: Quantity,
    visible_end: Quantity,
    renderer: Box<dyn RowRenderer>,
    rendered: Option<RenderedRow>,
    last_bucket_range: Option<SubdividedRange>,
    row_height: u32,
    selection: Option<(Quantity, Quantity)>,
    selected: Vec<RowPayload>,
}

impl XyChart {
    /// Create a chart spanning `[start, end)` with the given row
    /// renderer; the visible range starts out as the full range.
    ///
    /// # Errors
    /// * `RangeError::KindMismatch` - `start` and `end` are of different
    ///   kinds
    /// * `RangeError::EmptyRange` - `start >= end`
    pub fn new(
        start: Quantity,
        end: Quantity,
        renderer: Box<dyn RowRenderer>,
    ) -> Result<Self, RangeError> {
        if start.kind() != end.kind() {
            return Err(RangeError::KindMismatch {
                expected: start.kind(),
                actual: end.kind(),
            });
        }
        if !(start.base_value() < end.base_value()) {
            return Err(RangeError::EmptyRange {
                start: start.base_value(),
                end: end.base_value(),
            });
        }
        Ok(XyChart {
            full_start: start,
            full_end: end,
            visible_start: start,
            visible_end: end,
            renderer,
            rendered: None,
            last_bucket_range: None,
            row_height: 0,
            selection: None,
            selected: Vec::new(),
        })
    }

    pub fn full_range(&self) -> (Quantity, Quantity) {
        (self.full_start, self.full_end)
    }

    pub fn visible_range(&self) -> (Quantity, Quantity) {
        (self.visible_start, self.visible_end)
    }

    /// The row tree produced by the last render.
    pub fn rendered_row(&self) -> Option<&RenderedRow> {
        self.rendered.as_ref()
    }

    /// Render the chart: rows over a pixel-aligned bucket range, then
    /// the x axis underneath with ticks from a coarser range.
    ///
    /// # Errors
    /// `RangeError` when the visible range cannot be subdivided over
    /// `axis_width` pixels.
    pub fn render(
        &mut self,
        surface: &mut dyn Surface,
        axis_width: u32,
        height: u32,
    ) -> Result<(), RangeError> {
        let row_height = height.saturating_sub(X_AXIS_HEIGHT).max(1);
        let tick_range = SubdividedRange::new(
            self.visible_start,
            self.visible_end,
            axis_width as f64,
            MIN_PIXELS_PER_TICK,
        )?;
        let bucket_range = SubdividedRange::new(
            self.visible_start,
            self.visible_end,
            axis_width as f64,
            MIN_PIXELS_PER_BUCKET,
        )?
        .with_pixel_subdividers();

        debug!(
            "Rendering chart over {} .. {} ({} px)",
            self.visible_start, self.visible_end, axis_width
        );
        let row = self.renderer.render(surface, &bucket_range, row_height);

        surface.push_offset(0.0, row_height as f64);
        draw_axis(surface, &tick_range, axis_width, AXIS_COLOR);
        surface.pop_offset();

        self.rendered = Some(row);
        self.last_bucket_range = Some(bucket_range);
        self.row_height = row_height;
        Ok(())
    }

    /// Move the visible window to `[start, end)`, clamped to the full
    /// range. A window too narrow to project onto pixels (pixel steps no
    /// longer strictly increase) resets the view to the full range, so
    /// zooming out again always stays possible.
    pub fn set_visible_range(&mut self, start: Quantity, end: Quantity) {
        if start.kind() != self.full_start.kind() || end.kind() != self.full_start.kind() {
            warn!(
                "Visible range kind {:?} does not match the chart, keeping {} .. {}",
                start.kind(),
                self.visible_start,
                self.visible_end
            );
            return;
        }
        let start = if start < self.full_start {
            self.full_start
        } else {
            start
        };
        let end = if end > self.full_end { self.full_end } else { end };

        if start.base_value() < end.base_value() {
            if let Ok(test) = SubdividedRange::new(start, end, RANGE_TEST_PIXELS, 1.0) {
                if test.quantity_at_pixel(0.0) < test.quantity_at_pixel(1.0) {
                    self.visible_start = start;
                    self.visible_end = end;
                    return;
                }
            }
        }
        debug!("Requested range cannot be projected, showing the full range");
        self.visible_start = self.full_start;
        self.visible_end = self.full_end;
    }

    /// Shift the visible window right by a share of its extent (negative
    /// shifts left). The window never leaves the full range.
    pub fn pan(&mut self, right_percent: f64) {
        if !right_percent.is_finite() {
            return;
        }
        let extent = self.visible_end.base_value() - self.visible_start.base_value();
        let shift = (extent * right_percent)
            .min(self.full_end.base_value() - self.visible_end.base_value())
            .max(self.full_start.base_value() - self.visible_start.base_value());
        if shift == 0.0 {
            return;
        }
        self.visible_start = shifted(self.visible_start, shift);
        self.visible_end = shifted(self.visible_end, shift);
    }

    /// Zoom about the center of the visible window. Positive steps zoom
    /// in, negative steps zoom out.
    pub fn zoom(&mut self, steps: f64) {
        let center =
            (self.visible_start.base_value() + self.visible_end.base_value()) / 2.0;
        self.zoom_about(center, steps);
    }

    /// Zoom keeping the quantity under `pixel_x` (in the coordinates of
    /// the last render) fixed.
    pub fn zoom_at(&mut self, pixel_x: f64, steps: f64) {
        let focus = match &self.last_bucket_range {
            Some(range) => range.quantity_at_pixel(pixel_x).base_value(),
            None => (self.visible_start.base_value() + self.visible_end.base_value()) / 2.0,
        };
        self.zoom_about(focus, steps);
    }

    fn zoom_about(&mut self, focus_base: f64, steps: f64) {
        if !steps.is_finite() || steps == 0.0 {
            return;
        }
        // atan keeps large step counts from collapsing the range in one
        // gesture; one step scales the extent by 3/4.
        let factor = steps.atan() / std::f64::consts::PI;
        let scale = 1.0 - factor;
        let start = self.visible_start.base_value();
        let end = self.visible_end.base_value();
        let new_start = focus_base - (focus_base - start) * scale;
        let new_end = focus_base + (end - focus_base) * scale;
        self.set_visible_range(
            shifted(self.visible_start, new_start - start),
            shifted(self.visible_end, new_end - end),
        );
    }

    /// Select the quantity window and row payloads under a pixel
    /// rectangle of the last render.
    pub fn select(&mut self, x1: f64, x2: f64, y1: f64, y2: f64) {
        let Some(range) = &self.last_bucket_range else {
            debug!("Selection before the first render is empty");
            self.clear_selection();
            return;
        };
        let start = range.quantity_at_pixel(x1.min(x2));
        let end = range.quantity_at_pixel(x1.max(x2));
        self.selection = Some((start, end));

        self.selected.clear();
        if let Some(row) = &self.rendered {
            collect_payloads(row, 0.0, y1.min(y2), y1.max(y2), &mut self.selected);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.selected.clear();
    }

    /// The selected quantity window, if a selection is active.
    pub fn selection_range(&self) -> Option<(Quantity, Quantity)> {
        self.selection
    }

    /// Payloads of the rows the last selection touched.
    pub fn selected_payloads(&self) -> &[RowPayload] {
        &self.selected
    }

    /// Hit-test a pixel of the last render. Positions under the x axis
    /// report nothing.
    pub fn info_at(&self, x: f64, y: f64) -> Option<ChartInfo> {
        if y < 0.0 || y >= self.row_height as f64 {
            return None;
        }
        self.renderer.info_at(x, y)
    }
}

/// `q` moved by a base-value delta, keeping its unit.
fn shifted(q: Quantity, delta_base: f64) -> Quantity {
    Quantity::new(q.value() + delta_base / q.unit().to_base(), q.unit())
}

/// Collect payloads of rows whose vertical band intersects `[y_min, y_max)`.
fn collect_payloads(
    row: &RenderedRow,
    top: f64,
    y_min: f64,
    y_max: f64,
    out: &mut Vec<RowPayload>,
) {
    let bottom = top + row.height as f64;
    if bottom <= y_min || top > y_max {
        return;
    }
    if let Some(payload) = &row.payload {
        out.push(payload.clone());
    }
    let mut child_top = top;
    for child in &row.children {
        collect_payloads(child, child_top, y_min, y_max, out);
        child_top += child.height as f64;
    }
}
