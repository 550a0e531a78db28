//! Drawing surface abstraction.
//!
//! Row renderers draw through this trait in local coordinates; the
//! offset stack lets a composite place each child without the child
//! knowing its position. Colors are CSS color strings.

/// A pixel surface the chart engine can draw on.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, dashed: bool);

    fn rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<&str>,
        fill_opacity: f64,
        stroke: Option<&str>,
    );

    fn polygon(&mut self, points: &[(f64, f64)], fill: &str, fill_opacity: f64);

    fn polyline(&mut self, points: &[(f64, f64)], color: &str);

    fn oval(&mut self, center_x: f64, center_y: f64, radius: f64, fill: &str);

    /// Draw `text` with its baseline at `y`.
    fn text(&mut self, text: &str, x: f64, y: f64, color: &str);

    fn text_width(&self, text: &str) -> f64;

    fn line_height(&self) -> f64;

    /// Shift the origin for subsequent drawing.
    fn push_offset(&mut self, dx: f64, dy: f64);

    /// Restore the origin saved by the matching `push_offset`.
    fn pop_offset(&mut self);
}
