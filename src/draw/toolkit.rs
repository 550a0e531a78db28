//! Chart drawing operations.
//!
//! Free functions that paint one series or one axis onto a `Surface`.
//! All of them draw in a local rectangle of `width × height` pixels
//! whose origin is the top-left corner; cached series pixels grow
//! upwards, so y values are flipped here.

use crate::axis::SubdividedRange;
use crate::draw::surface::Surface;
use crate::series::XyQuantities;
use crate::units::format_tick_label;

const AXIS_TICK_LENGTH: f64 = 4.0;
const LABEL_MARGIN: f64 = 4.0;
const WIDE_BAR_INSET: f64 = 2.0;
const PLOT_RADIUS: f64 = 2.0;

fn flip(height: u32, pixel_y: f64) -> f64 {
    height as f64 - pixel_y
}

/// Runs of consecutive present samples as screen-space points.
fn present_runs(series: &XyQuantities, height: u32) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for index in 0..series.len() {
        if series.y_quantity(index).is_none() {
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push((series.x_pixel(index), flip(height, series.pixel_y(index))));
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Draw a series as a polyline, with missing samples breaking the line
/// into segments. `fill` closes each segment down to the zero line.
/// Dashed lines extrapolate the first and last sample out to the chart
/// edges.
pub fn draw_line_chart(
    surface: &mut dyn Surface,
    series: &XyQuantities,
    width: u32,
    height: u32,
    color: &str,
    fill: bool,
) {
    let runs = present_runs(series, height);
    let Some(first) = runs.first().and_then(|run| run.first()).copied() else {
        return;
    };
    let last = runs
        .last()
        .and_then(|run| run.last())
        .copied()
        .unwrap_or(first);

    if first.0 > 0.0 {
        surface.line(0.0, first.1, first.0, first.1, color, true);
    }
    if last.0 < width as f64 {
        surface.line(last.0, last.1, width as f64, last.1, color, true);
    }

    for run in &runs {
        if fill {
            let mut area = run.clone();
            let baseline = flip(height, 0.0);
            if let (Some(first), Some(last)) = (run.first(), run.last()) {
                area.push((last.0, baseline));
                area.push((first.0, baseline));
            }
            surface.polygon(&area, color, 0.35);
        }
        if run.len() == 1 {
            surface.oval(run[0].0, run[0].1, PLOT_RADIUS, color);
        } else {
            surface.polyline(run, color);
        }
    }
}

/// Right-angle variant of the line chart: the value holds until the
/// next sample, so vertices are added only where y changes, and the
/// last value extends to the right edge.
pub fn draw_step_chart(
    surface: &mut dyn Surface,
    series: &XyQuantities,
    width: u32,
    height: u32,
    color: &str,
) {
    for run in present_runs(series, height) {
        let mut points: Vec<(f64, f64)> = Vec::with_capacity(run.len() * 2);
        for (x, y) in run {
            match points.last().copied() {
                None => points.push((x, y)),
                Some((_, last_y)) if (last_y - y).abs() > f64::EPSILON => {
                    points.push((x, last_y));
                    points.push((x, y));
                }
                Some(_) => {}
            }
        }
        if let Some((_, last_y)) = points.last().copied() {
            points.push((width as f64, last_y));
        }
        surface.polyline(&points, color);
    }
}

/// Draw a bucketed series as framed bars spanning `pixel(i)` to
/// `pixel(i + 1)`, inset when the bars are wide enough to separate.
pub fn draw_bar_chart(
    surface: &mut dyn Surface,
    series: &XyQuantities,
    height: u32,
    color: &str,
) {
    let range = series.x_range();
    for index in 0..series.len() {
        if series.y_quantity(index).is_none() {
            continue;
        }
        let x0 = range.subdivider_pixel(index);
        let x1 = range.subdivider_pixel(index + 1);
        let inset = if x1 - x0 > 2.0 * WIDE_BAR_INSET + 1.0 {
            WIDE_BAR_INSET
        } else {
            0.0
        };
        let bar_height = series.pixel_y(index).max(0.0);
        surface.rect(
            x0 + inset,
            flip(height, bar_height),
            (x1 - x0) - 2.0 * inset,
            bar_height,
            Some(color),
            0.6,
            Some(color),
        );
    }
}

/// Draw a series as individual points, skipping missing samples.
pub fn draw_plot(surface: &mut dyn Surface, series: &XyQuantities, height: u32, color: &str) {
    for index in 0..series.len() {
        if series.y_quantity(index).is_none() {
            continue;
        }
        surface.oval(
            series.x_pixel(index),
            flip(height, series.pixel_y(index)),
            PLOT_RADIUS,
            color,
        );
    }
}

/// Draw a horizontal axis line with tick marks and labels along the
/// subdividers of `range`. Labels that would overrun the next tick are
/// omitted.
pub fn draw_axis(surface: &mut dyn Surface, range: &SubdividedRange, width: u32, color: &str) {
    surface.line(0.0, 0.0, width as f64, 0.0, color, false);
    let extent = range.subdivider_extent();
    let text_y = AXIS_TICK_LENGTH + surface.line_height();
    for index in 0..range.subdivider_count() {
        let pixel = range.subdivider_pixel(index);
        if pixel < 0.0 || pixel > width as f64 {
            continue;
        }
        surface.line(pixel, 0.0, pixel, AXIS_TICK_LENGTH, color, false);
        let tick = range.subdivider(index);
        let label = format_tick_label(&tick, &extent);
        let label_end = pixel + LABEL_MARGIN + surface.text_width(&label);
        let next_pixel = range.subdivider_pixel(index + 1).min(width as f64);
        if label_end <= next_pixel {
            surface.text(&label, pixel + LABEL_MARGIN, text_y, color);
        }
    }
}

/// Draw dashed horizontal grid lines at the subdividers of a y range.
pub fn draw_grid(
    surface: &mut dyn Surface,
    y_range: &SubdividedRange,
    width: u32,
    height: u32,
    color: &str,
) {
    for index in 0..y_range.subdivider_count() {
        let y = flip(height, y_range.subdivider_pixel(index));
        if y < 0.0 || y > height as f64 {
            continue;
        }
        surface.line(0.0, y, width as f64, y, color, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::SvgSurface;
    use crate::units::Unit;

    fn seconds_range(end: f64, pixels: f64) -> SubdividedRange {
        SubdividedRange::new(
            Unit::SECOND.quantity(0.0),
            Unit::SECOND.quantity(end),
            pixels,
            25.0,
        )
        .unwrap()
    }

    fn series_with_gap() -> XyQuantities {
        let range = seconds_range(100.0, 400.0);
        let mut series = XyQuantities::from_doubles(
            vec![10.0, 20.0, f64::NAN, 40.0, 50.0],
            Unit::NUMBER,
            range,
        );
        let y_range = SubdividedRange::new(
            Unit::NUMBER.quantity(0.0),
            Unit::NUMBER.quantity(100.0),
            100.0,
            25.0,
        )
        .unwrap();
        series.set_y_range(&y_range);
        series
    }

    #[test]
    fn missing_samples_split_the_polyline() {
        let mut surface = SvgSurface::new(400, 100);
        draw_line_chart(&mut surface, &series_with_gap(), 400, 100, "#4682B4", false);
        let svg = surface.into_svg();
        assert_eq!(svg.matches("<polyline").count(), 2);
    }

    #[test]
    fn edges_are_extrapolated_with_dashes() {
        let mut surface = SvgSurface::new(400, 100);
        draw_line_chart(&mut surface, &series_with_gap(), 400, 100, "#4682B4", false);
        let svg = surface.into_svg();
        assert_eq!(svg.matches("stroke-dasharray").count(), 1);
    }

    #[test]
    fn bar_chart_draws_one_bar_per_present_bucket() {
        let mut surface = SvgSurface::new(400, 100);
        draw_bar_chart(&mut surface, &series_with_gap(), 100, "#4682B4");
        let svg = surface.into_svg();
        assert_eq!(svg.matches("<rect").count(), 4);
    }

    #[test]
    fn axis_skips_labels_that_do_not_fit() {
        let tick_range = |pixels: f64| {
            SubdividedRange::new(
                Unit::SECOND.quantity(0.0),
                Unit::SECOND.quantity(600.0),
                pixels,
                100.0,
            )
            .unwrap()
        };
        let mut narrow = SvgSurface::new(120, 40);
        draw_axis(&mut narrow, &tick_range(120.0), 120, "#333333");
        let narrow_labels = narrow.into_svg().matches("<text").count();

        let mut wide = SvgSurface::new(1200, 40);
        draw_axis(&mut wide, &tick_range(1200.0), 1200, "#333333");
        let wide_labels = wide.into_svg().matches("<text").count();

        assert!(narrow_labels < wide_labels);
    }

    #[test]
    fn grid_lines_are_dashed() {
        let y_range = SubdividedRange::new(
            Unit::NUMBER.quantity(0.0),
            Unit::NUMBER.quantity(100.0),
            100.0,
            25.0,
        )
        .unwrap();
        let mut surface = SvgSurface::new(400, 100);
        draw_grid(&mut surface, &y_range, 400, 100, "#dddddd");
        let svg = surface.into_svg();
        assert!(svg.matches("stroke-dasharray").count() >= 2);
    }
}
