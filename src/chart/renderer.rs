//! Data row renderer: series lanes drawn over a shared y axis.
//!
//! One `XyDataRenderer` owns a set of series lanes that share a y range
//! derived per render from their combined extents. Lanes are painted in
//! order, so later lanes draw on top.

use crate::axis::SubdividedRange;
use crate::draw::{
    draw_bar_chart, draw_grid, draw_line_chart, draw_plot, draw_step_chart, Surface,
};
use crate::render::{ChartInfo, RenderedRow, RowPayload, RowRenderer};
use crate::series::{QuantitySeries, XyQuantities};
use crate::units::{format_tick_label, Quantity, Unit, UnitKind};
use log::warn;

const Y_TICK_SPACING: f64 = 25.0;
const GRID_COLOR: &str = "#e0e0e0";
const Y_LABEL_COLOR: &str = "#555555";

/// How one series lane is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    FilledLine,
    Step,
    Bar,
    Plot,
}

struct Lane {
    source: Box<dyn QuantitySeries>,
    style: SeriesStyle,
    color: String,
}

struct LastRender {
    series: Vec<XyQuantities>,
    height: u32,
}

/// Renders series lanes into one chart row.
pub struct XyDataRenderer {
    lanes: Vec<Lane>,
    last: Option<LastRender>,
}

impl Default for XyDataRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl XyDataRenderer {
    pub fn new() -> Self {
        XyDataRenderer {
            lanes: Vec::new(),
            last: None,
        }
    }

    pub fn add_series(
        &mut self,
        source: Box<dyn QuantitySeries>,
        style: SeriesStyle,
        color: impl Into<String>,
    ) {
        self.lanes.push(Lane {
            source,
            style,
            color: color.into(),
        });
    }

    fn row_label(&self) -> Option<String> {
        if self.lanes.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.lanes.iter().map(|lane| lane.source.name()).collect();
        Some(names.join(", "))
    }

    fn row_payload(&self) -> Option<RowPayload> {
        match self.lanes.as_slice() {
            [lane] => Some(RowPayload::Series(lane.source.name().to_string())),
            _ => None,
        }
    }

    fn combined_extent(series: &[XyQuantities]) -> Option<(Quantity, Quantity)> {
        let mut extent: Option<(Quantity, Quantity)> = None;
        for one in series {
            let Some((low, high)) = one.y_extent() else {
                continue;
            };
            extent = Some(match extent {
                None => (low, high),
                Some((min, max)) => (
                    if low < min { low } else { min },
                    if high > max { high } else { max },
                ),
            });
        }
        extent
    }

    fn draw_y_labels(&self, surface: &mut dyn Surface, y_range: &SubdividedRange, height: u32) {
        let extent = y_range.subdivider_extent();
        for index in 0..y_range.subdivider_count() {
            let y = height as f64 - y_range.subdivider_pixel(index);
            if y < surface.line_height() || y > height as f64 {
                continue;
            }
            let label = format_tick_label(&y_range.subdivider(index), &extent);
            surface.text(&label, 2.0, y - 2.0, Y_LABEL_COLOR);
        }
    }
}

/// Y range bounds from a series extent: bars and fills are anchored at
/// zero, and a flat series is widened so it still subdivides.
fn y_bounds(low: Quantity, high: Quantity, anchor_zero: bool) -> (Quantity, Quantity) {
    let mut low = low;
    if anchor_zero && low.base_value() > 0.0 {
        low = Quantity::new(0.0, low.unit());
    }
    if high > low {
        return (low, high);
    }
    let bump = match low.kind() {
        UnitKind::Memory => Unit::KIB.quantity(1.0),
        _ => low.unit().delta_unit().quantity(1.0),
    };
    match high.checked_add(&bump) {
        Ok(high) => (low, high),
        Err(_) => (low, high.scaled(2.0)),
    }
}

impl RowRenderer for XyDataRenderer {
    fn render(
        &mut self,
        surface: &mut dyn Surface,
        x_range: &SubdividedRange,
        height: u32,
    ) -> RenderedRow {
        self.last = None;
        if self.lanes.is_empty() || height == 0 {
            return RenderedRow::blank(height);
        }

        let mut series: Vec<XyQuantities> = self
            .lanes
            .iter()
            .map(|lane| lane.source.quantities(x_range))
            .collect();

        let Some((low, high)) = Self::combined_extent(&series) else {
            return RenderedRow::blank(height);
        };
        let anchor_zero = self
            .lanes
            .iter()
            .any(|lane| matches!(lane.style, SeriesStyle::Bar | SeriesStyle::FilledLine));
        let (low, high) = y_bounds(low, high, anchor_zero);
        let y_range = match SubdividedRange::new(low, high, height as f64, Y_TICK_SPACING) {
            Ok(range) => range,
            Err(err) => {
                warn!("Cannot subdivide the y range: {}", err);
                return RenderedRow::blank(height);
            }
        };
        for one in &mut series {
            one.set_y_range(&y_range);
        }

        let width = x_range.pixel_extent().round() as u32;
        draw_grid(surface, &y_range, width, height, GRID_COLOR);
        for (lane, one) in self.lanes.iter().zip(&series) {
            match lane.style {
                SeriesStyle::Line => {
                    draw_line_chart(surface, one, width, height, &lane.color, false)
                }
                SeriesStyle::FilledLine => {
                    draw_line_chart(surface, one, width, height, &lane.color, true)
                }
                SeriesStyle::Step => draw_step_chart(surface, one, width, height, &lane.color),
                SeriesStyle::Bar => draw_bar_chart(surface, one, height, &lane.color),
                SeriesStyle::Plot => draw_plot(surface, one, height, &lane.color),
            }
        }
        self.draw_y_labels(surface, &y_range, height);

        let row = RenderedRow {
            height,
            label: self.row_label(),
            description: None,
            payload: self.row_payload(),
            children: Vec::new(),
        };
        self.last = Some(LastRender { series, height });
        row
    }

    fn info_at(&self, x: f64, y: f64) -> Option<ChartInfo> {
        let last = self.last.as_ref()?;
        if y < 0.0 || y >= last.height as f64 {
            return None;
        }
        for (lane, series) in self.lanes.iter().zip(&last.series).rev() {
            let index = series.floor_index_at_x(x);
            if index < 0 || index as usize >= series.len() {
                continue;
            }
            let index = index as usize;
            return Some(ChartInfo {
                label: Some(lane.source.name().to_string()),
                payload: RowPayload::Bucket {
                    series: lane.source.name().to_string(),
                    index,
                },
                x: Some(series.x_quantity(index)),
                y: series.y_quantity(index),
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::SvgSurface;
    use crate::series::SampledSeries;

    fn bucket_range() -> SubdividedRange {
        SubdividedRange::new(
            Unit::SECOND.quantity(0.0),
            Unit::SECOND.quantity(100.0),
            400.0,
            25.0,
        )
        .unwrap()
        .with_pixel_subdividers()
    }

    fn sampled(name: &str, values: Vec<f64>) -> Box<dyn QuantitySeries> {
        let xs = (0..values.len())
            .map(|i| Unit::SECOND.quantity(i as f64 * 10.0))
            .collect();
        Box::new(SampledSeries::new(name, xs, values, Unit::NUMBER).unwrap())
    }

    #[test]
    fn single_lane_row_carries_the_series_payload() {
        let mut renderer = XyDataRenderer::new();
        renderer.add_series(sampled("heap", vec![1.0, 2.0, 3.0]), SeriesStyle::Line, "#4682B4");
        let mut surface = SvgSurface::new(400, 100);
        let row = renderer.render(&mut surface, &bucket_range(), 100);
        assert_eq!(row.label.as_deref(), Some("heap"));
        assert_eq!(row.payload, Some(RowPayload::Series("heap".to_string())));
        assert!(surface.into_svg().contains("<polyline"));
    }

    #[test]
    fn flat_series_still_renders() {
        let mut renderer = XyDataRenderer::new();
        renderer.add_series(sampled("flat", vec![5.0, 5.0, 5.0]), SeriesStyle::Line, "#4682B4");
        let mut surface = SvgSurface::new(400, 100);
        let row = renderer.render(&mut surface, &bucket_range(), 100);
        assert!(!row.is_blank());
    }

    #[test]
    fn no_samples_render_a_blank_row() {
        let mut renderer = XyDataRenderer::new();
        renderer.add_series(sampled("empty", Vec::new()), SeriesStyle::Line, "#4682B4");
        let mut surface = SvgSurface::new(400, 100);
        let row = renderer.render(&mut surface, &bucket_range(), 100);
        assert!(row.is_blank());
    }

    #[test]
    fn hit_testing_reports_the_bucket_under_the_pixel() {
        let mut renderer = XyDataRenderer::new();
        renderer.add_series(
            sampled("heap", vec![1.0, 2.0, 3.0, 4.0]),
            SeriesStyle::Line,
            "#4682B4",
        );
        let mut surface = SvgSurface::new(400, 100);
        renderer.render(&mut surface, &bucket_range(), 100);

        // Samples sit at 0, 10, 20, 30 s over 0..100 s on 400 px.
        let info = renderer.info_at(90.0, 50.0).unwrap();
        assert_eq!(
            info.payload,
            RowPayload::Bucket {
                series: "heap".to_string(),
                index: 2
            }
        );
        assert_eq!(info.y, Some(Unit::NUMBER.quantity(3.0)));
        assert!(renderer.info_at(90.0, 150.0).is_none());
    }
}
