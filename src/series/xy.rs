//! XY sample series bound to a subdivided x range.
//!
//! A series is rebuilt for every redraw and never mutated in place. The
//! y values are either pre-built quantities or raw doubles with a unit
//! (`NaN` marking missing samples); x positions are implicit bucket
//! indices unless explicit sample positions are attached for irregular
//! data.

use crate::axis::SubdividedRange;
use crate::units::{Quantity, Unit};
use crate::utils::error::RangeError;
use log::warn;

#[derive(Debug, Clone)]
enum YValues {
    Quantities(Vec<Option<Quantity>>),
    Doubles { values: Vec<f64>, unit: Unit },
}

impl YValues {
    fn len(&self) -> usize {
        match self {
            YValues::Quantities(values) => values.len(),
            YValues::Doubles { values, .. } => values.len(),
        }
    }
}

/// An ordered sequence of (x, y) samples over one x range.
#[derive(Debug, Clone)]
pub struct XyQuantities {
    x_range: SubdividedRange,
    xs: Option<Vec<Quantity>>,
    ys: YValues,
    pixel_ys: Vec<f64>,
}

impl XyQuantities {
    /// Bucketed series from pre-built y quantities; sample `i` sits at
    /// subdivider `i` of the x range.
    pub fn from_quantities(ys: Vec<Option<Quantity>>, x_range: SubdividedRange) -> Self {
        XyQuantities {
            x_range,
            xs: None,
            ys: YValues::Quantities(ys),
            pixel_ys: Vec::new(),
        }
    }

    /// Bucketed series from raw doubles in `unit`; `NaN` marks a missing
    /// sample.
    pub fn from_doubles(values: Vec<f64>, unit: Unit, x_range: SubdividedRange) -> Self {
        XyQuantities {
            x_range,
            xs: None,
            ys: YValues::Doubles { values, unit },
            pixel_ys: Vec::new(),
        }
    }

    /// Attach explicit sample positions for irregularly spaced data.
    /// `xs` must be sorted ascending, one position per y value.
    ///
    /// # Errors
    /// * `RangeError::InvalidSubdividerCount` - length mismatch with ys
    /// * `RangeError::KindMismatch` - positions of a different kind than
    ///   the x range
    pub fn with_sample_positions(mut self, xs: Vec<Quantity>) -> Result<Self, RangeError> {
        if xs.len() != self.ys.len() {
            return Err(RangeError::InvalidSubdividerCount(xs.len()));
        }
        if let Some(first) = xs.first() {
            if first.kind() != self.x_range.start().kind() {
                return Err(RangeError::KindMismatch {
                    expected: self.x_range.start().kind(),
                    actual: first.kind(),
                });
            }
        }
        self.xs = Some(xs);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.ys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn x_range(&self) -> &SubdividedRange {
        &self.x_range
    }

    /// X position of sample `i`: its explicit position, or the `i`-th
    /// subdivider for bucketed series.
    pub fn x_quantity(&self, index: usize) -> Quantity {
        match &self.xs {
            Some(xs) => xs[index],
            None => self.x_range.subdivider(index),
        }
    }

    /// Pixel-space x of sample `i` against the x range.
    pub fn x_pixel(&self, index: usize) -> f64 {
        match &self.xs {
            Some(xs) => self.x_range.pixel_of(&xs[index]),
            None => self.x_range.subdivider_pixel(index),
        }
    }

    pub fn y_quantity(&self, index: usize) -> Option<Quantity> {
        match &self.ys {
            YValues::Quantities(values) => values[index],
            YValues::Doubles { values, unit } => {
                let value = values[index];
                if value.is_nan() {
                    None
                } else {
                    Some(Quantity::new(value, *unit))
                }
            }
        }
    }

    /// Minimum and maximum present y values; `None` when every sample is
    /// missing.
    pub fn y_extent(&self) -> Option<(Quantity, Quantity)> {
        let mut extent: Option<(Quantity, Quantity)> = None;
        for index in 0..self.len() {
            let Some(y) = self.y_quantity(index) else {
                continue;
            };
            extent = Some(match extent {
                None => (y, y),
                Some((min, max)) => (
                    if y < min { y } else { min },
                    if y > max { y } else { max },
                ),
            });
        }
        extent
    }

    /// Cache pixel-space y positions against a y range. Missing samples
    /// map to pixel 0 so fills and bars degrade to the baseline.
    pub fn set_y_range(&mut self, y_range: &SubdividedRange) {
        self.pixel_ys = match &self.ys {
            YValues::Quantities(values) => values
                .iter()
                .map(|y| match y {
                    Some(y) => {
                        let pixel = y_range.pixel_of(y);
                        if pixel.is_nan() {
                            0.0
                        } else {
                            pixel
                        }
                    }
                    None => 0.0,
                })
                .collect(),
            YValues::Doubles { values, unit } => match y_range.pixel_transform(*unit) {
                Ok(transform) => values
                    .iter()
                    .map(|value| {
                        if value.is_nan() {
                            0.0
                        } else {
                            transform.apply(*value)
                        }
                    })
                    .collect(),
                Err(err) => {
                    warn!("y values do not fit the y axis: {}", err);
                    vec![0.0; values.len()]
                }
            },
        };
    }

    /// Pixel-space y of sample `i`, valid after `set_y_range`.
    pub fn pixel_y(&self, index: usize) -> f64 {
        self.pixel_ys.get(index).copied().unwrap_or(0.0)
    }

    pub fn has_pixel_ys(&self) -> bool {
        !self.pixel_ys.is_empty()
    }

    /// Index of the sample under pixel `x`.
    ///
    /// Returns −1 left of the first sample and `len − 1` at or beyond the
    /// last one. Bucketed series answer with the floor subdivider, series
    /// with explicit positions binary-search for the last sample starting
    /// before the next pixel boundary.
    pub fn floor_index_at_x(&self, pixel_x: f64) -> isize {
        if self.is_empty() {
            return -1;
        }
        let last = self.len() as isize - 1;
        match &self.xs {
            None => self.x_range.floor_subdivider_at_pixel(pixel_x).min(last),
            Some(xs) => {
                let boundary = self.x_range.quantity_at_pixel(pixel_x.floor() + 1.0);
                let boundary_base = boundary.base_value();
                let insertion = xs.partition_point(|x| x.base_value() < boundary_base);
                insertion as isize - 1
            }
        }
    }
}
