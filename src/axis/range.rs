//! A quantity range subdivided for display on a pixel axis.
//!
//! `SubdividedRange` owns the affine transforms between three spaces:
//! quantity base values, subdivider indices, and pixels. Subdividers are
//! the tick or bucket boundaries; with natural subdivision they land on
//! round quantity values, and the first boundary sits at or before the
//! range start so the leftmost bucket is always complete.

use super::transform::AffineTransform;
use crate::units::{first_bucket, Quantity, Unit};
use crate::utils::error::RangeError;
use log::warn;

#[derive(Debug, Clone)]
pub struct SubdividedRange {
    start: Quantity,
    end: Quantity,
    pixel_extent: f64,
    subdivider_start: Quantity,
    subdivider_extent: Quantity,
    subdivider_count: usize,
    base_to_pixel: AffineTransform,
    index_to_pixel: AffineTransform,
}

impl SubdividedRange {
    /// Subdivide `[start, end)` naturally over `pixel_extent` pixels,
    /// spending at least `min_pixels_per_subdivider` pixels per part.
    ///
    /// **Public** - the standard constructor for tick and bucket ranges
    ///
    /// # Errors
    /// * `RangeError::EmptyRange` - `start >= end`
    /// * `RangeError::KindMismatch` - start and end are of different kinds
    /// * `RangeError::InvalidPixelExtent` - non-positive pixel extent
    pub fn new(
        start: Quantity,
        end: Quantity,
        pixel_extent: f64,
        min_pixels_per_subdivider: f64,
    ) -> Result<Self, RangeError> {
        if !(pixel_extent > 0.0) {
            return Err(RangeError::InvalidPixelExtent(pixel_extent));
        }
        let max_buckets = pixel_extent / min_pixels_per_subdivider.max(1.0);
        let (subdivider_start, subdivider_extent) = first_bucket(&start, &end, max_buckets)?;
        // One boundary past the end so the last bucket has both edges.
        let count = ((end.base_value() - subdivider_start.base_value())
            / subdivider_extent.base_value())
        .floor() as usize
            + 2;
        Ok(Self::assemble(start, end, pixel_extent, subdivider_start, subdivider_extent, count))
    }

    /// Subdivide `[start, end)` into exactly `count` equal parts, with no
    /// natural alignment. Used by axes that need a fixed grid, such as a
    /// percentage scale split into quarters.
    pub fn with_subdivider_count(
        start: Quantity,
        end: Quantity,
        pixel_extent: f64,
        count: usize,
    ) -> Result<Self, RangeError> {
        if !(pixel_extent > 0.0) {
            return Err(RangeError::InvalidPixelExtent(pixel_extent));
        }
        if count == 0 {
            return Err(RangeError::InvalidSubdividerCount(count));
        }
        let extent = end.checked_sub(&start)?.scaled(1.0 / count as f64);
        if !(extent.base_value() > 0.0) {
            return Err(RangeError::EmptyRange {
                start: start.base_value(),
                end: end.base_value(),
            });
        }
        Ok(Self::assemble(start, end, pixel_extent, start, extent, count + 1))
    }

    fn assemble(
        start: Quantity,
        end: Quantity,
        pixel_extent: f64,
        subdivider_start: Quantity,
        subdivider_extent: Quantity,
        subdivider_count: usize,
    ) -> Self {
        let start_base = start.base_value();
        let end_base = end.base_value();
        let aligned_base = subdivider_start.base_value();
        let extent_base = subdivider_extent.base_value();

        let base_to_pixel =
            AffineTransform::new(pixel_extent / (end_base - start_base), -start_base);
        let index_to_pixel = AffineTransform::new(
            extent_base * base_to_pixel.multiplier(),
            (aligned_base - start_base) / extent_base,
        );

        SubdividedRange {
            start,
            end,
            pixel_extent,
            subdivider_start,
            subdivider_extent,
            subdivider_count,
            base_to_pixel,
            index_to_pixel,
        }
    }

    pub fn start(&self) -> Quantity {
        self.start
    }

    pub fn end(&self) -> Quantity {
        self.end
    }

    pub fn extent(&self) -> Quantity {
        // Kinds were validated at construction.
        self.end
            .checked_sub(&self.start)
            .unwrap_or_else(|_| Quantity::new(0.0, self.start.unit().delta_unit()))
    }

    pub fn pixel_extent(&self) -> f64 {
        self.pixel_extent
    }

    /// Number of subdivider boundaries, including one past the end.
    pub fn subdivider_count(&self) -> usize {
        self.subdivider_count
    }

    pub fn subdivider_extent(&self) -> Quantity {
        self.subdivider_extent
    }

    /// The `i`-th subdivider boundary.
    pub fn subdivider(&self, index: usize) -> Quantity {
        let base =
            self.subdivider_start.base_value() + index as f64 * self.subdivider_extent.base_value();
        Quantity::new(base / self.start.unit().to_base(), self.start.unit())
    }

    /// Pixel position of the `i`-th subdivider boundary. May lie outside
    /// `[0, pixel_extent)` for the boundaries flanking the range.
    pub fn subdivider_pixel(&self, index: usize) -> f64 {
        self.index_to_pixel.apply(index as f64)
    }

    /// Pixel position of a quantity. A quantity of the wrong kind logs a
    /// warning and maps to NaN so one bad sample cannot fail a paint.
    pub fn pixel_of(&self, q: &Quantity) -> f64 {
        match self.checked_base(q) {
            Some(base) => self.base_to_pixel.apply(base),
            None => f64::NAN,
        }
    }

    /// The quantity at a pixel position, in the range's unit.
    pub fn quantity_at_pixel(&self, pixel: f64) -> Quantity {
        let base = self.base_to_pixel.invert().apply(pixel);
        Quantity::new(base / self.start.unit().to_base(), self.start.unit())
    }

    /// Index of the subdivider at or below `q`; negative when `q` lies
    /// before the first boundary.
    pub fn floor_subdivider_of(&self, q: &Quantity) -> isize {
        match self.checked_base(q) {
            Some(base) => {
                let index = (base - self.subdivider_start.base_value())
                    / self.subdivider_extent.base_value();
                index.floor() as isize
            }
            None => 0,
        }
    }

    /// Index of the subdivider at or below the quantity at `pixel`.
    pub fn floor_subdivider_at_pixel(&self, pixel: f64) -> isize {
        self.index_to_pixel.invert().apply(pixel).floor() as isize
    }

    /// Index of the subdivider boundary nearest to `pixel`.
    pub fn closest_subdivider_at_pixel(&self, pixel: f64) -> isize {
        self.index_to_pixel.invert().apply(pixel).round() as isize
    }

    /// Transform from values expressed in `unit` to pixels, for mapping
    /// whole sample arrays without building intermediate quantities.
    pub fn pixel_transform(&self, unit: Unit) -> Result<AffineTransform, RangeError> {
        if unit.kind() != self.start.kind() {
            return Err(RangeError::KindMismatch {
                expected: self.start.kind(),
                actual: unit.kind(),
            });
        }
        let unit_to_base = AffineTransform::new(unit.to_base(), 0.0);
        Ok(unit_to_base.concat(&self.base_to_pixel))
    }

    /// Transform from values expressed in `unit` to subdivider indices.
    pub fn subdivider_transform(&self, unit: Unit) -> Result<AffineTransform, RangeError> {
        if unit.kind() != self.start.kind() {
            return Err(RangeError::KindMismatch {
                expected: self.start.kind(),
                actual: unit.kind(),
            });
        }
        let base_to_index = AffineTransform::new(
            1.0 / self.subdivider_extent.base_value(),
            -self.subdivider_start.base_value(),
        );
        let unit_to_base = AffineTransform::new(unit.to_base(), 0.0);
        Ok(unit_to_base.concat(&base_to_index))
    }

    /// A copy whose subdivider boundaries land on whole pixels, trading
    /// natural alignment for crisp bucket edges in bar charts.
    pub fn with_pixel_subdividers(&self) -> SubdividedRange {
        let pixels_per_subdivider = self.index_to_pixel.multiplier().round().max(1.0);
        let first_pixel = self.subdivider_pixel(0).floor();
        let aligned = self.quantity_at_pixel(first_pixel);
        let extent_base = pixels_per_subdivider / self.base_to_pixel.multiplier();
        let extent_unit = self.start.unit().delta_unit();
        let extent = Quantity::new(extent_base / extent_unit.to_base(), extent_unit);
        let count =
            ((self.end.base_value() - aligned.base_value()) / extent_base).floor() as usize + 2;
        Self::assemble(self.start, self.end, self.pixel_extent, aligned, extent, count)
    }

    fn checked_base(&self, q: &Quantity) -> Option<f64> {
        if q.kind() != self.start.kind() {
            warn!(
                "quantity kind {:?} does not match axis kind {:?}",
                q.kind(),
                self.start.kind()
            );
            return None;
        }
        Some(q.base_value())
    }
}
