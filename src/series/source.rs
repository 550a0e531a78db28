//! Sources that produce series data for a requested x range.

use crate::axis::SubdividedRange;
use crate::series::xy::XyQuantities;
use crate::units::{Quantity, Unit};
use crate::utils::error::RangeError;
use log::warn;

/// Supplies the samples of one named series, re-evaluated against the
/// x range of every render so zooming re-buckets the data.
pub trait QuantitySeries {
    fn name(&self) -> &str;

    fn quantities(&self, x_range: &SubdividedRange) -> XyQuantities;
}

/// A series over explicit, irregularly spaced samples.
pub struct SampledSeries {
    name: String,
    xs: Vec<Quantity>,
    values: Vec<f64>,
    unit: Unit,
}

impl SampledSeries {
    /// # Errors
    /// * `RangeError::InvalidSubdividerCount` - `xs` and `values` differ
    ///   in length
    pub fn new(
        name: impl Into<String>,
        xs: Vec<Quantity>,
        values: Vec<f64>,
        unit: Unit,
    ) -> Result<Self, RangeError> {
        if xs.len() != values.len() {
            return Err(RangeError::InvalidSubdividerCount(xs.len()));
        }
        Ok(SampledSeries {
            name: name.into(),
            xs,
            values,
            unit,
        })
    }
}

impl QuantitySeries for SampledSeries {
    fn name(&self) -> &str {
        &self.name
    }

    fn quantities(&self, x_range: &SubdividedRange) -> XyQuantities {
        let series = XyQuantities::from_doubles(self.values.clone(), self.unit, x_range.clone());
        match series.with_sample_positions(self.xs.clone()) {
            Ok(series) => series,
            Err(err) => {
                warn!("Series '{}' does not fit the x axis: {}", self.name, err);
                XyQuantities::from_doubles(Vec::new(), self.unit, x_range.clone())
            }
        }
    }
}
