//! XY series storage and lookup.

pub mod source;
pub mod xy;

// Re-export main types
pub use source::{QuantitySeries, SampledSeries};
pub use xy::XyQuantities;
