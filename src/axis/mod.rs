//! Axis subdivision and coordinate transforms.
//!
//! This module handles:
//! - Affine transforms between quantity, subdivider and pixel space
//! - Subdividing quantity ranges into naturally aligned ticks/buckets

pub mod range;
pub mod transform;

// Re-export main types
pub use range::SubdividedRange;
pub use transform::AffineTransform;
