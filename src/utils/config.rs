//! Configuration and constants shared across the crate.

/// Current recording schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Axis subdivision minima. Ticks carry labels and need room to breathe,
// buckets only need to stay individually clickable.
pub const MIN_PIXELS_PER_TICK: f64 = 100.0;
pub const MIN_PIXELS_PER_BUCKET: f64 = 25.0;

/// Pixel width of the throwaway projection used to vet a requested
/// visible range before accepting it
pub const RANGE_TEST_PIXELS: f64 = 10_000.0;

/// Default output dimensions for rendered charts
pub const DEFAULT_CHART_WIDTH: u32 = 1200;
pub const DEFAULT_CHART_HEIGHT: u32 = 400;

/// Vertical space reserved under the plot area for the x-axis labels
pub const X_AXIS_HEIGHT: u32 = 24;
