//! Quantities, units, and natural subdivision policies.
//!
//! This module handles:
//! - Unit kinds and the fixed display-unit tables
//! - The `Quantity` value type (f64 + unit) and its arithmetic
//! - Snapping range subdivisions to natural values (250 ms, 64 MiB)
//! - Formatting of quantities and axis tick labels

pub mod format;
pub mod quantity;
pub mod snap;
pub mod unit;

// Re-export main types
pub use format::{format_quantity, format_tick_label};
pub use quantity::Quantity;
pub use snap::{first_bucket, floor_quantize};
pub use unit::{Unit, UnitKind};
