//! Output writers for charts, flame graphs and recordings.
//!
//! This module handles writing data to disk in various formats:
//! - SVG charts and flame graphs
//! - JSON recordings and reports

pub mod json;
pub mod svg;

// Re-export main functions
pub use json::{json_to_string, write_json};
pub use svg::write_svg;
