//! Flame graph generation using the inferno library.
//!
//! This module collapses stacktrace trees into folded stacks and
//! renders them as interactive SVG flame graphs or terminal summaries.

pub mod collapse;
pub mod generator;

// Re-export main types
pub use collapse::{collapse_tree, FoldedStack};
pub use generator::{folded_lines, generate_flamegraph, generate_text_summary, FlamegraphConfig};
