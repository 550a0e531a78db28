//! Flightview Studio
//!
//! Chart axis math, render-row composition and stack trace tree
//! aggregation for flight recording analysis.
//!
//! This crate provides the core implementation for the
//! `flightview` CLI tool: it maps physical quantities onto pixel
//! grids with naturally aligned ticks, buckets time-series samples
//! into chart lanes, composes rows into a hit-testable render tree,
//! and folds per-event stack traces into weighted call trees for
//! flame graph export.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install flightview-studio
//! flightview --help
//! ```

pub mod axis;
pub mod chart;
pub mod commands;
pub mod draw;
pub mod flamegraph;
pub mod output;
pub mod recording;
pub mod render;
pub mod series;
pub mod stacktrace;
pub mod units;
pub mod utils;
