//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod chart;
pub mod flame;
pub mod summary;
pub mod utils;

// Re-export main command functions
pub use chart::{execute_chart, ChartArgs};
pub use flame::{execute_flame, FlameArgs};
pub use summary::{execute_summary, SummaryArgs};
pub use utils::{display_version, validate_recording_file};
