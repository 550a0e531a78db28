//! Recording files: schema, loading, and derived series and trees.

pub mod fold;
pub mod loader;
pub mod schema;
pub mod series;

// Re-export main types
pub use fold::fold_traces;
pub use loader::{parse_recording, read_recording};
pub use schema::{AttributeValue, RecordedEvent, Recording, StackTrace};
pub use series::{Aggregate, EventSeries};
