//! Folding recorded events into a stacktrace tree.

use crate::recording::schema::Recording;
use crate::stacktrace::{FrameSeparator, StacktraceTreeModel};
use log::debug;

/// Aggregate the stack traces of every event into one tree.
///
/// **Public** - source of flame graph and top-frame views
///
/// # Arguments
/// * `recording` - the loaded recording
/// * `separator` - frame identity used to group frames
/// * `inverted` - root the tree at the leaf frames instead of the entry
///   points
/// * `attribute` - weight each trace by this numeric attribute instead
///   of by event count; events lacking the attribute are skipped
///
/// # Returns
/// The tree; events without a stack trace still contribute their
/// weight to the total so self/total ratios stay honest.
pub fn fold_traces(
    recording: &Recording,
    separator: FrameSeparator,
    inverted: bool,
    attribute: Option<&str>,
) -> StacktraceTreeModel {
    let mut tree = StacktraceTreeModel::new(separator, inverted);
    let mut skipped = 0usize;
    for event in &recording.events {
        let weight = match attribute {
            None => 1.0,
            Some(name) => match event.attribute_quantity(name) {
                Some(quantity) => quantity.base_value(),
                None => {
                    skipped += 1;
                    continue;
                }
            },
        };
        match &event.stack_trace {
            Some(trace) => tree.add_trace(&trace.frames, trace.truncated, weight),
            None => tree.add_trace(&[], false, weight),
        }
    }
    if skipped > 0 {
        debug!(
            "Skipped {} events without attribute '{}'",
            skipped,
            attribute.unwrap_or_default()
        );
    }
    tree
}
