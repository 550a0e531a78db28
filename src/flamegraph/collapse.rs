//! Collapsing a stacktrace tree into folded stack lines.
//!
//! Folded stacks are the `root;caller;callee weight` format consumed
//! by flame graph tooling. One line per tree node with self weight,
//! hottest first.

use crate::stacktrace::StacktraceTreeModel;

/// One folded stack: a semicolon-joined frame path and its self weight.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldedStack {
    pub stack: String,
    pub weight: f64,
}

/// Collapse a tree into folded stacks, heaviest first.
///
/// Only nodes that terminated at least one trace appear; purely
/// intermediate frames are covered by their descendants.
pub fn collapse_tree(tree: &StacktraceTreeModel) -> Vec<FoldedStack> {
    let mut stacks: Vec<FoldedStack> = tree
        .nodes()
        .filter(|node| node.self_weight > 0.0)
        .map(|node| FoldedStack {
            stack: tree.path_to(node.id).join(";"),
            weight: node.self_weight,
        })
        .collect();
    stacks.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.stack.cmp(&b.stack))
    });
    stacks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacktrace::{Frame, FrameSeparator, StacktraceTreeModel};

    fn frames(names: &[&str]) -> Vec<Frame> {
        // Leaf first, like stored traces.
        names.iter().map(|name| Frame::new("App", *name)).collect()
    }

    #[test]
    fn collapse_emits_one_line_per_terminating_node() {
        let mut tree = StacktraceTreeModel::new(FrameSeparator::default(), false);
        tree.add_trace(&frames(&["work", "main"]), false, 3.0);
        tree.add_trace(&frames(&["idle", "main"]), false, 1.0);

        let stacks = collapse_tree(&tree);
        assert_eq!(stacks.len(), 2);
        assert_eq!(stacks[0].stack, "App.main;App.work");
        assert_eq!(stacks[0].weight, 3.0);
        assert_eq!(stacks[1].stack, "App.main;App.idle");
    }

    #[test]
    fn intermediate_frames_do_not_get_their_own_line() {
        let mut tree = StacktraceTreeModel::new(FrameSeparator::default(), false);
        tree.add_trace(&frames(&["leaf", "mid", "main"]), false, 1.0);

        let stacks = collapse_tree(&tree);
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].stack, "App.main;App.mid;App.leaf");
    }

    #[test]
    fn equal_weights_sort_by_stack_name() {
        let mut tree = StacktraceTreeModel::new(FrameSeparator::default(), false);
        tree.add_trace(&frames(&["b"]), false, 1.0);
        tree.add_trace(&frames(&["a"]), false, 1.0);

        let stacks = collapse_tree(&tree);
        assert_eq!(stacks[0].stack, "App.a");
        assert_eq!(stacks[1].stack, "App.b");
    }
}
