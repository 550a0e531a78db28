//! Weighted call tree aggregation over stack traces.
//!
//! Traces are folded into a shared tree: one node per distinct frame
//! identity per position, with the event weight added to every node on
//! the path and the self weight to the node the trace ends in. The
//! tree is append-only while building and fully navigable afterwards
//! through the node map and the per-parent child index.

use crate::stacktrace::frame::{Frame, FrameKey, FrameSeparator};
use log::warn;
use std::collections::HashMap;

/// One aggregated frame position in the tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: u32,
    pub parent: Option<u32>,
    pub key: FrameKey,
    /// Display name under the model's separator
    pub name: String,
    /// Weight of all traces passing through this node
    pub cumulative_weight: f64,
    /// Weight of the traces ending in this node
    pub self_weight: f64,
}

/// A call tree folded from event stack traces.
pub struct StacktraceTreeModel {
    separator: FrameSeparator,
    inverted: bool,
    nodes: HashMap<u32, TreeNode>,
    /// Child ids per parent; the tree roots hang under `None`
    children: HashMap<Option<u32>, Vec<u32>>,
    child_lookup: HashMap<(Option<u32>, FrameKey), u32>,
    next_id: u32,
    total_weight: f64,
}

impl StacktraceTreeModel {
    /// An empty model. `inverted` roots the tree at the leaf frames
    /// instead of the entry points.
    pub fn new(separator: FrameSeparator, inverted: bool) -> Self {
        StacktraceTreeModel {
            separator,
            inverted,
            nodes: HashMap::new(),
            children: HashMap::new(),
            child_lookup: HashMap::new(),
            next_id: 0,
            total_weight: 0.0,
        }
    }

    pub fn separator(&self) -> &FrameSeparator {
        &self.separator
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Fold one trace into the tree. `frames` are ordered leaf first,
    /// the way recordings store them; a truncated trace gets the
    /// unknown sentinel where its entry point would be.
    pub fn add_trace(&mut self, frames: &[Frame], truncated: bool, weight: f64) {
        if !weight.is_finite() || weight <= 0.0 {
            warn!("Ignoring trace with non-positive weight {}", weight);
            return;
        }
        self.total_weight += weight;
        if frames.is_empty() && !truncated {
            return;
        }

        let unknown = Frame::unknown();
        // Root-to-leaf walking order; inverted models walk leaf-to-root,
        // which is the stored order.
        let path: Vec<&Frame> = if self.inverted {
            frames
                .iter()
                .chain(truncated.then_some(&unknown))
                .collect()
        } else {
            truncated
                .then_some(&unknown)
                .into_iter()
                .chain(frames.iter().rev())
                .collect()
        };

        let mut parent: Option<u32> = None;
        let last = path.len() - 1;
        for (depth, frame) in path.into_iter().enumerate() {
            let id = self.intern(parent, frame);
            if let Some(node) = self.nodes.get_mut(&id) {
                node.cumulative_weight += weight;
                if depth == last {
                    node.self_weight += weight;
                }
            }
            parent = Some(id);
        }
    }

    /// Find or create the child of `parent` with `frame`'s identity.
    fn intern(&mut self, parent: Option<u32>, frame: &Frame) -> u32 {
        let key = self.separator.key(frame);
        if let Some(id) = self.child_lookup.get(&(parent, key.clone())) {
            return *id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(
            id,
            TreeNode {
                id,
                parent,
                key: key.clone(),
                name: self.separator.frame_name(frame),
                cumulative_weight: 0.0,
                self_weight: 0.0,
            },
        );
        self.children.entry(parent).or_default().push(id);
        self.child_lookup.insert((parent, key), id);
        id
    }

    pub fn node(&self, id: u32) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    /// Children of a node, or the tree roots for `None`, in insertion
    /// order.
    pub fn children_of(&self, parent: Option<u32>) -> &[u32] {
        self.children
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn root_children(&self) -> &[u32] {
        self.children_of(None)
    }

    /// Total weight of all added traces, including those without frames.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values()
    }

    /// Path of names from the root down to `id`.
    pub fn path_to(&self, id: u32) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current.and_then(|id| self.nodes.get(&id)) {
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.reverse();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacktrace::frame::FrameCategorization;

    fn frames(names: &[&str]) -> Vec<Frame> {
        // Leaf first, like stored traces.
        names
            .iter()
            .map(|name| Frame::new("test.App", *name))
            .collect()
    }

    fn method_model() -> StacktraceTreeModel {
        StacktraceTreeModel::new(FrameSeparator::default(), false)
    }

    #[test]
    fn identical_traces_fold_into_one_branch() {
        let mut model = method_model();
        for _ in 0..5 {
            model.add_trace(&frames(&["work"]), false, 1.0);
        }
        assert_eq!(model.root_children().len(), 1);
        let root = model.node(model.root_children()[0]).unwrap();
        assert_eq!(root.cumulative_weight, 5.0);
        assert_eq!(root.self_weight, 5.0);
        assert_eq!(model.total_weight(), 5.0);
    }

    #[test]
    fn weight_accumulates_along_the_path() {
        let mut model = method_model();
        model.add_trace(&frames(&["leaf_a", "shared", "main"]), false, 1.0);
        model.add_trace(&frames(&["leaf_b", "shared", "main"]), false, 1.0);

        let main_id = model.root_children()[0];
        let main = model.node(main_id).unwrap();
        assert_eq!(main.name, "test.App.main");
        assert_eq!(main.cumulative_weight, 2.0);
        assert_eq!(main.self_weight, 0.0);

        let shared_id = model.children_of(Some(main_id))[0];
        let shared = model.node(shared_id).unwrap();
        assert_eq!(shared.cumulative_weight, 2.0);
        assert_eq!(model.children_of(Some(shared_id)).len(), 2);
    }

    #[test]
    fn attribute_weights_are_summed() {
        let mut model = method_model();
        model.add_trace(&frames(&["alloc"]), false, 1024.0);
        model.add_trace(&frames(&["alloc"]), false, 2048.0);
        let node = model.node(model.root_children()[0]).unwrap();
        assert_eq!(node.cumulative_weight, 3072.0);
    }

    #[test]
    fn truncated_traces_root_in_the_unknown_frame() {
        let mut model = method_model();
        model.add_trace(&frames(&["deep"]), true, 1.0);
        let root = model.node(model.root_children()[0]).unwrap();
        assert_eq!(root.name, "<truncated>");
        let child = model.node(model.children_of(Some(root.id))[0]).unwrap();
        assert_eq!(child.name, "test.App.deep");
        assert_eq!(child.self_weight, 1.0);
    }

    #[test]
    fn inverted_model_roots_at_the_leaves() {
        let mut model = StacktraceTreeModel::new(FrameSeparator::default(), true);
        model.add_trace(&frames(&["leaf", "main"]), false, 1.0);
        let root = model.node(model.root_children()[0]).unwrap();
        assert_eq!(root.name, "test.App.leaf");
    }

    #[test]
    fn finer_categorization_splits_a_branch() {
        let mut site_a = Frame::new("test.App", "hot");
        site_a.line = Some(10);
        let mut site_b = Frame::new("test.App", "hot");
        site_b.line = Some(20);

        let mut by_method = method_model();
        by_method.add_trace(std::slice::from_ref(&site_a), false, 1.0);
        by_method.add_trace(std::slice::from_ref(&site_b), false, 1.0);
        assert_eq!(by_method.root_children().len(), 1);

        let mut by_line = StacktraceTreeModel::new(
            FrameSeparator::new(FrameCategorization::Line, false),
            false,
        );
        by_line.add_trace(std::slice::from_ref(&site_a), false, 1.0);
        by_line.add_trace(std::slice::from_ref(&site_b), false, 1.0);
        assert_eq!(by_line.root_children().len(), 2);
    }

    #[test]
    fn traces_without_frames_count_toward_the_total_only() {
        let mut model = method_model();
        model.add_trace(&[], false, 1.0);
        model.add_trace(&frames(&["work"]), false, 1.0);
        assert_eq!(model.total_weight(), 2.0);
        assert_eq!(model.node_count(), 1);
    }

    #[test]
    fn path_to_walks_back_to_the_root() {
        let mut model = method_model();
        model.add_trace(&frames(&["leaf", "mid", "main"]), false, 1.0);
        let main_id = model.root_children()[0];
        let mid_id = model.children_of(Some(main_id))[0];
        let leaf_id = model.children_of(Some(mid_id))[0];
        assert_eq!(
            model.path_to(leaf_id),
            vec!["test.App.main", "test.App.mid", "test.App.leaf"]
        );
    }
}
