//! Frame identity and stack trace tree aggregation.

pub mod frame;
pub mod tree;

// Re-export main types
pub use frame::{Frame, FrameCategorization, FrameKey, FrameSeparator, FrameType, MethodDescriptor};
pub use tree::{StacktraceTreeModel, TreeNode};
