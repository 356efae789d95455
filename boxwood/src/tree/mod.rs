//! Tree model: arena storage, flattening, and selection propagation.

mod arena;
mod check;
mod flatten;
mod node;

pub use arena::{NodeId, TreeArena};
pub use check::{toggle_checked, toggle_selected};
pub use flatten::{checked_leaves, flatten, selected_leaves};
pub use node::{CheckState, NodeKind, NodeState, TreeNode};
