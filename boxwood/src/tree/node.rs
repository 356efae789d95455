//! Tree node data model.

use super::NodeId;

/// Checkbox state for the tri-state variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    /// Not checked.
    #[default]
    Unchecked,
    /// Fully checked.
    Checked,
    /// Some, but not all, descendants are checked.
    PartiallyChecked,
}

/// Node kind, selects the row icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// A node that groups others.
    #[default]
    Folder,
    /// A plain entry.
    Entry,
    /// Renders no icon but still occupies a row.
    Hidden,
}

/// Mutable UI state carried by every node.
///
/// `has_children`, `level` and `index` are derived values; they are
/// restamped on every flatten and must not be trusted between flattens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeState {
    /// Whether children are currently visible.
    pub is_open: bool,
    /// Whether the host is inline-editing this node's name.
    pub is_editing: bool,
    /// Tri-state checkbox state (checkable trees).
    pub check: CheckState,
    /// Boolean selection (single-select trees).
    pub selected: bool,
    /// Derived: the node has at least one child.
    pub has_children: bool,
    /// Derived: depth, with the root anchor's children at level 0.
    pub level: u16,
    /// Derived: position among siblings.
    pub index: usize,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            // New nodes start expanded.
            is_open: true,
            is_editing: false,
            check: CheckState::Unchecked,
            selected: false,
            has_children: false,
            level: 0,
            index: 0,
        }
    }
}

/// A node in a [`TreeArena`](super::TreeArena).
///
/// `parent` always names the node whose `children` list contains this id;
/// the arena maintains that invariant across inserts and removals.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    /// Display name.
    pub name: String,
    /// Containing node, `None` only for the root anchor.
    pub parent: Option<NodeId>,
    /// Ordered children, owned exclusively by this node.
    pub children: Vec<NodeId>,
    /// Icon kind.
    pub kind: NodeKind,
    /// Opaque payload, never interpreted by the tree.
    pub data: Option<T>,
    /// Mutable UI state.
    pub state: NodeState,
}

impl<T> TreeNode<T> {
    /// Create a node with default state.
    pub fn new(
        name: impl Into<String>,
        parent: Option<NodeId>,
        data: Option<T>,
        kind: NodeKind,
    ) -> Self {
        Self {
            name: name.into(),
            parent,
            children: Vec::new(),
            kind,
            data,
            state: NodeState::default(),
        }
    }

    /// Whether this node currently has children.
    ///
    /// Unlike `state.has_children` this reads the live child list.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
