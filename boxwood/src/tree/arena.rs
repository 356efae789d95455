//! Arena storage for tree nodes.
//!
//! Nodes live in a slot vector and reference each other through integer
//! [`NodeId`] handles, so the parent back-reference plus child ownership
//! never forms an ownership cycle. Removed slots go onto a free list and
//! are reused by later insertions; a held id whose slot was freed resolves
//! to `None` and mutating through it is [`Error::StaleNode`].

use log::debug;

use crate::error::{Error, Result};

use super::node::{NodeKind, TreeNode};

/// Handle to a node inside a [`TreeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Slot-vector arena holding one tree.
///
/// The arena always contains a hidden root anchor; user nodes hang off it
/// and render starting at level 0. The anchor itself is never a visible
/// row and cannot be mutated through the public operations.
#[derive(Debug, Clone)]
pub struct TreeArena<T> {
    slots: Vec<Option<TreeNode<T>>>,
    free: Vec<usize>,
    root: NodeId,
}

impl<T> Default for TreeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeArena<T> {
    /// Create an arena containing only the root anchor.
    pub fn new() -> Self {
        let root = TreeNode::new("", None, None, NodeKind::Hidden);
        Self {
            slots: vec![Some(root)],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    /// The root anchor id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of user nodes (the root anchor is not counted).
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count() - 1
    }

    /// Whether the arena holds no user nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the id still resolves to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.get(id.0).is_some_and(Option::is_some)
    }

    /// Resolve an id.
    pub fn get(&self, id: NodeId) -> Option<&TreeNode<T>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Resolve an id mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TreeNode<T>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Parent of a node, `None` for the root anchor or a stale id.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of a node.
    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.get(id).map(|n| n.children.as_slice())
    }

    /// Ids of all live user nodes, in slot order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(i, s)| *i != self.root.0 && s.is_some())
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    /// Create a node appended to `parent`'s children.
    ///
    /// `parent = None` attaches to the root anchor.
    pub fn create_node(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeId>,
        data: Option<T>,
        kind: NodeKind,
    ) -> Result<NodeId> {
        let parent = parent.unwrap_or(self.root);
        if !self.contains(parent) {
            return Err(Error::StaleNode(parent));
        }

        let id = self.alloc(TreeNode::new(name, Some(parent), data, kind));
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        debug!("created node {id} under {parent}");
        Ok(id)
    }

    /// Create a folder node appended to `parent`'s children.
    pub fn create_folder(&mut self, name: impl Into<String>, parent: Option<NodeId>) -> Result<NodeId> {
        self.create_node(name, parent, None, NodeKind::Folder)
    }

    /// Create an entry node appended to `parent`'s children.
    pub fn create_entry(&mut self, name: impl Into<String>, parent: Option<NodeId>) -> Result<NodeId> {
        self.create_node(name, parent, None, NodeKind::Entry)
    }

    /// Splice a new node into the sibling list immediately after `sibling`.
    pub fn insert_after(
        &mut self,
        sibling: NodeId,
        name: impl Into<String>,
        data: Option<T>,
        kind: NodeKind,
    ) -> Result<NodeId> {
        if sibling == self.root {
            return Err(Error::RootImmutable);
        }
        let parent = self
            .get(sibling)
            .ok_or(Error::StaleNode(sibling))?
            .parent
            .ok_or(Error::RootImmutable)?;

        // Positional lookup rather than the stamped index, so an insert
        // before any flatten still lands in the right place.
        let pos = self
            .get(parent)
            .and_then(|p| p.children.iter().position(|c| *c == sibling))
            .ok_or(Error::StaleNode(sibling))?;

        let id = self.alloc(TreeNode::new(name, Some(parent), data, kind));
        if let Some(p) = self.get_mut(parent) {
            p.children.insert(pos + 1, id);
        }
        debug!("inserted node {id} after {sibling}");
        Ok(id)
    }

    /// Remove a node and its whole subtree, freeing their slots.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(Error::RootImmutable);
        }
        let parent = self.get(id).ok_or(Error::StaleNode(id))?.parent;

        if let Some(parent) = parent
            && let Some(p) = self.get_mut(parent)
        {
            p.children.retain(|c| *c != id);
        }
        self.free_subtree(id);
        debug!("removed node {id} and its subtree");
        Ok(())
    }

    fn alloc(&mut self, node: TreeNode<T>) -> NodeId {
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = Some(node);
            NodeId(slot)
        } else {
            self.slots.push(Some(node));
            NodeId(self.slots.len() - 1)
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = match self.slots.get_mut(id.0).and_then(Option::take) {
            Some(node) => node.children,
            None => return,
        };
        self.free.push(id.0);
        for child in children {
            self.free_subtree(child);
        }
    }
}
