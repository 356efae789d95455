//! TreeView widget state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use log::warn;
use ratatui::layout::Rect;

use crate::error::Result;
use crate::events::Position;
use crate::tree::{
    CheckState, NodeId, NodeKind, NodeState, TreeArena, TreeNode, checked_leaves, flatten,
    selected_leaves, toggle_checked, toggle_selected,
};

/// Unique identifier for a TreeView widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeViewId(usize);

impl TreeViewId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TreeViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__tree_view_{}", self.0)
    }
}

/// What happened inside a [`TreeView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeViewEventKind {
    /// A node was opened.
    Opened,
    /// A node was closed.
    Closed,
    /// Tri-state check state changed.
    CheckChanged,
    /// Boolean selection changed.
    SelectionChanged,
    /// A node was inserted.
    Inserted,
    /// A node (and its subtree) was removed.
    Removed,
    /// The cursor moved to a node.
    CursorMoved,
    /// A context menu was requested for a node.
    MenuRequested,
}

/// Event pushed by the widget and drained by the host.
///
/// This is the explicit observer seam: instead of stamping re-render
/// callbacks onto nodes, mutations queue events and the host reacts after
/// dispatch (`take_events`).
#[derive(Debug, Clone, Copy)]
pub struct TreeViewEvent {
    /// What happened.
    pub kind: TreeViewEventKind,
    /// The node it happened to.
    pub node: NodeId,
    /// Screen position, set for menu requests raised by mouse.
    pub position: Option<Position>,
}

impl TreeViewEvent {
    /// Create an event without a position.
    pub fn new(kind: TreeViewEventKind, node: NodeId) -> Self {
        Self {
            kind,
            node,
            position: None,
        }
    }

    /// Create an event anchored at a screen position.
    pub fn at(kind: TreeViewEventKind, node: NodeId, position: Position) -> Self {
        Self {
            kind,
            node,
            position: Some(position),
        }
    }
}

/// Snapshot of one visible row, handed to the renderer.
#[derive(Debug, Clone)]
pub struct Row {
    /// The node's id.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Icon kind.
    pub kind: NodeKind,
    /// Stamped state as of the last flatten.
    pub state: NodeState,
}

/// Internal state for the TreeView widget.
#[derive(Debug)]
pub(super) struct TreeViewInner<T> {
    /// The tree.
    pub arena: TreeArena<T>,
    /// Flattened visible rows (rebuilt on any structural change).
    pub visible: Vec<NodeId>,
    /// Cursor (index into the visible list).
    pub cursor: Option<usize>,
    /// Tri-state checkboxes when true, boolean selection when false.
    pub checkable: bool,
    /// Scroll offset in rows.
    pub scroll_offset: u16,
    /// Viewport height in rows.
    pub viewport_height: u16,
    /// Screen area of the last render, for hit-testing.
    pub area: Option<Rect>,
    /// Pending events for the host.
    pub events: Vec<TreeViewEvent>,
}

impl<T> Default for TreeViewInner<T> {
    fn default() -> Self {
        Self {
            arena: TreeArena::new(),
            visible: Vec::new(),
            cursor: None,
            checkable: false,
            scroll_offset: 0,
            viewport_height: 0,
            area: None,
            events: Vec::new(),
        }
    }
}

/// An interactive tree widget with expand/collapse and checkbox selection.
///
/// `TreeView<T>` owns a [`TreeArena`] and keeps a flattened visible-row
/// list in sync with it. The `checkable` flag picks the selection variant:
/// tri-state checkboxes with ancestor recomputation, or boolean selection
/// that only propagates downward.
///
/// Handles are cheap to clone and share state, so one can live in the
/// render path and another in event handlers.
#[derive(Debug)]
pub struct TreeView<T> {
    /// Unique identifier.
    id: TreeViewId,
    /// Internal state.
    pub(super) inner: Arc<RwLock<TreeViewInner<T>>>,
    /// Dirty flag for re-render.
    pub(super) dirty: Arc<AtomicBool>,
}

impl<T> TreeView<T> {
    /// Create an empty tree view.
    pub fn new(checkable: bool) -> Self {
        Self {
            id: TreeViewId::new(),
            inner: Arc::new(RwLock::new(TreeViewInner {
                checkable,
                ..Default::default()
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a tree view over an existing arena.
    pub fn with_arena(arena: TreeArena<T>, checkable: bool) -> Self {
        let view = Self::new(checkable);
        view.set_arena(arena);
        view
    }

    /// Replace the arena (rebuilds the visible list).
    pub fn set_arena(&self, arena: TreeArena<T>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.arena = arena;
            Self::rebuild(&mut guard);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> TreeViewId {
        self.id
    }

    /// Whether this view uses tri-state checkboxes.
    pub fn checkable(&self) -> bool {
        self.inner.read().map(|g| g.checkable).unwrap_or(false)
    }

    /// Rebuild the flattened row list and clamp cursor and scroll.
    pub(super) fn rebuild(inner: &mut TreeViewInner<T>) {
        inner.visible = flatten(&mut inner.arena);

        if let Some(cursor) = inner.cursor
            && cursor >= inner.visible.len()
        {
            inner.cursor = inner.visible.len().checked_sub(1);
        }

        let max_scroll = Self::max_scroll_offset(inner);
        if inner.scroll_offset > max_scroll {
            inner.scroll_offset = max_scroll;
        }
    }

    fn max_scroll_offset(inner: &TreeViewInner<T>) -> u16 {
        (inner.visible.len() as u16).saturating_sub(inner.viewport_height)
    }

    // -------------------------------------------------------------------------
    // Row access
    // -------------------------------------------------------------------------

    /// Number of visible rows.
    pub fn visible_len(&self) -> usize {
        self.inner.read().map(|g| g.visible.len()).unwrap_or(0)
    }

    /// Whether the tree holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.arena.is_empty())
            .unwrap_or(true)
    }

    /// Id of the visible row at `index`.
    pub fn row_id(&self, index: usize) -> Option<NodeId> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.visible.get(index).copied())
    }

    /// Snapshot of the visible row at `index`.
    pub fn row(&self, index: usize) -> Option<Row> {
        self.inner.read().ok().and_then(|g| {
            let id = *g.visible.get(index)?;
            let node = g.arena.get(id)?;
            Some(Row {
                id,
                name: node.name.clone(),
                kind: node.kind,
                state: node.state,
            })
        })
    }

    /// Snapshots of all visible rows, top to bottom.
    pub fn rows(&self) -> Vec<Row> {
        (0..self.visible_len()).filter_map(|i| self.row(i)).collect()
    }

    // -------------------------------------------------------------------------
    // Open/close
    // -------------------------------------------------------------------------

    /// Flip a node's open state and re-flatten.
    ///
    /// Only row visibility changes; check state is untouched. A stale id
    /// is logged and ignored.
    pub fn toggle_open(&self, id: NodeId) {
        if let Ok(mut guard) = self.inner.write() {
            let Some(node) = guard.arena.get_mut(id) else {
                warn!("toggle_open on stale node {id}");
                return;
            };
            node.state.is_open = !node.state.is_open;
            let kind = if node.state.is_open {
                TreeViewEventKind::Opened
            } else {
                TreeViewEventKind::Closed
            };
            Self::rebuild(&mut guard);
            guard.events.push(TreeViewEvent::new(kind, id));
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Flip the open state of the visible row at `index`.
    pub fn toggle_open_at(&self, index: usize) {
        if let Some(id) = self.row_id(index) {
            self.toggle_open(id);
        }
    }

    /// Open every node.
    pub fn expand_all(&self) {
        self.set_all_open(true);
    }

    /// Close every node, leaving only the top-level rows.
    pub fn collapse_all(&self) {
        self.set_all_open(false);
    }

    fn set_all_open(&self, open: bool) {
        if let Ok(mut guard) = self.inner.write() {
            for id in guard.arena.ids() {
                if let Some(node) = guard.arena.get_mut(id) {
                    node.state.is_open = open;
                }
            }
            Self::rebuild(&mut guard);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle the selection state of a node, propagating per the variant.
    ///
    /// Checkable views run the tri-state flip (downward overwrite plus
    /// ancestor recompute); plain views overwrite descendants with the
    /// node's new boolean.
    pub fn toggle_selection(&self, id: NodeId) {
        if let Ok(mut guard) = self.inner.write() {
            let result = if guard.checkable {
                toggle_checked(&mut guard.arena, id)
                    .map(|_| TreeViewEventKind::CheckChanged)
            } else {
                toggle_selected(&mut guard.arena, id)
                    .map(|_| TreeViewEventKind::SelectionChanged)
            };
            match result {
                Ok(kind) => {
                    Self::rebuild(&mut guard);
                    guard.events.push(TreeViewEvent::new(kind, id));
                    self.dirty.store(true, Ordering::SeqCst);
                }
                Err(err) => warn!("toggle_selection failed: {err}"),
            }
        }
    }

    /// Toggle selection of the visible row at `index`.
    pub fn toggle_selection_at(&self, index: usize) {
        if let Some(id) = self.row_id(index) {
            self.toggle_selection(id);
        }
    }

    /// Visible leaf nodes that are checked (tri-state views).
    pub fn checked_leaves(&self) -> Vec<NodeId> {
        self.inner
            .read()
            .map(|g| checked_leaves(&g.arena, &g.visible))
            .unwrap_or_default()
    }

    /// Visible leaf nodes that are selected (plain views).
    pub fn selected_leaves(&self) -> Vec<NodeId> {
        self.inner
            .read()
            .map(|g| selected_leaves(&g.arena, &g.visible))
            .unwrap_or_default()
    }

    /// Check state of a node.
    pub fn check_state(&self, id: NodeId) -> Option<CheckState> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.arena.get(id).map(|n| n.state.check))
    }

    // -------------------------------------------------------------------------
    // Structural mutation
    // -------------------------------------------------------------------------

    /// Insert a new sibling immediately after `target`.
    ///
    /// The new node is named after the target's stamped sibling index,
    /// carries no payload, and is announced with an `Inserted` event.
    pub fn insert_below(&self, target: NodeId) -> Result<NodeId> {
        self.mutate(target, |guard| {
            let index = guard
                .arena
                .get(target)
                .map(|n| n.state.index)
                .unwrap_or_default();
            let id = guard
                .arena
                .insert_after(target, format!("new node {index}"), None, NodeKind::Folder)?;
            Ok((id, TreeViewEvent::new(TreeViewEventKind::Inserted, id)))
        })
    }

    /// Append a new child to `target`.
    pub fn insert_child(&self, target: NodeId) -> Result<NodeId> {
        self.mutate(target, |guard| {
            let index = guard
                .arena
                .get(target)
                .map(|n| n.state.index)
                .unwrap_or_default();
            let id = guard.arena.create_node(
                format!("new Child {index}"),
                Some(target),
                None,
                NodeKind::Folder,
            )?;
            Ok((id, TreeViewEvent::new(TreeViewEventKind::Inserted, id)))
        })
    }

    /// Remove `target` and its subtree.
    pub fn remove(&self, target: NodeId) -> Result<NodeId> {
        self.mutate(target, |guard| {
            guard.arena.remove(target)?;
            Ok((target, TreeViewEvent::new(TreeViewEventKind::Removed, target)))
        })
    }

    fn mutate(
        &self,
        target: NodeId,
        op: impl FnOnce(&mut TreeViewInner<T>) -> Result<(NodeId, TreeViewEvent)>,
    ) -> Result<NodeId> {
        // A poisoned lock means a panicked handler; treat the target as gone.
        let mut guard = self
            .inner
            .write()
            .map_err(|_| crate::error::Error::StaleNode(target))?;
        let (id, event) = op(&mut guard)?;
        Self::rebuild(&mut guard);
        guard.events.push(event);
        self.dirty.store(true, Ordering::SeqCst);
        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Cursor
    // -------------------------------------------------------------------------

    /// Current cursor position (index into the visible list).
    pub fn cursor(&self) -> Option<usize> {
        self.inner.read().ok().and_then(|g| g.cursor)
    }

    /// Id of the node at the cursor.
    pub fn cursor_id(&self) -> Option<NodeId> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.cursor.and_then(|i| g.visible.get(i).copied()))
    }

    /// Move the cursor, announcing the move.
    pub fn set_cursor(&self, index: usize) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && index < guard.visible.len()
            && guard.cursor != Some(index)
        {
            guard.cursor = Some(index);
            let id = guard.visible[index];
            guard
                .events
                .push(TreeViewEvent::new(TreeViewEventKind::CursorMoved, id));
            self.dirty.store(true, Ordering::SeqCst);
            return true;
        }
        false
    }

    /// Move the cursor up one row.
    pub fn cursor_up(&self) -> bool {
        match self.cursor() {
            Some(0) => false,
            Some(cursor) => self.set_cursor(cursor - 1),
            None => self.set_cursor(0),
        }
    }

    /// Move the cursor down one row.
    pub fn cursor_down(&self) -> bool {
        match self.cursor() {
            Some(cursor) => self.set_cursor(cursor + 1),
            None => self.set_cursor(0),
        }
    }

    /// Move the cursor to the first row.
    pub fn cursor_first(&self) -> bool {
        self.set_cursor(0)
    }

    /// Move the cursor to the last row.
    pub fn cursor_last(&self) -> bool {
        match self.visible_len() {
            0 => false,
            len => self.set_cursor(len - 1),
        }
    }

    // -------------------------------------------------------------------------
    // Scrolling / viewport
    // -------------------------------------------------------------------------

    /// Scroll offset in rows.
    pub fn scroll_offset(&self) -> u16 {
        self.inner.read().map(|g| g.scroll_offset).unwrap_or(0)
    }

    /// Set the viewport height (called by the renderer).
    pub fn set_viewport_height(&self, height: u16) {
        if let Ok(mut guard) = self.inner.write() {
            guard.viewport_height = height;
            let max = Self::max_scroll_offset(&guard);
            if guard.scroll_offset > max {
                guard.scroll_offset = max;
            }
        }
    }

    /// Adjust the scroll offset to keep the cursor row in view.
    pub fn scroll_to_cursor(&self) {
        if let Ok(mut guard) = self.inner.write()
            && let Some(cursor) = guard.cursor
        {
            let cursor = cursor as u16;
            let viewport = guard.viewport_height;
            if viewport == 0 {
                return;
            }
            if cursor < guard.scroll_offset {
                guard.scroll_offset = cursor;
                self.dirty.store(true, Ordering::SeqCst);
            } else if cursor >= guard.scroll_offset + viewport {
                guard.scroll_offset = cursor - viewport + 1;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Record the rendered screen area (called by the renderer).
    pub(crate) fn set_area(&self, area: Rect) {
        if let Ok(mut guard) = self.inner.write() {
            guard.area = Some(area);
        }
    }

    /// Screen area of the last render.
    pub fn area(&self) -> Option<Rect> {
        self.inner.read().ok().and_then(|g| g.area)
    }

    // -------------------------------------------------------------------------
    // Menu requests and events
    // -------------------------------------------------------------------------

    /// Ask the host to open a context menu for a node.
    pub fn request_menu(&self, id: NodeId, position: Option<Position>) {
        if let Ok(mut guard) = self.inner.write() {
            if !guard.arena.contains(id) {
                warn!("menu request for stale node {id}");
                return;
            }
            let event = match position {
                Some(pos) => TreeViewEvent::at(TreeViewEventKind::MenuRequested, id, pos),
                None => TreeViewEvent::new(TreeViewEventKind::MenuRequested, id),
            };
            guard.events.push(event);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Drain pending events.
    pub fn take_events(&self) -> Vec<TreeViewEvent> {
        self.inner
            .write()
            .map(|mut g| std::mem::take(&mut g.events))
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Node access
    // -------------------------------------------------------------------------

    /// Run a closure against a node, if it still exists.
    pub fn with_node<R>(&self, id: NodeId, f: impl FnOnce(&TreeNode<T>) -> R) -> Option<R> {
        self.inner.read().ok().and_then(|g| g.arena.get(id).map(f))
    }

    /// Clone a node out of the tree.
    pub fn node(&self, id: NodeId) -> Option<TreeNode<T>>
    where
        T: Clone,
    {
        self.with_node(id, Clone::clone)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the view has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for TreeView<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T> Default for TreeView<T> {
    fn default() -> Self {
        Self::new(false)
    }
}
