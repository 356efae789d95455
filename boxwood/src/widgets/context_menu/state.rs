//! Context menu state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::warn;
use ratatui::layout::Rect;

use crate::events::Position;
use crate::tree::NodeId;
use crate::widgets::tree_view::TreeView;

/// Operation run by a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOp {
    /// Splice a new sibling in immediately after the target.
    InsertSibling,
    /// Append a new child to the target.
    InsertChild,
    /// Remove the target and its subtree.
    Remove,
}

/// One entry in the context menu.
#[derive(Debug, Clone)]
pub struct MenuEntry {
    /// Display label.
    pub label: String,
    /// Operation to run against the target node.
    pub op: MenuOp,
}

impl MenuEntry {
    /// Create an entry.
    pub fn new(label: impl Into<String>, op: MenuOp) -> Self {
        Self {
            label: label.into(),
            op,
        }
    }
}

/// Internal state for the ContextMenu widget.
#[derive(Debug)]
pub(super) struct ContextMenuInner {
    /// Node the menu acts on; `None` while closed.
    pub target: Option<NodeId>,
    /// Screen position the menu opens at.
    pub anchor: Position,
    /// Entries, top to bottom.
    pub entries: Vec<MenuEntry>,
    /// Highlighted entry index.
    pub highlighted: usize,
    /// Popup area of the last render, for hit-testing.
    pub area: Option<Rect>,
}

/// A popup menu bound to a tree node.
///
/// Opens on a node (usually from a `MenuRequested` tree-view event) and
/// runs its entries against the shared [`TreeView`]. Defaults to the two
/// insertion actions; more entries can be registered with
/// [`with_entry`](ContextMenu::with_entry).
#[derive(Debug)]
pub struct ContextMenu<T> {
    /// The tree view the entries mutate.
    pub(super) view: TreeView<T>,
    /// Internal state.
    pub(super) inner: Arc<RwLock<ContextMenuInner>>,
    /// Dirty flag for re-render.
    pub(super) dirty: Arc<AtomicBool>,
}

impl<T> ContextMenu<T> {
    /// Create a menu over a tree view, with the default insertion entries.
    pub fn new(view: TreeView<T>) -> Self {
        Self {
            view,
            inner: Arc::new(RwLock::new(ContextMenuInner {
                target: None,
                anchor: Position::default(),
                entries: vec![
                    MenuEntry::new("Add below", MenuOp::InsertSibling),
                    MenuEntry::new("Insert", MenuOp::InsertChild),
                ],
                highlighted: 0,
                area: None,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Register an extra entry.
    pub fn with_entry(self, label: impl Into<String>, op: MenuOp) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.entries.push(MenuEntry::new(label, op));
        }
        self
    }

    /// Open the menu for a node at a screen position.
    pub fn open_for(&self, target: NodeId, anchor: Position) {
        if let Ok(mut guard) = self.inner.write() {
            guard.target = Some(target);
            guard.anchor = anchor;
            guard.highlighted = 0;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Close the menu.
    pub fn close(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.target.take().is_some()
        {
            guard.area = None;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.target.is_some())
            .unwrap_or(false)
    }

    /// The node the menu is bound to.
    pub fn target(&self) -> Option<NodeId> {
        self.inner.read().ok().and_then(|g| g.target)
    }

    /// Snapshot of the entries.
    pub fn entries(&self) -> Vec<MenuEntry> {
        self.inner
            .read()
            .map(|g| g.entries.clone())
            .unwrap_or_default()
    }

    /// Index of the highlighted entry.
    pub fn highlighted(&self) -> usize {
        self.inner.read().map(|g| g.highlighted).unwrap_or(0)
    }

    /// Anchor position of the open menu.
    pub fn anchor(&self) -> Position {
        self.inner.read().map(|g| g.anchor).unwrap_or_default()
    }

    /// Move the highlight up.
    pub fn highlight_up(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.highlighted > 0
        {
            guard.highlighted -= 1;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Move the highlight down.
    pub fn highlight_down(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.highlighted + 1 < guard.entries.len()
        {
            guard.highlighted += 1;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Run the entry at `index` against the target, then close.
    ///
    /// The mutation goes through the shared tree view, which re-flattens
    /// and queues the matching event for the host.
    pub fn run(&self, index: usize) {
        let (target, op) = {
            let Ok(guard) = self.inner.read() else { return };
            let Some(target) = guard.target else { return };
            let Some(entry) = guard.entries.get(index) else {
                return;
            };
            (target, entry.op)
        };

        let result = match op {
            MenuOp::InsertSibling => self.view.insert_below(target).map(|_| ()),
            MenuOp::InsertChild => self.view.insert_child(target).map(|_| ()),
            MenuOp::Remove => self.view.remove(target).map(|_| ()),
        };
        if let Err(err) = result {
            warn!("menu action failed on {target}: {err}");
        }

        self.close();
    }

    /// Run the highlighted entry.
    pub fn run_highlighted(&self) {
        self.run(self.highlighted());
    }

    /// Record the popup area (called by the renderer).
    pub(super) fn set_area(&self, area: Rect) {
        if let Ok(mut guard) = self.inner.write() {
            guard.area = Some(area);
        }
    }

    /// Popup area of the last render.
    pub fn area(&self) -> Option<Rect> {
        self.inner.read().ok().and_then(|g| g.area)
    }

    /// Check if the menu has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for ContextMenu<T> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
