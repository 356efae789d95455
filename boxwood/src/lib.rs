//! boxwood — a terminal tree widget with checkbox selection.
//!
//! The crate splits into a plain tree model ([`tree`]: arena storage,
//! flattening, selection propagation) and interactive widgets over it
//! ([`widgets`]: the tree view and its context menu). Widgets follow a
//! shared-handle pattern: clones are cheap and share state, mutation
//! queues events the host drains after dispatch.

pub mod error;
pub mod events;
pub mod keys;
pub mod tree;
pub mod widgets;

pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::events::{
        ClickKind, Event, EventResult, Position, WidgetEvents, convert_event,
    };
    pub use crate::keys::{Key, KeyCombo, Modifiers};
    pub use crate::tree::{CheckState, NodeId, NodeKind, NodeState, TreeArena, TreeNode};
    pub use crate::widgets::{
        ContextMenu, MenuEntry, MenuOp, Row, TreeView, TreeViewEvent, TreeViewEventKind,
    };
}
