//! Interactive widgets built on the tree model.

pub mod context_menu;
pub mod tree_view;

pub use context_menu::{ContextMenu, MenuEntry, MenuOp};
pub use tree_view::{Row, TreeView, TreeViewEvent, TreeViewEventKind, TreeViewId};
