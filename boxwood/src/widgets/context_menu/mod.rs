//! Context menu widget: a popup bound to a tree node offering structural
//! actions.
//!
//! The default entries are "Add below" (splice a sibling in after the
//! target) and "Insert" (append a child); `Remove` can be registered as an
//! extra entry. Every action mutates the shared tree view, which queues
//! the matching event for the host to react to.

mod events;
pub mod render;
mod state;

pub use render::render;
pub use state::{ContextMenu, MenuEntry, MenuOp};
