//! TreeView widget: an interactive tree with expand/collapse and
//! checkbox selection.
//!
//! # Example
//!
//! ```ignore
//! use boxwood::prelude::*;
//!
//! let mut arena = TreeArena::<()>::new();
//! let docs = arena.create_folder("docs", None)?;
//! arena.create_entry("intro.md", Some(docs))?;
//!
//! let view = TreeView::with_arena(arena, true);
//!
//! // In the draw loop:
//! // tree_view::render(frame, &view, Style::default(), area);
//!
//! // In the event loop:
//! // view.on_key(&combo); view.on_click(x, y);
//! for event in view.take_events() {
//!     // react to opens, check changes, menu requests, ...
//! }
//! ```

mod events;
pub mod render;
mod state;

pub use render::render;
pub use state::{Row, TreeView, TreeViewEvent, TreeViewEventKind, TreeViewId};
