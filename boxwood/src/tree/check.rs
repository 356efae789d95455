//! Selection propagation.
//!
//! Two variants share the same downward shape: toggling a node forces the
//! resulting state onto every descendant unconditionally. The tri-state
//! variant additionally recomputes ancestors on the way back up.

use log::warn;

use crate::error::{Error, Result};

use super::arena::{NodeId, TreeArena};
use super::node::CheckState;

/// Single-select toggle: flip the node, overwrite all descendants.
///
/// Returns the new state.
pub fn toggle_selected<T>(arena: &mut TreeArena<T>, id: NodeId) -> Result<bool> {
    let node = arena.get_mut(id).ok_or(Error::StaleNode(id))?;
    let selected = !node.state.selected;
    node.state.selected = selected;
    force_selected_down(arena, id, selected);
    Ok(selected)
}

fn force_selected_down<T>(arena: &mut TreeArena<T>, id: NodeId, selected: bool) {
    let children = arena
        .children(id)
        .map(<[NodeId]>::to_vec)
        .unwrap_or_default();
    for child in children {
        if let Some(node) = arena.get_mut(child) {
            node.state.selected = selected;
        }
        force_selected_down(arena, child, selected);
    }
}

/// Tri-state toggle.
///
/// The flip is binary: `Checked` goes to `Unchecked`, anything else
/// (including `PartiallyChecked`) goes to `Checked`. The result is pushed
/// down to every descendant, then ancestors are recomputed up to the root
/// anchor: an ancestor whose checked-child count differs from its child
/// count becomes `PartiallyChecked`, otherwise it keeps its prior state.
///
/// TODO: an all-checked sibling set should promote the parent to `Checked`
/// (and an all-unchecked one demote it to `Unchecked`); today the upward
/// pass only ever assigns `PartiallyChecked`. Kept as-is deliberately, and
/// pinned by the selection tests.
pub fn toggle_checked<T>(arena: &mut TreeArena<T>, id: NodeId) -> Result<CheckState> {
    let node = arena.get_mut(id).ok_or(Error::StaleNode(id))?;
    let check = match node.state.check {
        CheckState::Checked => CheckState::Unchecked,
        CheckState::Unchecked | CheckState::PartiallyChecked => CheckState::Checked,
    };
    node.state.check = check;
    force_check_down(arena, id, check);
    recompute_ancestors(arena, id);
    Ok(check)
}

fn force_check_down<T>(arena: &mut TreeArena<T>, id: NodeId, check: CheckState) {
    let children = arena
        .children(id)
        .map(<[NodeId]>::to_vec)
        .unwrap_or_default();
    for child in children {
        if let Some(node) = arena.get_mut(child) {
            node.state.check = check;
        }
        force_check_down(arena, child, check);
    }
}

fn recompute_ancestors<T>(arena: &mut TreeArena<T>, id: NodeId) {
    let root = arena.root();
    let mut current = arena.parent(id);

    while let Some(ancestor) = current {
        if ancestor == root {
            break;
        }
        let Some(node) = arena.get(ancestor) else {
            warn!("ancestor {ancestor} vanished during recompute");
            break;
        };
        let total = node.children.len();
        let checked = node
            .children
            .iter()
            .filter(|c| {
                arena
                    .get(**c)
                    .is_some_and(|n| n.state.check == CheckState::Checked)
            })
            .count();

        if checked != total
            && let Some(node) = arena.get_mut(ancestor)
        {
            node.state.check = CheckState::PartiallyChecked;
        }

        current = arena.parent(ancestor);
    }
}
