//! Depth-first projection of the tree into visible rows.

use super::arena::{NodeId, TreeArena};
use super::node::CheckState;

/// Rebuild the visible-row list.
///
/// Pre-order walk over the root anchor's children. Every visited node gets
/// its derived state restamped (`level`, `index`, `has_children`); children
/// of a closed node are skipped entirely, so the returned ids are exactly
/// the rows a renderer should draw, top to bottom.
pub fn flatten<T>(arena: &mut TreeArena<T>) -> Vec<NodeId> {
    let mut rows = Vec::new();
    let roots = arena
        .children(arena.root())
        .map(<[NodeId]>::to_vec)
        .unwrap_or_default();
    for (index, id) in roots.into_iter().enumerate() {
        visit(arena, id, 0, index, &mut rows);
    }
    rows
}

fn visit<T>(arena: &mut TreeArena<T>, id: NodeId, level: u16, index: usize, rows: &mut Vec<NodeId>) {
    let (children, descend) = match arena.get_mut(id) {
        Some(node) => {
            node.state.level = level;
            node.state.index = index;
            node.state.has_children = !node.children.is_empty();
            let descend = node.state.has_children && node.state.is_open;
            (node.children.clone(), descend)
        }
        None => return,
    };

    rows.push(id);

    if descend {
        for (ii, child) in children.into_iter().enumerate() {
            visit(arena, child, level + 1, ii, rows);
        }
    }
}

/// Visible leaf rows whose checkbox is [`CheckState::Checked`].
pub fn checked_leaves<T>(arena: &TreeArena<T>, rows: &[NodeId]) -> Vec<NodeId> {
    rows.iter()
        .copied()
        .filter(|id| {
            arena
                .get(*id)
                .is_some_and(|n| n.state.check == CheckState::Checked && !n.state.has_children)
        })
        .collect()
}

/// Visible leaf rows with boolean selection on.
pub fn selected_leaves<T>(arena: &TreeArena<T>, rows: &[NodeId]) -> Vec<NodeId> {
    rows.iter()
        .copied()
        .filter(|id| {
            arena
                .get(*id)
                .is_some_and(|n| n.state.selected && !n.state.has_children)
        })
        .collect()
}
