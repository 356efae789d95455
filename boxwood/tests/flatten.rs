//! Tests for the visible-row projection and derived-state stamping.

use boxwood::tree::{NodeKind, TreeArena, flatten};

/// Build a small two-folder tree:
///
/// ```text
/// src/
///   widgets/
///     mod.rs
///   lib.rs
/// docs/
///   intro.md
/// ```
fn sample() -> TreeArena<()> {
    let mut arena = TreeArena::new();
    let src = arena.create_folder("src", None).unwrap();
    let widgets = arena.create_folder("widgets", Some(src)).unwrap();
    arena.create_entry("mod.rs", Some(widgets)).unwrap();
    arena.create_entry("lib.rs", Some(src)).unwrap();
    let docs = arena.create_folder("docs", None).unwrap();
    arena.create_entry("intro.md", Some(docs)).unwrap();
    arena
}

// ============================================================================
// Row counts
// ============================================================================

#[test]
fn test_all_open_yields_every_node() {
    let mut arena = sample();
    let rows = flatten(&mut arena);
    assert_eq!(rows.len(), arena.len(), "every node visible when all open");
}

#[test]
fn test_all_closed_yields_top_level_only() {
    let mut arena = sample();
    for id in arena.ids() {
        arena.get_mut(id).unwrap().state.is_open = false;
    }
    let rows = flatten(&mut arena);
    assert_eq!(rows.len(), 2, "only src and docs remain");

    let names: Vec<_> = rows
        .iter()
        .map(|id| arena.get(*id).unwrap().name.clone())
        .collect();
    assert_eq!(names, ["src", "docs"]);
}

#[test]
fn test_closing_a_folder_hides_its_subtree() {
    let mut arena = sample();
    let rows = flatten(&mut arena);
    let src = rows[0];
    assert_eq!(arena.get(src).unwrap().name, "src");

    arena.get_mut(src).unwrap().state.is_open = false;
    let rows = flatten(&mut arena);
    // src stays visible, its 3 descendants disappear.
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_leaf_toggle_is_a_noop_on_row_count() {
    let mut arena = sample();
    let before = flatten(&mut arena).len();

    let leaf = arena
        .ids()
        .into_iter()
        .find(|id| arena.get(*id).unwrap().name == "lib.rs")
        .unwrap();
    arena.get_mut(leaf).unwrap().state.is_open = false;

    let after = flatten(&mut arena).len();
    assert_eq!(before, after, "closing a leaf changes nothing");
}

// ============================================================================
// Derived state stamping
// ============================================================================

#[test]
fn test_levels_and_indices_stamped() {
    let mut arena = sample();
    let rows = flatten(&mut arena);

    let stamped: Vec<(String, u16, usize)> = rows
        .iter()
        .map(|id| {
            let n = arena.get(*id).unwrap();
            (n.name.clone(), n.state.level, n.state.index)
        })
        .collect();

    assert_eq!(
        stamped,
        [
            ("src".into(), 0, 0),
            ("widgets".into(), 1, 0),
            ("mod.rs".into(), 2, 0),
            ("lib.rs".into(), 1, 1),
            ("docs".into(), 0, 1),
            ("intro.md".into(), 1, 0),
        ]
    );
}

#[test]
fn test_has_children_recomputed_on_flatten() {
    let mut arena = sample();
    let rows = flatten(&mut arena);
    let docs = rows[4];
    assert!(arena.get(docs).unwrap().state.has_children);

    let intro = arena.children(docs).unwrap()[0];
    arena.remove(intro).unwrap();
    flatten(&mut arena);
    assert!(
        !arena.get(docs).unwrap().state.has_children,
        "emptied folder restamped as leaf"
    );
}

#[test]
fn test_insert_after_lands_at_next_index() {
    let mut arena = TreeArena::<()>::new();
    let parent = arena.create_folder("parent", None).unwrap();
    let mut siblings = Vec::new();
    for i in 0..4 {
        siblings.push(arena.create_entry(format!("n{i}"), Some(parent)).unwrap());
    }
    flatten(&mut arena);
    assert_eq!(arena.get(siblings[2]).unwrap().state.index, 2);

    let inserted = arena
        .insert_after(siblings[2], "between", None, NodeKind::Entry)
        .unwrap();
    flatten(&mut arena);

    assert_eq!(arena.get(inserted).unwrap().state.index, 3);
    assert_eq!(
        arena.get(siblings[3]).unwrap().state.index,
        4,
        "old index 3 pushed to 4"
    );
}

// ============================================================================
// Arena lifecycle
// ============================================================================

#[test]
fn test_remove_frees_subtree_and_reuses_slots() {
    let mut arena = sample();
    let src = flatten(&mut arena)[0];
    arena.remove(src).unwrap();

    assert_eq!(arena.len(), 2, "src subtree gone");
    assert!(!arena.contains(src));

    // Freed slots get reused by later insertions.
    let replacement = arena.create_folder("again", None).unwrap();
    assert!(arena.contains(replacement));
    assert_eq!(arena.len(), 3);
}

#[test]
fn test_stale_and_root_errors() {
    use boxwood::error::Error;

    let mut arena = sample();
    let src = flatten(&mut arena)[0];
    arena.remove(src).unwrap();

    assert_eq!(
        arena.insert_after(src, "x", None, NodeKind::Entry),
        Err(Error::StaleNode(src))
    );
    assert_eq!(arena.remove(arena.root()), Err(Error::RootImmutable));
    assert_eq!(
        arena.insert_after(arena.root(), "x", None, NodeKind::Entry),
        Err(Error::RootImmutable)
    );
}
