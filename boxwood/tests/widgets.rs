//! Tests for the TreeView and ContextMenu widgets: event dispatch, hit
//! zones, menu actions, and the host-facing event queue.

use boxwood::prelude::*;
use boxwood::widgets::{context_menu, tree_view};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::style::Style;

fn sample_view(checkable: bool) -> TreeView<()> {
    let mut arena = TreeArena::new();
    let src = arena.create_folder("src", None).unwrap();
    let widgets = arena.create_folder("widgets", Some(src)).unwrap();
    arena.create_entry("mod.rs", Some(widgets)).unwrap();
    arena.create_entry("lib.rs", Some(src)).unwrap();
    let docs = arena.create_folder("docs", None).unwrap();
    arena.create_entry("intro.md", Some(docs)).unwrap();
    TreeView::with_arena(arena, checkable)
}

/// Render once into a test terminal so the widget records its area.
fn draw(view: &TreeView<()>) {
    let backend = TestBackend::new(40, 10);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| tree_view::render(frame, view, Style::default(), frame.area()))
        .unwrap();
}

fn draw_with_menu(view: &TreeView<()>, menu: &ContextMenu<()>) {
    let backend = TestBackend::new(40, 10);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            tree_view::render(frame, view, Style::default(), area);
            context_menu::render(frame, menu, Style::default(), area);
        })
        .unwrap();
}

// ============================================================================
// Keyboard handling
// ============================================================================

#[test]
fn test_arrow_keys_move_cursor() {
    let view = sample_view(false);

    assert_eq!(view.on_key(&KeyCombo::key(Key::Down)), EventResult::Consumed);
    assert_eq!(view.cursor(), Some(0));
    view.on_key(&KeyCombo::key(Key::Down));
    assert_eq!(view.cursor(), Some(1));
    view.on_key(&KeyCombo::key(Key::Up));
    assert_eq!(view.cursor(), Some(0));

    view.on_key(&KeyCombo::key(Key::End));
    assert_eq!(view.cursor(), Some(view.visible_len() - 1));
    view.on_key(&KeyCombo::key(Key::Home));
    assert_eq!(view.cursor(), Some(0));
}

#[test]
fn test_cursor_stops_at_edges() {
    let view = sample_view(false);
    view.on_key(&KeyCombo::key(Key::Down));
    assert_eq!(
        view.on_key(&KeyCombo::key(Key::Up)),
        EventResult::Ignored,
        "already at the first row"
    );
}

#[test]
fn test_enter_toggles_open_at_cursor() {
    let view = sample_view(false);
    let all = view.visible_len();
    view.on_key(&KeyCombo::key(Key::Down));

    view.on_key(&KeyCombo::key(Key::Enter));
    assert_eq!(view.visible_len(), all - 3, "src subtree hidden");
    view.on_key(&KeyCombo::key(Key::Enter));
    assert_eq!(view.visible_len(), all);
}

#[test]
fn test_space_toggles_check_at_cursor() {
    let view = sample_view(true);
    view.on_key(&KeyCombo::key(Key::Down));
    view.on_key(&KeyCombo::key(Key::Space));

    let src = view.row_id(0).unwrap();
    assert_eq!(view.check_state(src), Some(CheckState::Checked));
    // Downward overwrite reached the leaves: they are visible and checked.
    assert_eq!(view.checked_leaves().len(), 2);
}

#[test]
fn test_modified_keys_are_ignored() {
    let view = sample_view(false);
    assert_eq!(
        view.on_key(&KeyCombo::key(Key::Down).ctrl()),
        EventResult::Ignored
    );
    assert_eq!(view.cursor(), None);
}

// ============================================================================
// Mouse handling
// ============================================================================

#[test]
fn test_click_outside_area_is_ignored() {
    let view = sample_view(false);
    // Never rendered: no recorded area, nothing to hit.
    assert_eq!(view.on_click(0, 0), EventResult::Ignored);

    draw(&view);
    assert_eq!(view.on_click(0, 9), EventResult::Ignored, "below last row");
}

#[test]
fn test_click_moves_cursor() {
    let view = sample_view(false);
    draw(&view);

    assert_eq!(view.on_click(20, 3), EventResult::Consumed);
    assert_eq!(view.cursor(), Some(3));
}

#[test]
fn test_click_on_expander_toggles_folder() {
    let view = sample_view(false);
    draw(&view);
    let all = view.visible_len();

    // Row 0 is "src" at level 0; its expander occupies columns 0..2.
    view.on_click(0, 0);
    assert_eq!(view.visible_len(), all - 3);
    view.on_click(0, 0);
    assert_eq!(view.visible_len(), all);
}

#[test]
fn test_click_on_leaf_expander_is_noop() {
    let view = sample_view(false);
    draw(&view);
    let all = view.visible_len();

    // Row 2 is "mod.rs" at level 2; expander zone starts at column 4.
    assert_eq!(view.on_click(4, 2), EventResult::Consumed);
    assert_eq!(view.visible_len(), all, "row count unchanged");
}

#[test]
fn test_click_on_checkbox_toggles_selection() {
    let view = sample_view(false);
    draw(&view);

    // Row 4 is "docs" at level 0; checkbox occupies columns 4..6.
    view.on_click(4, 4);
    let docs = view.row_id(4).unwrap();
    assert!(view.node(docs).unwrap().state.selected);
    let intro = view.row_id(5).unwrap();
    assert!(
        view.node(intro).unwrap().state.selected,
        "selection pushed down to the child"
    );
}

#[test]
fn test_right_click_requests_menu() {
    let view = sample_view(false);
    draw(&view);
    view.take_events();

    assert_eq!(view.on_secondary_click(10, 1), EventResult::Consumed);
    let events = view.take_events();
    let request = events
        .iter()
        .find(|e| e.kind == TreeViewEventKind::MenuRequested)
        .expect("menu request queued");
    assert_eq!(Some(request.node), view.row_id(1));
    assert_eq!(request.position, Some(Position::new(10, 1)));
}

// ============================================================================
// Event queue
// ============================================================================

#[test]
fn test_events_drain_once() {
    let view = sample_view(false);
    let src = view.row_id(0).unwrap();
    view.toggle_open(src);

    let events = view.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, TreeViewEventKind::Closed);
    assert_eq!(events[0].node, src);

    assert!(view.take_events().is_empty(), "queue drained");

    view.toggle_open(src);
    assert_eq!(view.take_events()[0].kind, TreeViewEventKind::Opened);
}

// ============================================================================
// Context menu
// ============================================================================

#[test]
fn test_default_entries() {
    let view = sample_view(false);
    let menu = ContextMenu::new(view);
    let labels: Vec<_> = menu.entries().iter().map(|e| e.label.clone()).collect();
    assert_eq!(labels, ["Add below", "Insert"]);
    assert!(!menu.is_open());
}

#[test]
fn test_add_below_splices_sibling() {
    let view = sample_view(false);
    let menu = ContextMenu::new(view.clone());

    // "widgets" sits at visible index 1, sibling index 0 under src.
    let widgets = view.row_id(1).unwrap();
    menu.open_for(widgets, Position::new(5, 1));
    menu.run(0);

    assert!(!menu.is_open(), "menu closes after running an action");
    let inserted = view
        .take_events()
        .into_iter()
        .find(|e| e.kind == TreeViewEventKind::Inserted)
        .expect("insert announced");
    let node = view.node(inserted.node).unwrap();
    assert_eq!(node.name, "new node 0");
    assert_eq!(node.state.level, 1, "same level as the target");
    assert_eq!(node.state.index, 1, "spliced in right after the target");
}

#[test]
fn test_insert_appends_child() {
    let view = sample_view(false);
    let menu = ContextMenu::new(view.clone());

    let docs = view.row_id(4).unwrap();
    menu.open_for(docs, Position::new(5, 4));
    menu.run_highlighted(); // entry 0
    // Reopen and run "Insert" this time.
    menu.open_for(docs, Position::new(5, 4));
    menu.highlight_down();
    menu.run_highlighted();

    let children = view.node(docs).unwrap().children;
    let last = *children.last().unwrap();
    let child = view.node(last).unwrap();
    assert_eq!(child.name, "new Child 1");
    assert_eq!(child.state.level, 1);
}

#[test]
fn test_remove_entry_deletes_subtree() {
    let view = sample_view(false);
    let menu = ContextMenu::new(view.clone()).with_entry("Remove", MenuOp::Remove);

    let src = view.row_id(0).unwrap();
    let before = view.visible_len();
    menu.open_for(src, Position::new(0, 0));
    menu.run(2);

    assert_eq!(view.visible_len(), before - 4, "src and its subtree gone");
    assert!(view.node(src).is_none());
    assert!(
        view.take_events()
            .iter()
            .any(|e| e.kind == TreeViewEventKind::Removed)
    );
}

#[test]
fn test_menu_keyboard_and_dismissal() {
    let view = sample_view(false);
    let menu = ContextMenu::new(view.clone());

    assert_eq!(
        menu.on_key(&KeyCombo::key(Key::Down)),
        EventResult::Ignored,
        "closed menu ignores keys"
    );

    let src = view.row_id(0).unwrap();
    menu.open_for(src, Position::new(3, 2));
    menu.on_key(&KeyCombo::key(Key::Down));
    assert_eq!(menu.highlighted(), 1);
    menu.on_key(&KeyCombo::key(Key::Down));
    assert_eq!(menu.highlighted(), 1, "highlight clamps at the last entry");

    menu.on_key(&KeyCombo::key(Key::Escape));
    assert!(!menu.is_open());
}

#[test]
fn test_click_away_closes_menu() {
    let view = sample_view(false);
    let menu = ContextMenu::new(view.clone());

    let src = view.row_id(0).unwrap();
    menu.open_for(src, Position::new(3, 2));
    draw_with_menu(&view, &menu);

    assert_eq!(menu.on_click(39, 9), EventResult::Consumed);
    assert!(!menu.is_open(), "click outside dismisses");
}

#[test]
fn test_click_runs_entry() {
    let view = sample_view(false);
    let menu = ContextMenu::new(view.clone());

    let widgets = view.row_id(1).unwrap();
    menu.open_for(widgets, Position::new(3, 2));
    draw_with_menu(&view, &menu);

    let area = menu.area().unwrap();
    // First entry row sits just under the top border.
    menu.on_click(area.x + 1, area.y + 1);
    assert!(!menu.is_open());
    assert!(
        view.take_events()
            .iter()
            .any(|e| e.kind == TreeViewEventKind::Inserted)
    );
}

// ============================================================================
// Stale targets
// ============================================================================

#[test]
fn test_menu_on_stale_target_is_noop() {
    let view = sample_view(false);
    let menu = ContextMenu::new(view.clone());

    let docs = view.row_id(4).unwrap();
    view.remove(docs).unwrap();
    let before = view.visible_len();

    menu.open_for(docs, Position::new(0, 0));
    menu.run(0);

    assert_eq!(view.visible_len(), before, "stale action changes nothing");
    assert!(!menu.is_open());
}
