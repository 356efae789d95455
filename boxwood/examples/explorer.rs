//! Explorer demo
//!
//! Drives the TreeView widget end to end:
//! - Expand/collapse with Enter or the expander glyph
//! - Tri-state checkboxes with Space or a click on the box
//! - Context menu on right click (or `m`) with insert/remove actions
//! - A status line fed from the widget event queue

use std::fs::File;
use std::io;

use boxwood::prelude::*;
use boxwood::widgets::{context_menu, tree_view};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::LevelFilter;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use simplelog::{Config, WriteLogger};

fn sample_arena() -> Result<TreeArena<String>> {
    let mut arena = TreeArena::new();

    let src = arena.create_folder("src", None)?;
    arena.create_node("main.rs", Some(src), Some("entry point".into()), NodeKind::Entry)?;
    arena.create_node("lib.rs", Some(src), Some("crate root".into()), NodeKind::Entry)?;
    let tree = arena.create_folder("tree", Some(src))?;
    arena.create_entry("arena.rs", Some(tree))?;
    arena.create_entry("flatten.rs", Some(tree))?;
    arena.create_entry("check.rs", Some(tree))?;

    let docs = arena.create_folder("docs", None)?;
    arena.create_entry("overview.md", Some(docs))?;
    arena.create_entry("widgets.md", Some(docs))?;

    arena.create_node(".hidden", None, None, NodeKind::Hidden)?;
    Ok(arena)
}

fn main() -> io::Result<()> {
    // File logging; the terminal is busy drawing.
    if let Ok(log_file) = File::create("explorer.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let arena = sample_arena().expect("sample tree builds");
    let view = TreeView::with_arena(arena, true);
    let menu = ContextMenu::new(view.clone()).with_entry("Remove", MenuOp::Remove);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut status =
        String::from("Arrows: move  Enter: open/close  Space: check  right-click/m: menu  q: quit");

    loop {
        terminal.draw(|frame| {
            let [tree_area, status_area] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
                    .areas(frame.area());

            tree_view::render(frame, &view, Style::default().fg(Color::White), tree_area);
            frame.render_widget(
                Paragraph::new(status.as_str()).style(Style::default().fg(Color::DarkGray)),
                status_area,
            );
            // The menu draws over everything else.
            context_menu::render(frame, &menu, Style::default().fg(Color::White), frame.area());
        })?;

        let Some(input) = convert_event(event::read()?) else {
            continue;
        };

        match input {
            Event::Key(combo) => {
                // The open menu gets first refusal.
                if !menu.on_key(&combo).is_handled() && !view.on_key(&combo).is_handled() {
                    match combo.key {
                        Key::Char('q') => break,
                        Key::Char('e') => view.expand_all(),
                        Key::Char('c') => view.collapse_all(),
                        _ => {}
                    }
                }
            }
            Event::Click {
                kind: ClickKind::Primary,
                position,
                ..
            } => {
                if !menu.on_click(position.x, position.y).is_handled() {
                    view.on_click(position.x, position.y);
                }
            }
            Event::Click {
                kind: ClickKind::Secondary,
                position,
                ..
            } => {
                if !menu.on_secondary_click(position.x, position.y).is_handled() {
                    view.on_secondary_click(position.x, position.y);
                }
            }
            Event::Resize { .. } => {}
        }

        for event in view.take_events() {
            match event.kind {
                TreeViewEventKind::MenuRequested => {
                    // Keyboard requests have no anchor; open near the top.
                    let anchor = event.position.unwrap_or(Position::new(4, 2));
                    menu.open_for(event.node, anchor);
                }
                TreeViewEventKind::CheckChanged => {
                    status = format!("{} leaves checked", view.checked_leaves().len());
                }
                TreeViewEventKind::Opened | TreeViewEventKind::Closed => {
                    if let Some(node) = view.node(event.node) {
                        let action = if node.state.is_open { "Opened" } else { "Closed" };
                        status = format!("{action}: {}", node.name);
                    }
                }
                TreeViewEventKind::Inserted => {
                    if let Some(node) = view.node(event.node) {
                        status = format!("Inserted: {}", node.name);
                    }
                }
                TreeViewEventKind::Removed => {
                    status = format!("Removed node {}", event.node);
                }
                TreeViewEventKind::CursorMoved => {
                    if let Some(node) = view.node(event.node) {
                        let detail = node.data.as_deref().unwrap_or("");
                        status = format!("{} {}", node.name, detail);
                    }
                }
                TreeViewEventKind::SelectionChanged => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
