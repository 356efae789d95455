//! TreeView rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

use crate::tree::{CheckState, NodeKind};

use super::state::{Row, TreeView};

/// Indent per tree level, in cells.
pub(super) const INDENT_WIDTH: u16 = 2;
/// Width of the expander column.
pub(super) const EXPANDER_ZONE: u16 = 2;
/// Width of the icon column.
pub(super) const ICON_ZONE: u16 = 2;
/// Width of the checkbox column.
pub(super) const CHECKBOX_ZONE: u16 = 2;

fn expander_glyph(row: &Row) -> &'static str {
    if !row.state.has_children {
        "  "
    } else if row.state.is_open {
        "▼ "
    } else {
        "▶ "
    }
}

fn icon_glyph(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Folder => "◆ ",
        NodeKind::Entry => "• ",
        NodeKind::Hidden => "  ",
    }
}

fn checkbox_glyph(row: &Row, checkable: bool) -> &'static str {
    if checkable {
        match row.state.check {
            CheckState::Unchecked => "□ ",
            CheckState::Checked => "■ ",
            CheckState::PartiallyChecked => "◪ ",
        }
    } else if row.state.selected {
        "■ "
    } else {
        "□ "
    }
}

/// Truncate a string to a display width, unicode-width aware.
fn fit_to_width(s: &str, max: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        out.push(ch);
    }
    out
}

/// Render a tree view into `area`.
///
/// Records the area on the widget for hit-testing, clips to the viewport
/// using the widget's scroll offset, and highlights the cursor row.
pub fn render<T>(frame: &mut Frame, view: &TreeView<T>, style: Style, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    view.set_area(area);
    view.set_viewport_height(area.height);
    view.scroll_to_cursor();

    let checkable = view.checkable();
    let cursor = view.cursor();
    let offset = view.scroll_offset() as usize;
    let end = (offset + area.height as usize).min(view.visible_len());

    let mut lines = Vec::with_capacity(end - offset);
    for index in offset..end {
        let Some(row) = view.row(index) else { continue };

        let indent = " ".repeat((row.state.level * INDENT_WIDTH) as usize);
        let prefix_width = row.state.level * INDENT_WIDTH
            + EXPANDER_ZONE
            + ICON_ZONE
            + CHECKBOX_ZONE;
        let label_width = area.width.saturating_sub(prefix_width) as usize;

        let line_style = if cursor == Some(index) {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        };

        lines.push(
            Line::from(vec![
                Span::raw(indent),
                Span::raw(expander_glyph(&row)),
                Span::raw(icon_glyph(row.kind)),
                Span::raw(checkbox_glyph(&row, checkable)),
                Span::raw(fit_to_width(&row.name, label_width)),
            ])
            .style(line_style),
        );
    }

    let paragraph = Paragraph::new(lines).style(style);
    frame.render_widget(paragraph, area);
    view.clear_dirty();
}
