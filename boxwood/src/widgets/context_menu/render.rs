//! Context menu rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::state::ContextMenu;

/// Compute the popup rect: anchored at the open position, sized to the
/// entries, clamped so it never leaves the screen.
fn popup_area<T>(menu: &ContextMenu<T>, screen: Rect) -> Rect {
    let entries = menu.entries();
    let anchor = menu.anchor();

    let label_width = entries
        .iter()
        .map(|e| e.label.width() as u16)
        .max()
        .unwrap_or(0);
    // One cell of padding either side, plus the border.
    let width = (label_width + 4).min(screen.width);
    let height = (entries.len() as u16 + 2).min(screen.height);

    let x = anchor.x.min(screen.width.saturating_sub(width));
    let y = anchor.y.min(screen.height.saturating_sub(height));
    Rect::new(x, y, width, height)
}

/// Render the menu as a bordered popup, if it is open.
pub fn render<T>(frame: &mut Frame, menu: &ContextMenu<T>, style: Style, screen: Rect) {
    if !menu.is_open() {
        return;
    }

    let area = popup_area(menu, screen);
    menu.set_area(area);

    let highlighted = menu.highlighted();
    let lines: Vec<Line> = menu
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let line = Line::from(format!(" {} ", entry.label));
            if i == highlighted {
                line.style(style.add_modifier(Modifier::REVERSED))
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(lines)
        .style(style)
        .block(Block::bordered());
    frame.render_widget(paragraph, area);
    menu.clear_dirty();
}
