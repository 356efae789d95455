//! Event handling for the TreeView widget.
//!
//! Row hit-testing uses the area recorded by the last render. Each row is
//! split into column zones after the indent: expander, icon, checkbox,
//! label. The zone widths mirror the renderer exactly.

use crate::events::{EventResult, Position, WidgetEvents};
use crate::keys::{Key, KeyCombo};

use super::render::{CHECKBOX_ZONE, EXPANDER_ZONE, ICON_ZONE, INDENT_WIDTH};
use super::state::TreeView;

/// Which part of a row was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowZone {
    Expander,
    Icon,
    Checkbox,
    Label,
}

impl<T> TreeView<T> {
    /// Visible row index for a screen y coordinate, if inside the area.
    fn index_from_screen_y(&self, y: u16) -> Option<usize> {
        let area = self.area()?;
        if y < area.y || y >= area.y + area.height {
            return None;
        }
        let index = (self.scroll_offset() + y - area.y) as usize;
        (index < self.visible_len()).then_some(index)
    }

    /// Column zone for a screen x coordinate within a row at `level`.
    fn zone_from_screen_x(&self, x: u16, level: u16) -> Option<RowZone> {
        let area = self.area()?;
        if x < area.x || x >= area.x + area.width {
            return None;
        }
        let rel = x - area.x;
        let indent = level * INDENT_WIDTH;
        if rel < indent {
            return Some(RowZone::Label);
        }
        let col = rel - indent;
        Some(if col < EXPANDER_ZONE {
            RowZone::Expander
        } else if col < EXPANDER_ZONE + ICON_ZONE {
            RowZone::Icon
        } else if col < EXPANDER_ZONE + ICON_ZONE + CHECKBOX_ZONE {
            RowZone::Checkbox
        } else {
            RowZone::Label
        })
    }
}

impl<T> WidgetEvents for TreeView<T> {
    fn on_key(&self, key: &KeyCombo) -> EventResult {
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }

        match key.key {
            // Navigation
            Key::Up => {
                if self.cursor_up() {
                    self.scroll_to_cursor();
                    return EventResult::Consumed;
                }
            }
            Key::Down => {
                if self.cursor_down() {
                    self.scroll_to_cursor();
                    return EventResult::Consumed;
                }
            }
            Key::Home => {
                if self.cursor_first() {
                    self.scroll_to_cursor();
                    return EventResult::Consumed;
                }
            }
            Key::End => {
                if self.cursor_last() {
                    self.scroll_to_cursor();
                    return EventResult::Consumed;
                }
            }

            // Expand/collapse
            Key::Enter => {
                if let Some(cursor) = self.cursor() {
                    self.toggle_open_at(cursor);
                    return EventResult::Consumed;
                }
            }

            // Selection
            Key::Space => {
                if let Some(cursor) = self.cursor() {
                    self.toggle_selection_at(cursor);
                    return EventResult::Consumed;
                }
            }

            // Context menu for the cursor row
            Key::Char('m') => {
                if let Some(id) = self.cursor_id() {
                    self.request_menu(id, None);
                    return EventResult::Consumed;
                }
            }

            _ => {}
        }

        EventResult::Ignored
    }

    fn on_click(&self, x: u16, y: u16) -> EventResult {
        let Some(index) = self.index_from_screen_y(y) else {
            return EventResult::Ignored;
        };
        let Some(row) = self.row(index) else {
            return EventResult::Ignored;
        };

        self.set_cursor(index);

        match self.zone_from_screen_x(x, row.state.level) {
            Some(RowZone::Expander) => {
                // Leaves render a blank expander cell; clicking it does nothing.
                if row.state.has_children {
                    self.toggle_open(row.id);
                }
            }
            Some(RowZone::Checkbox) => self.toggle_selection(row.id),
            Some(RowZone::Icon) | Some(RowZone::Label) | None => {}
        }

        EventResult::Consumed
    }

    fn on_secondary_click(&self, x: u16, y: u16) -> EventResult {
        let Some(index) = self.index_from_screen_y(y) else {
            return EventResult::Ignored;
        };
        let Some(id) = self.row_id(index) else {
            return EventResult::Ignored;
        };

        self.set_cursor(index);
        self.request_menu(id, Some(Position::new(x, y)));
        EventResult::Consumed
    }
}
