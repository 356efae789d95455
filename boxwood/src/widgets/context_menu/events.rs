//! Event handling for the ContextMenu widget.
//!
//! While the menu is open it sits in front of the tree view: hosts should
//! offer it events first and stop on `Consumed`. A click outside the popup
//! closes the menu and swallows the click.

use crate::events::{EventResult, WidgetEvents};
use crate::keys::{Key, KeyCombo};

use super::state::ContextMenu;

impl<T> WidgetEvents for ContextMenu<T> {
    fn on_key(&self, key: &KeyCombo) -> EventResult {
        if !self.is_open() || key.modifiers.any() {
            return EventResult::Ignored;
        }

        match key.key {
            Key::Up => {
                self.highlight_up();
                EventResult::Consumed
            }
            Key::Down => {
                self.highlight_down();
                EventResult::Consumed
            }
            Key::Enter => {
                self.run_highlighted();
                EventResult::Consumed
            }
            Key::Escape => {
                self.close();
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_click(&self, x: u16, y: u16) -> EventResult {
        if !self.is_open() {
            return EventResult::Ignored;
        }
        let Some(area) = self.area() else {
            return EventResult::Ignored;
        };

        let inside = x >= area.x
            && x < area.x + area.width
            && y >= area.y
            && y < area.y + area.height;
        if !inside {
            self.close();
            return EventResult::Consumed;
        }

        // Skip the top border row; clicks on the frame do nothing.
        if y > area.y && y < area.y + area.height - 1 {
            let index = (y - area.y - 1) as usize;
            if index < self.entries().len() {
                self.run(index);
            }
        }
        EventResult::Consumed
    }

    fn on_secondary_click(&self, x: u16, y: u16) -> EventResult {
        // Right-clicking away also dismisses the menu.
        self.on_click(x, y)
    }
}
