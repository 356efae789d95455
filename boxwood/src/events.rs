//! Widget event handling: result types, the dispatch trait, and conversion
//! from crossterm events.
//!
//! Hosts own the event loop. Each frame they read a crossterm event,
//! convert it with [`convert_event`], and offer it to widgets front to
//! back; a [`EventResult::Consumed`] stops propagation.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};

use crate::keys::{Key, KeyCombo, Modifiers};

/// Position in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Column (0-indexed).
    pub x: u16,
    /// Row (0-indexed).
    pub y: u16,
}

impl Position {
    /// Create a new position.
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Click event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Primary action (left click).
    Primary,
    /// Secondary action (right click); opens context menus.
    Secondary,
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Trait for widgets that can handle events.
///
/// All methods default to `Ignored`, so widgets only implement the events
/// they care about.
pub trait WidgetEvents {
    /// Handle a key event while this widget has focus.
    fn on_key(&self, _key: &KeyCombo) -> EventResult {
        EventResult::Ignored
    }

    /// Handle a primary click at the given screen position.
    fn on_click(&self, _x: u16, _y: u16) -> EventResult {
        EventResult::Ignored
    }

    /// Handle a secondary (right) click at the given screen position.
    fn on_secondary_click(&self, _x: u16, _y: u16) -> EventResult {
        EventResult::Ignored
    }
}

/// Input event as delivered to widgets.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Key press.
    Key(KeyCombo),
    /// Mouse click.
    Click {
        /// Click kind.
        kind: ClickKind,
        /// Screen position.
        position: Position,
        /// Modifiers held during the click.
        modifiers: Modifiers,
    },
    /// Terminal resize.
    Resize {
        /// New width in cells.
        width: u16,
        /// New height in cells.
        height: u16,
    },
}

/// Convert crossterm KeyModifiers.
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        shift: mods.contains(KeyModifiers::SHIFT),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

/// Convert a crossterm KeyCode.
fn convert_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Delete => Some(Key::Delete),
        _ => None,
    }
}

/// Convert a crossterm KeyEvent to a [`KeyCombo`].
pub fn convert_key_event(event: KeyEvent) -> Option<KeyCombo> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let key = convert_key(event.code)?;
    Some(KeyCombo::new(key, convert_modifiers(event.modifiers)))
}

/// Convert a crossterm MouseEvent to an [`Event`].
pub fn convert_mouse_event(event: MouseEvent) -> Option<Event> {
    let position = Position::new(event.column, event.row);
    let modifiers = convert_modifiers(event.modifiers);

    match event.kind {
        MouseEventKind::Down(button) => {
            let kind = match button {
                MouseButton::Left => ClickKind::Primary,
                MouseButton::Right => ClickKind::Secondary,
                MouseButton::Middle => return None,
            };
            Some(Event::Click {
                kind,
                position,
                modifiers,
            })
        }
        _ => None,
    }
}

/// Convert a crossterm Event to an [`Event`].
pub fn convert_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key_event) => convert_key_event(key_event).map(Event::Key),
        CrosstermEvent::Mouse(mouse_event) => convert_mouse_event(mouse_event),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}
