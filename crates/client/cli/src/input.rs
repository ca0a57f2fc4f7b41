//! Input processing for the terminal client.
//!
//! Mouse events become pointer events for the deck, keys become app
//! commands. The rest of the client never inspects `crossterm` events.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// High-level outcome of processing a terminal event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Left button pressed at a terminal cell.
    PointerDown { column: u16, row: u16 },
    /// Left button dragged to a new column.
    PointerMove { column: u16 },
    PointerUp,
    /// The terminal lost focus mid-gesture.
    PointerCancel,
    Flip,
    Restart,
    Quit,
    Redraw,
    None,
}

#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: Event) -> InputAction {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::FocusLost => InputAction::PointerCancel,
            Event::Resize(_, _) => InputAction::Redraw,
            _ => InputAction::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> InputAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => InputAction::Quit,
            KeyCode::Char('f') | KeyCode::Char(' ') => InputAction::Flip,
            KeyCode::Char('r') => InputAction::Restart,
            _ => InputAction::None,
        }
    }

    fn handle_mouse(&self, mouse: MouseEvent) -> InputAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => InputAction::PointerDown {
                column: mouse.column,
                row: mouse.row,
            },
            MouseEventKind::Drag(MouseButton::Left) => InputAction::PointerMove {
                column: mouse.column,
            },
            MouseEventKind::Up(MouseButton::Left) => InputAction::PointerUp,
            _ => InputAction::None,
        }
    }
}
