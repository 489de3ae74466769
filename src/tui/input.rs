use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::widget::Mode;

/// Maps raw key presses to widget actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Process a key event
    pub fn handle_key(&self, key: KeyEvent) -> InputAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => InputAction::Quit,
            KeyCode::Char('o') if ctrl => InputAction::LoadPath,
            KeyCode::BackTab => InputAction::PrevMode,
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => InputAction::PrevMode,
            KeyCode::Tab => InputAction::NextMode,
            KeyCode::F(n @ 1..=4) => InputAction::SelectMode(Mode::ALL[usize::from(n - 1)]),
            KeyCode::Enter => InputAction::Submit,
            KeyCode::Esc => InputAction::Dismiss,
            KeyCode::PageUp => InputAction::ScrollUp,
            KeyCode::PageDown => InputAction::ScrollDown,
            KeyCode::Backspace => InputAction::Delete,
            KeyCode::Char(c) if !ctrl => InputAction::Insert(c),
            _ => InputAction::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Quit,
    NextMode,
    PrevMode,
    SelectMode(Mode),
    Submit,
    LoadPath,
    Dismiss,
    ScrollUp,
    ScrollDown,
    Insert(char),
    Delete,
    None,
}
