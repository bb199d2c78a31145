//! Named-key bindings for the mode controller.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::Mode;

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the preview for the edit surface.
    Edit,
    /// Leave the edit surface for the preview.
    Preview,
    Save,
    ScrollDown,
    ScrollUp,
    /// Go to the directory containing the note.
    NavigateUp,
}

impl Command {
    /// Whether the key that triggered this command must not also get its
    /// default handling (typing, scrolling, ...).
    pub fn prevents_default(self) -> bool {
        match self {
            Command::Edit | Command::ScrollDown | Command::ScrollUp | Command::NavigateUp => true,
            Command::Preview | Command::Save => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Keymap {
    edit_keys: Vec<char>,
}

impl Keymap {
    pub fn new(edit_keys: Vec<char>) -> Self {
        Self { edit_keys }
    }

    /// Maps a key event to a command for the given mode.
    pub fn resolve(&self, key: &KeyEvent, mode: Mode) -> Option<Command> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Enter if ctrl && !shift => return Some(Command::Save),
            // Without keyboard enhancement, raw-mode terminals deliver
            // Ctrl+Enter as a bare line feed, which arrives as Ctrl+J.
            KeyCode::Char('j') if key.modifiers == KeyModifiers::CONTROL => {
                return Some(Command::Save)
            }
            _ => {}
        }

        if !key.modifiers.is_empty() {
            return None;
        }

        match (mode, key.code) {
            (Mode::Previewing, KeyCode::Char(ch)) if self.edit_keys.contains(&ch) => {
                Some(Command::Edit)
            }
            (Mode::Editing, KeyCode::Esc) => Some(Command::Preview),
            (Mode::Previewing, KeyCode::Char('j')) => Some(Command::ScrollDown),
            (Mode::Previewing, KeyCode::Char('k')) => Some(Command::ScrollUp),
            (Mode::Previewing, KeyCode::Backspace) => Some(Command::NavigateUp),
            _ => None,
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new(vec!['i', 'a'])
    }
}
