//! The note title input shown above the edit surface.
//!
//! Behaves like a plain single-line text input. Path separators are
//! refused because the title doubles as the note's file name.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme;

/// Identifier of the title input inside the editor.
pub const TITLE_FIELD_ID: &str = "editor-title";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleField {
    id: &'static str,
    value: String,
    /// Byte offset, always on a char boundary.
    cursor: usize,
}

impl TitleField {
    pub fn new(id: &'static str, value: impl Into<String>) -> Self {
        let value: String = value.into();
        let cursor = value.len();
        Self { id, value, cursor }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.insert_char(ch);
        }
    }

    fn insert_char(&mut self, ch: char) {
        if ch == '/' || ch == '\\' || ch.is_control() {
            return;
        }
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |ch| self.cursor + ch.len_utf8())
    }

    /// Applies an editing key. Returns false for keys a text input ignores.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Char(ch) => self.insert_char(ch),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let start = self.prev_boundary();
                    self.value.replace_range(start..self.cursor, "");
                    self.cursor = start;
                }
            }
            KeyCode::Delete => {
                let end = self.next_boundary();
                self.value.replace_range(self.cursor..end, "");
            }
            KeyCode::Left => self.cursor = self.prev_boundary(),
            KeyCode::Right => self.cursor = self.next_boundary(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            _ => return false,
        }
        true
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let label = Span::styled("  Title: ", Style::default().fg(theme::BORDER));
        let mut spans = vec![label];

        if focused {
            let before = &self.value[..self.cursor];
            let at_end = self.cursor >= self.value.len();
            let cursor_text = if at_end {
                " ".to_string()
            } else {
                self.value[self.cursor..self.next_boundary()].to_string()
            };
            let after = if at_end { "" } else { &self.value[self.next_boundary()..] };
            spans.push(Span::styled(before.to_string(), theme::title_style()));
            spans.push(Span::styled(
                cursor_text,
                Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            ));
            spans.push(Span::styled(after.to_string(), theme::title_style()));
        } else {
            spans.push(Span::styled(self.value.clone(), theme::title_style()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
