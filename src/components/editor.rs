//! The terminal note editor: a title field and a `tui-textarea` edit
//! surface, plus the rendered preview it flips to.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};
use log::info;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};
use tui_textarea::{Input, TextArea};

use crate::components::preview::PreviewPane;
use crate::components::title::TitleField;
use crate::error::{Error, Result};
use crate::session::EditorWidget;
use crate::theme;

pub fn configure_textarea(textarea: &mut TextArea) {
    textarea.set_line_number_style(theme::line_number_style());
    textarea.set_cursor_line_style(Style::default());
    textarea.set_selection_style(Style::default().bg(theme::FOCUS));
    // Tab = 2 spaces
    textarea.set_tab_length(2);
    textarea.set_hard_tab_indent(false);
}

fn cursor_style(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub struct NoteEditor {
    file_path: PathBuf,
    textarea: TextArea<'static>,
    /// Filled by `insert_title`; rendered above the text.
    title: Option<TitleField>,
    preview: PreviewPane,
    preview_active: bool,
    full_screen: bool,
    editor_focused: bool,
    title_focused: bool,
    /// Line ending of the file as read: `\n` or `\r\n`.
    line_ending: &'static str,
    trailing_newline: bool,
}

impl NoteEditor {
    /// Opens the note at `file_path`, which must exist.
    pub fn open(file_path: PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(&file_path)?;
        Ok(Self::new(file_path, &content))
    }

    pub fn new(file_path: PathBuf, content: &str) -> Self {
        let lines: Vec<String> = if content.is_empty() {
            vec![String::new()]
        } else {
            content.lines().map(String::from).collect()
        };
        let mut textarea = TextArea::new(lines);
        configure_textarea(&mut textarea);

        Self {
            file_path,
            textarea,
            title: None,
            preview: PreviewPane::new(),
            preview_active: false,
            full_screen: false,
            editor_focused: false,
            title_focused: false,
            line_ending: if content.contains("\r\n") { "\r\n" } else { "\n" },
            trailing_newline: content.ends_with('\n'),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn title(&self) -> Option<&TitleField> {
        self.title.as_ref()
    }

    pub fn preview(&self) -> &PreviewPane {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut PreviewPane {
        &mut self.preview
    }

    pub fn is_full_screen(&self) -> bool {
        self.full_screen
    }

    pub fn is_editor_focused(&self) -> bool {
        self.editor_focused
    }

    pub fn is_title_focused(&self) -> bool {
        self.title_focused
    }

    /// Moves keyboard input between the title field and the text.
    pub fn toggle_title_focus(&mut self) {
        if self.title.is_none() || self.preview_active {
            return;
        }
        self.title_focused = !self.title_focused;
        self.editor_focused = !self.title_focused;
    }

    /// Cursor position in the text, zero-based (row, col).
    pub fn cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    pub fn word_count(&self) -> usize {
        self.textarea
            .lines()
            .iter()
            .map(|line| line.split_whitespace().count())
            .sum()
    }

    /// Ordinary editing for a key the page did not claim. Goes to the
    /// title field when it has focus, otherwise to the text.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if self.title_focused && self.title.is_some() {
            if key.code == KeyCode::Enter {
                self.toggle_title_focus();
                return true;
            }
            if let Some(title) = self.title.as_mut() {
                return title.input(key);
            }
        }
        self.textarea.input(Input::from(key))
    }

    /// Inserts pasted text at the focused element.
    pub fn insert_text(&mut self, text: &str) {
        match self.title.as_mut() {
            Some(title) if self.title_focused => title.insert_str(text),
            _ => {
                self.textarea.insert_str(text);
            }
        }
    }

    fn current_stem(&self) -> &str {
        self.file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    /// Where the note will live after saving, if the title field asks
    /// for a rename. Checked before anything is written.
    fn planned_rename(&self) -> Result<Option<PathBuf>> {
        let new_title = match self.title.as_ref() {
            Some(title) => title.value().trim().to_string(),
            None => return Ok(None),
        };
        if new_title == self.current_stem() {
            return Ok(None);
        }
        if new_title.is_empty() {
            return Err(Error::InvalidTitle("title is empty".to_string()));
        }
        if new_title.contains(['/', '\\']) {
            return Err(Error::InvalidTitle(format!("`{}` contains a path separator", new_title)));
        }

        let file_name = match self.file_path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", new_title, ext),
            None => new_title,
        };
        let new_path = self.file_path.with_file_name(&file_name);
        if new_path.exists() {
            return Err(Error::TitleTaken(file_name));
        }
        Ok(Some(new_path))
    }

    /// Draws the edit surface: title line, divider, text.
    pub fn render_edit(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Divider
            Constraint::Min(1),    // Text
        ])
        .split(area);

        if let Some(title) = self.title.as_ref() {
            title.render(frame, chunks[0], self.title_focused);
        }
        let divider = Paragraph::new("\u{2504}".repeat(chunks[1].width as usize))
            .style(Style::default().fg(theme::BORDER));
        frame.render_widget(divider, chunks[1]);

        self.textarea
            .set_cursor_style(cursor_style(self.editor_focused && !self.title_focused));
        frame.render_widget(&self.textarea, chunks[2]);
    }
}

impl EditorWidget for NoteEditor {
    type Surface = PreviewPane;

    fn toggle_full_screen(&mut self) {
        self.full_screen = !self.full_screen;
    }

    fn toggle_preview(&mut self) {
        self.preview_active = !self.preview_active;
        self.editor_focused = false;
        self.title_focused = false;
        if self.preview_active {
            let content = self.value();
            self.preview.load(&content);
        } else {
            self.preview.blur();
        }
    }

    fn is_preview_active(&self) -> bool {
        self.preview_active
    }

    fn save_note(&mut self) -> Result<()> {
        let rename = self.planned_rename()?;
        std::fs::write(&self.file_path, self.value())?;
        if let Some(new_path) = rename {
            std::fs::rename(&self.file_path, &new_path)?;
            info!("Renamed {} to {}", self.file_path.display(), new_path.display());
            self.file_path = new_path;
        }
        Ok(())
    }

    fn value(&self) -> String {
        let mut text = self.textarea.lines().join(self.line_ending);
        if self.trailing_newline {
            text.push_str(self.line_ending);
        }
        text
    }

    fn focus(&mut self) {
        self.editor_focused = true;
        self.title_focused = false;
        self.preview.blur();
    }

    fn preview_surface(&mut self) -> Option<&mut PreviewPane> {
        Some(&mut self.preview)
    }

    fn insert_title(&mut self, field: TitleField) -> Result<()> {
        self.title = Some(field);
        Ok(())
    }
}
