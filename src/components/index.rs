//! Directory listing shown after navigating up from a note.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use log::{info, warn};

use crate::error::{Error, Result};
use crate::session::parent_location;
use crate::theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl IndexEntry {
    fn label(&self) -> String {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("?");
        if self.is_dir {
            format!("{}/", name)
        } else {
            name.trim_end_matches(".md").to_string()
        }
    }
}

/// Where the index wants to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexAction {
    Open(PathBuf),
    Navigate(PathBuf),
    Quit,
}

pub struct NoteIndex {
    dir: PathBuf,
    entries: Vec<IndexEntry>,
    state: ListState,
    /// Note waiting on a `y` to be deleted.
    pending_delete: Option<PathBuf>,
    status: Option<String>,
    status_is_error: bool,
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn list_dir(dir: &Path) -> Result<Vec<IndexEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        let is_dir = entry.file_type()?.is_dir();
        if hidden || !(is_dir || is_note(&path)) {
            continue;
        }
        entries.push(IndexEntry { path, is_dir });
    }
    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.path.cmp(&b.path)));
    Ok(entries)
}

fn is_note(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

impl NoteIndex {
    /// Lists visible subdirectories first, then notes, each sorted by name.
    pub fn read(dir: &Path) -> Result<Self> {
        let entries = list_dir(dir)?;
        let mut state = ListState::default();
        if !entries.is_empty() {
            state.select(Some(0));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
            state,
            pending_delete: None,
            status: None,
            status_is_error: false,
        })
    }

    /// A listing with nothing in it, for a folder that could not be read.
    /// Backspace still leads to its parent.
    pub fn unreadable(dir: &Path, err: &Error) -> Self {
        let mut index = Self {
            dir: dir.to_path_buf(),
            entries: Vec::new(),
            state: ListState::default(),
            pending_delete: None,
            status: None,
            status_is_error: false,
        };
        index.set_error(format!("Cannot read {}: {}", dir.display(), err));
        index
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn status_is_error(&self) -> bool {
        self.status_is_error
    }

    /// Shows `message` in the footer until the next key press.
    pub fn set_error(&mut self, message: String) {
        warn!("{}", message);
        self.status = Some(message);
        self.status_is_error = true;
    }

    fn set_status(&mut self, message: String) {
        self.status = Some(message);
        self.status_is_error = false;
    }

    /// Re-reads the folder, keeping the selection position where possible.
    fn reload(&mut self) -> Result<()> {
        self.entries = list_dir(&self.dir)?;
        let selected = match self.entries.len() {
            0 => None,
            len => Some(self.state.selected().unwrap_or(0).min(len - 1)),
        };
        self.state.select(selected);
        Ok(())
    }

    /// Creates an empty `untitled.md` (or `untitled-N.md`) in the folder.
    pub fn create_note(&self) -> Result<PathBuf> {
        for n in 1u32..=9999 {
            let name = if n == 1 {
                "untitled.md".to_string()
            } else {
                format!("untitled-{}.md", n)
            };
            let path = self.dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => {
                    info!("Created {}", path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(Error::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "no free untitled name",
        )))
    }

    /// The note whose deletion is waiting for confirmation.
    pub fn pending_delete(&self) -> Option<&Path> {
        self.pending_delete.as_deref()
    }

    fn delete_pending(&mut self) {
        let Some(path) = self.pending_delete.take() else {
            return;
        };
        let name = entry_name(&path);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted {}", path.display());
                match self.reload() {
                    Ok(()) => self.set_status(format!("Deleted {}", name)),
                    Err(e) => self.set_error(format!("Cannot read {}: {}", self.dir.display(), e)),
                }
            }
            Err(e) => self.set_error(format!("Cannot delete {}: {}", name, e)),
        }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&IndexEntry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    fn move_by(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let current = self.state.selected().unwrap_or(0) as isize;
        let last = self.entries.len() as isize - 1;
        self.state.select(Some((current + delta).clamp(0, last) as usize));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<IndexAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        // Delete confirmation owns the keyboard until answered
        if self.pending_delete.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.delete_pending(),
                _ => {
                    self.pending_delete = None;
                    self.status = None;
                }
            }
            return None;
        }
        self.status = None;

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q')) | (KeyModifiers::NONE, KeyCode::Char('q')) => {
                Some(IndexAction::Quit)
            }
            (KeyModifiers::NONE, KeyCode::Char('j')) | (_, KeyCode::Down) => {
                self.move_by(1);
                None
            }
            (KeyModifiers::NONE, KeyCode::Char('k')) | (_, KeyCode::Up) => {
                self.move_by(-1);
                None
            }
            (KeyModifiers::NONE, KeyCode::Backspace) => {
                Some(IndexAction::Navigate(parent_location(&self.dir)))
            }
            (KeyModifiers::NONE, KeyCode::Enter) => self.selected().map(|entry| {
                if entry.is_dir {
                    IndexAction::Navigate(entry.path.clone())
                } else {
                    IndexAction::Open(entry.path.clone())
                }
            }),
            (KeyModifiers::NONE, KeyCode::Char('n')) => match self.create_note() {
                Ok(path) => Some(IndexAction::Open(path)),
                Err(e) => {
                    self.set_error(format!("Cannot create note: {}", e));
                    None
                }
            },
            (KeyModifiers::NONE, KeyCode::Char('d')) => {
                match self.selected() {
                    Some(entry) if !entry.is_dir => {
                        let path = entry.path.clone();
                        self.set_status(format!("Delete {}? (y/n)", entry_name(&path)));
                        self.pending_delete = Some(path);
                    }
                    Some(_) => self.set_error("Folders are not deleted from here".to_string()),
                    None => {}
                }
                None
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        let heading = Line::from(Span::styled(
            format!("  {}", self.dir.display()),
            theme::heading_style(),
        ));
        frame.render_widget(Paragraph::new(heading), chunks[0]);
        frame.render_widget(
            Paragraph::new("\u{2500}".repeat(chunks[1].width as usize))
                .style(Style::default().fg(theme::BORDER)),
            chunks[1],
        );

        if self.entries.is_empty() {
            frame.render_widget(
                Paragraph::new("  No notes here").style(Style::default().fg(theme::TILDE)),
                chunks[2],
            );
        } else {
            let items: Vec<ListItem> = self
                .entries
                .iter()
                .map(|entry| {
                    let style = if entry.is_dir {
                        Style::default().fg(theme::LINK)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Line::styled(format!("  {}", entry.label()), style))
                })
                .collect();
            let list = List::new(items)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            frame.render_stateful_widget(list, chunks[2], &mut self.state);
        }

        let footer = match self.status.as_deref() {
            Some(message) => {
                let style = if self.status_is_error {
                    Style::default().fg(theme::ERROR)
                } else {
                    theme::status_style()
                };
                Paragraph::new(format!("  {}", message)).style(style)
            }
            None => Paragraph::new("  Enter: open  n: new  d: delete  Backspace: up  q: quit")
                .style(theme::status_style()),
        };
        frame.render_widget(footer, chunks[3]);
    }
}
