//! The terminal page around one note: owns the editor session, routes
//! terminal events to it, and decides when the page may be left.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error, info};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::components::editor::NoteEditor;
use crate::components::{header, status};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::{Command, EditorSession, KeyOutcome, Mode, UnloadPrompt};
use crate::theme;

mod host;
mod input;
mod render;

pub use host::TerminalHost;

/// How long status bar messages stay visible before auto-clearing.
const STATUS_DURATION: Duration = Duration::from_secs(3);

/// Maximum width for the UI content area outside full screen.
const MAX_WIDTH: u16 = 120;

/// How the page was left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    Quit,
    Navigate(PathBuf),
}

/// A leave request waiting on the unsaved-changes confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExit {
    pub exit: Exit,
    pub prompt: UnloadPrompt,
}

pub type NoteSession = EditorSession<NoteEditor, TerminalHost>;

pub struct App {
    session: NoteSession,

    // --- Status bar ---
    pub status_message: String,
    pub status_is_error: bool,
    pub status_time: Option<Instant>,

    // --- Help modal (F1) ---
    pub show_help: bool,

    // --- Leaving the page ---
    pub pending_exit: Option<PendingExit>,
    pub exit: Option<Exit>,
}

impl App {
    /// Opens the note at `file_path` and starts its session.
    pub fn new(file_path: PathBuf, config: &Config) -> Result<Self> {
        Self::start(file_path, config, Instant::now())
    }

    pub fn start(file_path: PathBuf, config: &Config, now: Instant) -> Result<Self> {
        let editor = NoteEditor::open(file_path.clone())?;
        let host = TerminalHost::for_note(&file_path);
        let session = EditorSession::start(editor, host, config.session_settings(), now)?;

        let mut app = Self {
            session,
            status_message: "i: edit | Esc: preview | Ctrl+Enter: save | F1: help".to_string(),
            status_is_error: false,
            status_time: Some(now),
            show_help: false,
            pending_exit: None,
            exit: None,
        };
        app.apply_host_requests();
        Ok(app)
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn session(&self) -> &NoteSession {
        &self.session
    }

    pub fn editor(&self) -> &NoteEditor {
        self.session.widget()
    }

    pub fn should_quit(&self) -> bool {
        self.exit.is_some()
    }

    pub fn take_exit(&mut self) -> Option<Exit> {
        self.exit.take()
    }

    // ─── Tick / timers ───────────────────────────────────────────────────

    /// Called every 100ms from the main loop.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some(target) = self.session.tick(now) {
            debug!("Focused {:?}", target);
        }

        // Auto-clear status messages after STATUS_DURATION
        if let Some(time) = self.status_time {
            if now.saturating_duration_since(time) >= STATUS_DURATION {
                self.status_message.clear();
                self.status_is_error = false;
                self.status_time = None;
            }
        }
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: Event) {
        self.handle_event_at(event, Instant::now());
    }

    pub fn handle_event_at(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            // Bracketed paste: terminal sends the whole clipboard as one event
            Event::Paste(text) => self.handle_paste(&text),
            _ => {}
        }
    }

    /// Carries out what the session asked of the host during the last call.
    fn apply_host_requests(&mut self) {
        if self.session.host_mut().take_typeset() {
            self.session.widget_mut().preview_mut().typeset();
        }
        if let Some(target) = self.session.host_mut().take_navigation() {
            self.request_exit(Exit::Navigate(target));
        }
    }

    /// Leaves the page, unless there are unsaved changes, in which case
    /// the confirmation is shown first.
    fn request_exit(&mut self, exit: Exit) {
        match self.session.before_unload() {
            Some(prompt) => {
                info!("Leave requested with unsaved changes: {:?}", exit);
                self.pending_exit = Some(PendingExit { exit, prompt });
            }
            None => {
                info!("Leaving: {:?}", exit);
                self.exit = Some(exit);
            }
        }
    }

    fn save(&mut self) {
        match self.session.save() {
            Ok(()) => self.set_status("Saved"),
            Err(err) => self.report_error(&err),
        }
    }

    /// Shows a temporary message in the status bar.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = msg.to_string();
        self.status_is_error = false;
        self.status_time = Some(Instant::now());
    }

    fn report_error(&mut self, err: &Error) {
        error!("{}", err);
        self.status_message = format!("Error: {}", err);
        self.status_is_error = true;
        self.status_time = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests;
