//! The mode controller: keyboard-driven switching between the rendered
//! preview and the edit surface of an embedded editor widget, plus
//! preview scrolling, saving, parent navigation and the unsaved-changes
//! guard.
//!
//! The session is generic over the widget and the page hosting it (see
//! [`ports`]) so the same state machine runs against the terminal editor
//! and against test doubles.

pub mod focus;
pub mod keymap;
pub mod ports;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use log::{debug, info};

use crate::components::title::{TitleField, TITLE_FIELD_ID};
use crate::error::{Error, Result};

pub use focus::{FocusScheduler, FocusTarget};
pub use keymap::{Command, Keymap};
pub use ports::{EditorWidget, Host, PreviewSurface};

/// Message shown when leaving with unsaved changes.
pub const UNSAVED_CHANGES_MESSAGE: &str = "You have unsaved changes. Leave anyway?";

/// Which surface of the widget is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Editing,
    Previewing,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Editing => "EDIT",
            Mode::Previewing => "PREVIEW",
        }
    }
}

/// Result of offering a key to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a session key; the host should handle it normally.
    Ignored,
    /// The session acted on the key. When `default_prevented` is false the
    /// key's ordinary effect would have been harmless, but it is still
    /// consumed.
    Handled {
        command: Command,
        default_prevented: bool,
    },
}

/// Confirmation the host should show before leaving the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnloadPrompt {
    pub message: &'static str,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Units scrolled per `j`/`k`.
    pub scroll_step: i32,
    pub focus_delay: Duration,
    pub edit_keys: Vec<char>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            scroll_step: 100,
            focus_delay: Duration::from_millis(10),
            edit_keys: vec!['i', 'a'],
        }
    }
}

/// Per-note controller state. Created once when a note is opened and
/// dropped when the page leaves it.
pub struct EditorSession<W: EditorWidget, H: Host> {
    mode: Mode,
    initial_content: String,
    widget: W,
    host: H,
    keymap: Keymap,
    focus: FocusScheduler,
    scroll_step: i32,
    focus_delay: Duration,
}

impl<W: EditorWidget, H: Host> EditorSession<W, H> {
    /// Brings the widget up in full-screen preview, injects the title field
    /// and takes the content snapshot used by [`before_unload`].
    ///
    /// Fails if the widget cannot show its preview or any element the
    /// session depends on is missing.
    ///
    /// [`before_unload`]: EditorSession::before_unload
    pub fn start(mut widget: W, mut host: H, settings: SessionSettings, now: Instant) -> Result<Self> {
        widget.toggle_full_screen();
        widget.toggle_preview();
        if !widget.is_preview_active() {
            return Err(Error::WidgetUnavailable("toggle_preview"));
        }
        if widget.preview_surface().is_none() {
            return Err(Error::MissingElement("preview surface"));
        }

        let title = host
            .title_input()
            .ok_or(Error::MissingElement("input-title"))?;
        widget.insert_title(TitleField::new(TITLE_FIELD_ID, title))?;

        let initial_content = widget.value();
        host.typeset();

        let mut focus = FocusScheduler::new();
        focus.schedule(FocusTarget::Preview, now + settings.focus_delay);

        info!(
            "Session started at {} ({} bytes)",
            host.location().display(),
            initial_content.len()
        );

        Ok(Self {
            mode: Mode::Previewing,
            initial_content,
            widget,
            host,
            keymap: Keymap::new(settings.edit_keys),
            focus,
            scroll_step: settings.scroll_step,
            focus_delay: settings.focus_delay,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Content as of the last load or successful save.
    pub fn initial_content(&self) -> &str {
        &self.initial_content
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn focus_generation(&self) -> u64 {
        self.focus.generation()
    }

    pub fn pending_focus(&self) -> Option<FocusTarget> {
        self.focus.pending_target()
    }

    /// Offers a key press to the session.
    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> Result<KeyOutcome> {
        let command = match self.keymap.resolve(key, self.mode) {
            Some(command) => command,
            None => return Ok(KeyOutcome::Ignored),
        };
        self.run(command, now)?;
        Ok(KeyOutcome::Handled {
            command,
            default_prevented: command.prevents_default(),
        })
    }

    fn run(&mut self, command: Command, now: Instant) -> Result<()> {
        match command {
            Command::Edit => {
                self.widget.toggle_preview();
                self.mode = Mode::Editing;
                self.schedule_focus(FocusTarget::Editor, now);
            }
            Command::Preview => {
                self.widget.toggle_preview();
                self.mode = Mode::Previewing;
                self.host.typeset();
                self.schedule_focus(FocusTarget::Preview, now);
            }
            Command::Save => self.save()?,
            Command::ScrollDown => self.scroll_preview(self.scroll_step)?,
            Command::ScrollUp => self.scroll_preview(-self.scroll_step)?,
            Command::NavigateUp => {
                let target = parent_location(&self.host.location());
                info!("Navigating to {}", target.display());
                self.host.assign(target);
            }
        }
        debug_assert_eq!(
            self.widget.is_preview_active(),
            self.mode == Mode::Previewing,
            "session mode diverged from widget"
        );
        debug!("{:?} -> {:?}", command, self.mode);
        Ok(())
    }

    fn scroll_preview(&mut self, delta: i32) -> Result<()> {
        let surface = self
            .widget
            .preview_surface()
            .ok_or(Error::MissingElement("preview surface"))?;
        surface.scroll_by(delta);
        Ok(())
    }

    fn schedule_focus(&mut self, target: FocusTarget, now: Instant) {
        let generation = self.focus.schedule(target, now + self.focus_delay);
        debug!("Focus {:?} scheduled (generation {})", target, generation);
    }

    /// Applies a pending focus once it is due. Returns what was focused.
    pub fn tick(&mut self, now: Instant) -> Option<FocusTarget> {
        let target = self.focus.poll(now)?;
        match target {
            FocusTarget::Editor => self.widget.focus(),
            // Looked up now: the surface seen at schedule time may be gone.
            FocusTarget::Preview => self.widget.preview_surface()?.focus(),
        }
        Some(target)
    }

    /// Persists the content through the widget and re-baselines the
    /// unsaved-changes check.
    pub fn save(&mut self) -> Result<()> {
        self.widget.save_note()?;
        self.initial_content = self.widget.value();
        info!("Saved {} bytes", self.initial_content.len());
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.widget.value() != self.initial_content
    }

    /// The confirmation to show before leaving, if there are unsaved changes.
    pub fn before_unload(&self) -> Option<UnloadPrompt> {
        self.is_dirty().then_some(UnloadPrompt {
            message: UNSAVED_CHANGES_MESSAGE,
        })
    }
}

/// The directory a location lives in. For a directory this is its parent.
pub fn parent_location(location: &Path) -> PathBuf {
    match location.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => location.to_path_buf(),
    }
}
