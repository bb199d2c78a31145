//! Input handling: overlays first, then the session's mode keys, then
//! page bindings, then ordinary editing or preview scrolling.

use super::*;

impl App {
    /// Pasted text goes to whichever edit element has focus.
    pub(super) fn handle_paste(&mut self, text: &str) {
        if self.show_help || self.pending_exit.is_some() {
            return;
        }
        if self.mode() == Mode::Editing {
            self.session.widget_mut().insert_text(text);
        }
    }

    // ─── Key handling ────────────────────────────────────────────────────

    pub(super) fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        // Help modal: any key dismisses it (swallows the keypress)
        if self.show_help {
            self.show_help = false;
            return;
        }

        // Unsaved-changes confirmation owns the keyboard until answered
        if self.pending_exit.is_some() {
            self.handle_confirm_key(key);
            return;
        }

        match self.session.handle_key(&key, now) {
            Ok(KeyOutcome::Handled { command, .. }) => {
                if command == Command::Save {
                    self.set_status("Saved");
                }
                self.apply_host_requests();
                return;
            }
            Ok(KeyOutcome::Ignored) => {}
            Err(err) => {
                self.report_error(&err);
                return;
            }
        }

        // Page keybindings (work in both modes)
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                self.request_exit(Exit::Quit);
                return;
            }
            // Same as Ctrl+Enter, for terminals that cannot report it
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                self.save();
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => {
                if self.mode() == Mode::Editing {
                    self.session.widget_mut().toggle_title_focus();
                }
                return;
            }
            (_, KeyCode::F(1)) => {
                self.show_help = true;
                return;
            }
            _ => {}
        }

        match self.mode() {
            Mode::Editing => {
                self.session.widget_mut().input(key);
            }
            Mode::Previewing => {
                self.session.widget_mut().preview_mut().handle_key(key);
            }
        }
    }

    /// `y`/Enter leaves despite unsaved changes, `n`/Esc stays.
    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(pending) = self.pending_exit.take() {
                    info!("Leaving without saving: {:?}", pending.exit);
                    self.exit = Some(pending.exit);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.pending_exit = None;
                self.set_status("Stayed on note");
            }
            _ => {}
        }
    }
}
