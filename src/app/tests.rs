//! Unit tests for the App module: mode routing, saving, leaving the page,
//! the unsaved-changes confirmation, title edits and focus timing.

use super::*;
use crate::session::{EditorWidget, FocusTarget, PreviewSurface};
use tempfile::TempDir;

// ─── Helpers ─────────────────────────────────────────────────────

/// Creates an App for `<dir>/notes/groceries.md` holding `content`.
fn app_with_content(content: &str) -> (App, TempDir, Instant) {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes");
    std::fs::create_dir(&notes).unwrap();
    let path = notes.join("groceries.md");
    std::fs::write(&path, content).unwrap();
    let now = Instant::now();
    let app = App::start(path, &Config::default(), now).unwrap();
    (app, dir, now)
}

fn note_path(dir: &TempDir) -> PathBuf {
    dir.path().join("notes").join("groceries.md")
}

fn key_event(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn char_event(ch: char) -> Event {
    key_event(KeyCode::Char(ch))
}

fn ctrl_key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::CONTROL))
}

fn type_str(app: &mut App, text: &str, now: Instant) {
    for ch in text.chars() {
        app.handle_event_at(char_event(ch), now);
    }
}

// ─── Startup ─────────────────────────────────────────────────────

#[test]
fn starts_in_full_screen_preview() {
    let (app, _dir, _) = app_with_content("# Groceries\n\n- eggs");
    assert_eq!(app.mode(), Mode::Previewing);
    assert!(app.editor().is_full_screen());
    assert!(app.editor().is_preview_active());
    assert_eq!(app.editor().title().unwrap().value(), "groceries");
    assert!(app.editor().preview().document().is_typeset());
    assert_eq!(app.session().host().typeset_count(), 1);
}

#[test]
fn start_fails_for_missing_note() {
    let dir = TempDir::new().unwrap();
    let result = App::start(dir.path().join("absent.md"), &Config::default(), Instant::now());
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn preview_gets_focus_after_delay() {
    let (mut app, _dir, now) = app_with_content("text");
    assert!(!app.editor().preview().is_focused());
    app.tick_at(now + Duration::from_millis(10));
    assert!(app.editor().preview().is_focused());
}

// ─── Mode switching ──────────────────────────────────────────────

#[test]
fn i_enters_editing_and_typing_edits() {
    let (mut app, _dir, now) = app_with_content("");
    app.handle_event_at(char_event('i'), now);
    assert_eq!(app.mode(), Mode::Editing);
    // The `i` itself is not typed
    assert_eq!(app.editor().value(), "");

    app.tick_at(now + Duration::from_millis(10));
    assert!(app.editor().is_editor_focused());

    type_str(&mut app, "milk", now);
    assert_eq!(app.editor().value(), "milk");
}

#[test]
fn escape_returns_to_typeset_preview_of_new_text() {
    let (mut app, _dir, now) = app_with_content("a");
    app.handle_event_at(char_event('a'), now);
    app.handle_event_at(key_event(KeyCode::End), now);
    type_str(&mut app, " $x^2$", now);

    app.handle_event_at(key_event(KeyCode::Esc), now);
    assert_eq!(app.mode(), Mode::Previewing);
    assert_eq!(app.session().host().typeset_count(), 2);
    let preview = app.editor().preview();
    assert!(preview.document().is_typeset());
    assert_eq!(preview.document().plain_lines(), vec!["a x\u{b2}"]);
}

#[test]
fn escape_in_preview_does_nothing() {
    let (mut app, _dir, now) = app_with_content("a");
    app.handle_event_at(key_event(KeyCode::Esc), now);
    assert_eq!(app.mode(), Mode::Previewing);
    assert!(!app.should_quit());
}

// ─── Preview scrolling ───────────────────────────────────────────

#[test]
fn j_and_k_scroll_preview() {
    let content = (1..=40).map(|n| format!("line {}\n\n", n)).collect::<String>();
    let (mut app, _dir, now) = app_with_content(&content);
    app.handle_event_at(char_event('j'), now);
    app.handle_event_at(char_event('j'), now);
    assert_eq!(app.editor().preview().scroll_offset(), 200);
    app.handle_event_at(char_event('k'), now);
    assert_eq!(app.editor().preview().scroll_offset(), 100);
}

#[test]
fn arrow_keys_scroll_focused_preview_by_rows() {
    let content = (1..=40).map(|n| format!("line {}\n\n", n)).collect::<String>();
    let (mut app, _dir, now) = app_with_content(&content);
    app.handle_event_at(key_event(KeyCode::Down), now);
    assert_eq!(app.editor().preview().top_row(), 1);
    app.handle_event_at(key_event(KeyCode::Up), now);
    assert_eq!(app.editor().preview().top_row(), 0);
}

// ─── Saving ──────────────────────────────────────────────────────

#[test]
fn ctrl_enter_saves_and_stays_in_mode() {
    let (mut app, dir, now) = app_with_content("eggs");
    app.handle_event_at(char_event('i'), now);
    type_str(&mut app, "milk ", now);
    assert!(app.session().is_dirty());

    app.handle_event_at(ctrl_key(KeyCode::Enter), now);
    assert_eq!(app.mode(), Mode::Editing);
    assert_eq!(std::fs::read_to_string(note_path(&dir)).unwrap(), "milk eggs");
    assert!(!app.session().is_dirty());
    assert_eq!(app.status_message, "Saved");
}

#[test]
fn ctrl_s_saves_in_preview() {
    let (mut app, dir, now) = app_with_content("eggs");
    app.handle_event_at(ctrl_key(KeyCode::Char('s')), now);
    assert_eq!(app.mode(), Mode::Previewing);
    assert_eq!(std::fs::read_to_string(note_path(&dir)).unwrap(), "eggs");
    assert_eq!(app.status_message, "Saved");
}

#[test]
fn title_edit_renames_on_save() {
    let (mut app, dir, now) = app_with_content("eggs");
    app.handle_event_at(char_event('i'), now);
    app.handle_event_at(ctrl_key(KeyCode::Char('t')), now);
    assert!(app.editor().is_title_focused());
    type_str(&mut app, "-list", now);
    assert_eq!(app.display_name(), "groceries-list");

    app.handle_event_at(ctrl_key(KeyCode::Enter), now);
    let renamed = dir.path().join("notes").join("groceries-list.md");
    assert_eq!(app.editor().file_path(), renamed);
    assert_eq!(std::fs::read_to_string(renamed).unwrap(), "eggs");
    assert!(!note_path(&dir).exists());
}

#[test]
fn rename_onto_existing_note_reports_error() {
    let (mut app, dir, now) = app_with_content("eggs");
    std::fs::write(dir.path().join("notes").join("groceries2.md"), "").unwrap();
    app.handle_event_at(char_event('i'), now);
    app.handle_event_at(ctrl_key(KeyCode::Char('t')), now);
    type_str(&mut app, "2", now);

    app.handle_event_at(ctrl_key(KeyCode::Enter), now);
    assert!(app.status_is_error);
    assert!(app.status_message.contains("groceries2.md"));
    assert_eq!(app.editor().file_path(), note_path(&dir));
}

#[test]
fn rejected_title_saves_nothing_and_stays_dirty() {
    let (mut app, dir, now) = app_with_content("eggs");
    std::fs::write(dir.path().join("notes").join("groceries2.md"), "").unwrap();
    app.handle_event_at(char_event('i'), now);
    type_str(&mut app, "more ", now);
    app.handle_event_at(ctrl_key(KeyCode::Char('t')), now);
    type_str(&mut app, "2", now);

    app.handle_event_at(ctrl_key(KeyCode::Enter), now);
    assert!(app.status_is_error);
    assert_eq!(std::fs::read_to_string(note_path(&dir)).unwrap(), "eggs");
    assert!(app.session().is_dirty());
    assert!(app.session().before_unload().is_some());

    // Dropping the clash lets the same save go through
    app.handle_event_at(key_event(KeyCode::Backspace), now);
    app.handle_event_at(ctrl_key(KeyCode::Enter), now);
    assert!(!app.status_is_error);
    assert_eq!(std::fs::read_to_string(note_path(&dir)).unwrap(), "more eggs");
    assert!(!app.session().is_dirty());
}

#[test]
fn ctrl_t_in_preview_is_ignored() {
    let (mut app, _dir, now) = app_with_content("eggs");
    app.handle_event_at(ctrl_key(KeyCode::Char('t')), now);
    assert!(!app.editor().is_title_focused());
}

// ─── Leaving the page ────────────────────────────────────────────

#[test]
fn ctrl_q_quits_when_clean() {
    let (mut app, _dir, now) = app_with_content("eggs");
    app.handle_event_at(ctrl_key(KeyCode::Char('q')), now);
    assert!(app.should_quit());
    assert_eq!(app.take_exit(), Some(Exit::Quit));
}

#[test]
fn ctrl_q_with_unsaved_changes_asks_first() {
    let (mut app, _dir, now) = app_with_content("eggs");
    app.handle_event_at(char_event('i'), now);
    type_str(&mut app, "x", now);
    app.handle_event_at(ctrl_key(KeyCode::Char('q')), now);

    assert!(!app.should_quit());
    let pending = app.pending_exit.as_ref().unwrap();
    assert_eq!(pending.prompt.message, crate::session::UNSAVED_CHANGES_MESSAGE);

    // Keys go to the confirmation, not the editor
    type_str(&mut app, "z", now);
    assert_eq!(app.editor().value(), "xeggs");

    app.handle_event_at(char_event('y'), now);
    assert_eq!(app.take_exit(), Some(Exit::Quit));
}

#[test]
fn declining_confirmation_stays_on_note() {
    let (mut app, _dir, now) = app_with_content("eggs");
    app.handle_event_at(char_event('i'), now);
    type_str(&mut app, "x", now);
    app.handle_event_at(ctrl_key(KeyCode::Char('q')), now);
    app.handle_event_at(char_event('n'), now);

    assert!(app.pending_exit.is_none());
    assert!(!app.should_quit());
    assert_eq!(app.mode(), Mode::Editing);
    assert_eq!(app.status_message, "Stayed on note");
}

#[test]
fn backspace_in_preview_navigates_to_folder() {
    let (mut app, dir, now) = app_with_content("eggs");
    app.handle_event_at(key_event(KeyCode::Backspace), now);
    assert_eq!(app.take_exit(), Some(Exit::Navigate(dir.path().join("notes"))));
}

#[test]
fn backspace_in_editing_deletes_text() {
    let (mut app, _dir, now) = app_with_content("eggs");
    app.handle_event_at(char_event('i'), now);
    app.handle_event_at(key_event(KeyCode::End), now);
    app.handle_event_at(key_event(KeyCode::Backspace), now);
    assert_eq!(app.editor().value(), "egg");
    assert!(!app.should_quit());
}

#[test]
fn navigating_after_edit_and_escape_asks_first() {
    let (mut app, dir, now) = app_with_content("eggs");
    app.handle_event_at(char_event('i'), now);
    type_str(&mut app, "x", now);
    app.handle_event_at(key_event(KeyCode::Esc), now);
    app.handle_event_at(key_event(KeyCode::Backspace), now);

    assert!(!app.should_quit());
    assert_eq!(
        app.pending_exit.as_ref().map(|p| p.exit.clone()),
        Some(Exit::Navigate(dir.path().join("notes")))
    );
    app.handle_event_at(key_event(KeyCode::Enter), now);
    assert_eq!(app.take_exit(), Some(Exit::Navigate(dir.path().join("notes"))));
}

// ─── Help, paste, status ─────────────────────────────────────────

#[test]
fn help_swallows_next_key() {
    let (mut app, _dir, now) = app_with_content("eggs");
    app.handle_event_at(key_event(KeyCode::F(1)), now);
    assert!(app.show_help);
    app.handle_event_at(char_event('i'), now);
    assert!(!app.show_help);
    assert_eq!(app.mode(), Mode::Previewing);
}

#[test]
fn paste_inserts_only_while_editing() {
    let (mut app, _dir, now) = app_with_content("");
    app.handle_event_at(Event::Paste("ignored".to_string()), now);
    assert_eq!(app.editor().value(), "");

    app.handle_event_at(char_event('i'), now);
    app.handle_event_at(Event::Paste("two\nlines".to_string()), now);
    assert_eq!(app.editor().value(), "two\nlines");
}

#[test]
fn status_clears_after_timeout() {
    let (mut app, _dir, now) = app_with_content("eggs");
    app.status_time = Some(now);
    app.tick_at(now + STATUS_DURATION);
    assert!(app.status_message.is_empty());
    assert!(app.status_time.is_none());
}

#[test]
fn quick_mode_flips_focus_only_last_target() {
    let (mut app, _dir, now) = app_with_content("eggs");
    app.handle_event_at(char_event('i'), now);
    app.handle_event_at(key_event(KeyCode::Esc), now);
    assert_eq!(app.session().pending_focus(), Some(FocusTarget::Preview));

    app.tick_at(now + Duration::from_millis(10));
    assert!(app.editor().preview().is_focused());
    assert!(!app.editor().is_editor_focused());
}
