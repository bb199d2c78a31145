use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use seton::app::{App, Exit};
use seton::config::Config;
use seton::session::{EditorWidget, Mode, PreviewSurface};
use tempfile::TempDir;

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Creates an App for `<tmp>/lists/todo.md`.
fn app_in_tempdir(content: &str) -> (App, TempDir) {
    app_with_config(content, &Config::default())
}

fn app_with_config(content: &str, config: &Config) -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let lists = dir.path().join("lists");
    std::fs::create_dir(&lists).unwrap();
    let file_path = lists.join("todo.md");
    std::fs::write(&file_path, content).unwrap();
    let app = App::new(file_path, config).unwrap();
    (app, dir)
}

fn on_disk(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("lists").join("todo.md")).unwrap()
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn char_key(ch: char) -> Event {
    key(KeyCode::Char(ch))
}

fn with_mods(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

fn release(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    })
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_event(char_key(ch));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Entering and leaving edit mode
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn edit_and_back_round_trip_keeps_text() {
    let (mut app, _dir) = app_in_tempdir("- milk");
    app.handle_event(char_key('i'));
    assert_eq!(app.mode(), Mode::Editing);
    app.handle_event(key(KeyCode::Esc));
    assert_eq!(app.mode(), Mode::Previewing);
    assert_eq!(app.editor().value(), "- milk");
    assert!(!app.session().is_dirty());
}

#[test]
fn edit_key_with_modifier_is_not_a_mode_switch() {
    let (mut app, _dir) = app_in_tempdir("text");
    app.handle_event(with_mods(KeyCode::Char('i'), KeyModifiers::ALT));
    assert_eq!(app.mode(), Mode::Previewing);
    app.handle_event(with_mods(KeyCode::Char('I'), KeyModifiers::SHIFT));
    assert_eq!(app.mode(), Mode::Previewing);
}

#[test]
fn key_release_is_ignored() {
    let (mut app, _dir) = app_in_tempdir("text");
    app.handle_event(release(KeyCode::Char('i')));
    assert_eq!(app.mode(), Mode::Previewing);
}

#[test]
fn configured_edit_keys_replace_defaults() {
    let config = Config {
        edit_keys: vec!['e'],
        ..Config::default()
    };
    let (mut app, _dir) = app_with_config("text", &config);
    app.handle_event(char_key('i'));
    assert_eq!(app.mode(), Mode::Previewing);
    app.handle_event(char_key('e'));
    assert_eq!(app.mode(), Mode::Editing);
}

#[test]
fn configured_scroll_step_is_used() {
    let config = Config {
        scroll_step: 40,
        ..Config::default()
    };
    let content: String = (1..=30).map(|n| format!("para {}\n\n", n)).collect();
    let (mut app, _dir) = app_with_config(&content, &config);
    app.handle_event(char_key('j'));
    assert_eq!(app.editor().preview().scroll_offset(), 40);
}

// ═══════════════════════════════════════════════════════════════════════
// Saving
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn ctrl_j_saves_like_ctrl_enter() {
    let (mut app, dir) = app_in_tempdir("");
    app.handle_event(char_key('a'));
    type_text(&mut app, "bread");
    app.handle_event(with_mods(KeyCode::Char('j'), KeyModifiers::CONTROL));
    assert_eq!(on_disk(&dir), "bread");
    assert_eq!(app.editor().value(), "bread");
}

#[test]
fn ctrl_shift_enter_does_not_save() {
    let (mut app, dir) = app_in_tempdir("");
    app.handle_event(char_key('i'));
    type_text(&mut app, "bread");
    app.handle_event(with_mods(
        KeyCode::Enter,
        KeyModifiers::CONTROL | KeyModifiers::SHIFT,
    ));
    assert_eq!(on_disk(&dir), "");
    assert!(app.session().is_dirty());
}

#[test]
fn save_from_preview_does_not_leave_preview() {
    let (mut app, dir) = app_in_tempdir("jam");
    app.handle_event(with_mods(KeyCode::Enter, KeyModifiers::CONTROL));
    assert_eq!(app.mode(), Mode::Previewing);
    assert_eq!(on_disk(&dir), "jam");
}

#[test]
fn saved_then_quit_needs_no_confirmation() {
    let (mut app, _dir) = app_in_tempdir("jam");
    app.handle_event(char_key('i'));
    type_text(&mut app, "x");
    app.handle_event(with_mods(KeyCode::Char('s'), KeyModifiers::CONTROL));
    app.handle_event(with_mods(KeyCode::Char('q'), KeyModifiers::CONTROL));
    assert_eq!(app.take_exit(), Some(Exit::Quit));
}

// ═══════════════════════════════════════════════════════════════════════
// Navigation and the unload guard
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn backspace_goes_to_containing_folder() {
    let (mut app, dir) = app_in_tempdir("jam");
    app.handle_event(key(KeyCode::Backspace));
    assert_eq!(app.take_exit(), Some(Exit::Navigate(dir.path().join("lists"))));
}

#[test]
fn typing_then_undoing_is_not_dirty() {
    let (mut app, _dir) = app_in_tempdir("jam");
    app.handle_event(char_key('i'));
    type_text(&mut app, "x");
    app.handle_event(key(KeyCode::Backspace));
    // Cursor was after the x
    assert_eq!(app.editor().value(), "jam");
    app.handle_event(with_mods(KeyCode::Char('q'), KeyModifiers::CONTROL));
    assert_eq!(app.take_exit(), Some(Exit::Quit));
}

#[test]
fn escape_answers_no_to_confirmation() {
    let (mut app, _dir) = app_in_tempdir("jam");
    app.handle_event(char_key('i'));
    type_text(&mut app, "x");
    app.handle_event(with_mods(KeyCode::Char('q'), KeyModifiers::CONTROL));
    assert!(app.pending_exit.is_some());

    app.handle_event(key(KeyCode::Esc));
    assert!(app.pending_exit.is_none());
    // Esc went to the dialog, not the mode switch
    assert_eq!(app.mode(), Mode::Editing);
    assert!(!app.should_quit());
}

// ═══════════════════════════════════════════════════════════════════════
// Focus timing
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn focus_waits_for_configured_delay() {
    let config = Config {
        focus_delay_ms: 50,
        ..Config::default()
    };
    let (mut app, _dir) = app_with_config("jam", &config);
    let now = Instant::now();
    app.handle_event_at(char_key('i'), now);

    app.tick_at(now + Duration::from_millis(20));
    assert!(!app.editor().is_editor_focused());
    app.tick_at(now + Duration::from_millis(50));
    assert!(app.editor().is_editor_focused());
}
