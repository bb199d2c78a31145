use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};

use seton::app::{App, Exit};
use seton::components::index::{IndexAction, NoteIndex};
use seton::config::Config;
use seton::session::parent_location;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Parser)]
#[command(name = "seton", version, about = "Preview-first terminal notes")]
struct Cli {
    /// Note to open, or a folder of notes to browse
    path: PathBuf,

    /// Config file (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (level from SETON_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// What the terminal is showing.
enum Location {
    Note(PathBuf),
    Directory(PathBuf),
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_file) = cli.log_file.as_deref() {
        if let Err(e) = init_logging(log_file) {
            eprintln!("Error: cannot open log file {}: {}", log_file.display(), e);
            std::process::exit(1);
        }
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let location = match resolve_location(&cli.path) {
        Ok(location) => location,
        Err(e) => {
            eprintln!("Error: {}: {}", cli.path.display(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(location, &config) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to a file only; the terminal belongs to the UI.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("SETON_LOG", "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// A folder is browsed; a missing note is created empty.
fn resolve_location(path: &Path) -> io::Result<Location> {
    if path.is_dir() {
        return Ok(Location::Directory(path.canonicalize()?));
    }
    if !path.exists() {
        std::fs::write(path, "")?;
    }
    Ok(Location::Note(path.canonicalize()?))
}

/// Sets up the terminal, runs the UI, and restores the terminal on exit.
fn run(location: Location, config: &Config) -> seton::Result<()> {
    // Setup panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    // Lets Ctrl+Enter arrive as such; otherwise it comes in as Ctrl+J
    if let Err(e) = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    ) {
        warn!("Keyboard enhancement unavailable: {}", e);
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_locations(&mut terminal, location, config);

    restore_terminal()?;
    result
}

/// Moves between notes and folders until the user quits.
///
/// Only the first location can end the program with an error. After that a
/// note or folder that fails to open is reported on the folder index.
fn run_locations(terminal: &mut Term, mut location: Location, config: &Config) -> seton::Result<()> {
    // Last listing shown, kept to fall back on
    let mut index: Option<NoteIndex> = None;
    let mut started = false;

    loop {
        let action = match location {
            Location::Note(path) => {
                info!("Opening note {}", path.display());
                match App::new(path.clone(), config) {
                    Ok(app) => {
                        started = true;
                        match run_note(terminal, app)? {
                            Exit::Quit => return Ok(()),
                            Exit::Navigate(dir) => {
                                location = Location::Directory(dir);
                                continue;
                            }
                        }
                    }
                    Err(e) if !started => return Err(e),
                    Err(e) => {
                        let mut fallback = index.take().unwrap_or_else(|| {
                            let dir = parent_location(&path);
                            NoteIndex::read(&dir).unwrap_or_else(|err| NoteIndex::unreadable(&dir, &err))
                        });
                        fallback.set_error(format!("Cannot open {}: {}", path.display(), e));
                        run_index(terminal, index.insert(fallback))?
                    }
                }
            }
            Location::Directory(dir) => {
                info!("Browsing {}", dir.display());
                let current = match NoteIndex::read(&dir) {
                    Ok(listing) => index.insert(listing),
                    Err(e) if !started => return Err(e),
                    Err(e) => match index.take() {
                        Some(mut previous) => {
                            previous.set_error(format!("Cannot read {}: {}", dir.display(), e));
                            index.insert(previous)
                        }
                        None => index.insert(NoteIndex::unreadable(&dir, &e)),
                    },
                };
                started = true;
                run_index(terminal, current)?
            }
        };

        location = match action {
            IndexAction::Quit => return Ok(()),
            IndexAction::Open(path) => Location::Note(path),
            IndexAction::Navigate(dir) => Location::Directory(dir),
        };
    }
}

fn run_note(terminal: &mut Term, mut app: App) -> seton::Result<Exit> {
    loop {
        app.render_frame(terminal)?;

        // Block up to 100ms waiting for the first event (prevents busy-loop,
        // gives tick() a chance to run ~10x/sec for timer expiry).
        if event::poll(Duration::from_millis(100))? {
            // Drain all queued events without blocking, then render immediately.
            loop {
                let ev = event::read()?;
                app.handle_event(ev);
                if app.should_quit() {
                    break;
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if let Some(exit) = app.take_exit() {
            return Ok(exit);
        }
    }
}

fn run_index(terminal: &mut Term, index: &mut NoteIndex) -> seton::Result<IndexAction> {
    loop {
        terminal.draw(|frame| index.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            if let event::Event::Key(key) = event::read()? {
                if let Some(action) = index.handle_key(key) {
                    return Ok(action);
                }
            }
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;
    Ok(())
}
