//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! Architecture: a key reader thread feeds an mpsc channel. The event loop
//! waits on it with a frame-length timeout, so hearts keep moving while
//! nobody types. Each turn advances the particle loop to the current time
//! on a monotonic clock, then redraws.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::clock::{Clock, MonotonicClock};
use crate::config::CardConfig;
use crate::types::Millis;

use super::state::{Action, App, AppEvent, Transition};
use super::update::{apply_effect, update};
use super::view::render;

/// Time between redraws when no key arrives (~30 fps).
const FRAME: Duration = Duration::from_millis(33);

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Focus / photos
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Right),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::ToggleFocus),

        // Answers
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Yes),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Action::No),

        KeyCode::Char('r') => Some(Action::Replay),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let forwarded = match event::read() {
                // Windows reports releases too; only presses count
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    tx.send(AppEvent::Key(key))
                }
                Ok(Event::Resize(..)) => tx.send(AppEvent::Resize),
                Ok(_) => Ok(()),
                Err(_) => break,
            };
            if forwarded.is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the card until the user quits.
///
/// The terminal is restored and the particle loop stopped whether the
/// session ends normally or with an error.
pub fn run(config: &CardConfig) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let clock = MonotonicClock::start();
    let mut app = App::new(config);

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx);
    info!("card opened");

    let outcome = session(&mut terminal, &mut app, &rx, &clock);
    close(&mut app, outcome, restore_terminal)
}

fn session(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mpsc::Receiver<AppEvent>,
    clock: &impl Clock,
) -> io::Result<()> {
    loop {
        app.now = clock.now();
        app.particles.advance(app.now);
        terminal.draw(|frame| render(&*app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        match rx.recv_timeout(frame_timeout(app)) {
            Ok(AppEvent::Key(key)) => {
                if let Some(action) = map_key(key) {
                    handle_action(app, &action, clock.now());
                }
            }
            Ok(AppEvent::Resize) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}

/// Stop the particle loop, then restore the terminal.
///
/// A session error wins over a restore error.
fn close(
    app: &mut App,
    outcome: io::Result<()>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    app.particles.deactivate();
    info!(
        affirmed = app.card.is_affirmed(),
        declines = app.card.decline_count(),
        "card closed"
    );
    let restored = restore();
    if let Err(e) = &outcome {
        warn!(error = %e, "card closed on error");
    }
    outcome.and(restored)
}

/// How long to wait for input before the next redraw.
///
/// One frame, or less when a particle timer comes due sooner.
fn frame_timeout(app: &App) -> Duration {
    match app.particles.next_due() {
        Some(due) => FRAME.min(Duration::from_millis(due.saturating_sub(app.now))),
        None => FRAME,
    }
}

/// Dispatch one action through the pure update and apply the result.
pub fn handle_action(app: &mut App, action: &Action, now: Millis) {
    let transition = update(app.screen.clone(), action, &app.card, app.photos.len());
    debug!(?action, ?transition, "action");

    match transition {
        Transition::Screen(new_screen) => {
            app.screen = new_screen;
        }
        Transition::Quit => {
            app.should_quit = true;
        }
        Transition::Effect(effect) => {
            apply_effect(app, effect, now);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
