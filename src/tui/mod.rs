// TUI module - Terminal User Interface
//
// This module manages the showcase using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, redraw ticks)
// - Rendering the UI
// - Receiving scramble lifecycle events and folding them into stats

pub mod app;
pub mod components;
pub mod entrance;
pub mod hover;
pub mod layout;
pub mod theme;
pub mod ui;

use crate::config::Config;
use crate::events::ScrambleEvent;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Capacity of the label event channel
const EVENT_CHANNEL_SIZE: usize = 1024;

/// Redraw period; twice the default tick rate so no frame is skipped
const REDRAW_INTERVAL: Duration = Duration::from_millis(25);

/// Run the showcase TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (event_tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
    let mut app = App::new(&config, log_buffer, event_tx);
    app.mount(Instant::now());

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    tracing::info!(
        sessions = app.stats.sessions_started,
        frames = app.stats.frames_rendered,
        in_flight = app.stats.in_flight(),
        "showcase closing"
    );
    // Every label timer is cancelled before the runtime goes away
    app.unmount_all();

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard and mouse input
/// 2. Redraw ticks (labels publish frames on their own timers)
/// 3. Label lifecycle events (for the status bar)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<ScrambleEvent>,
) -> Result<()> {
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = redraw.tick() => {
                app.tick();
            }

            Some(event) = event_rx.recv() => {
                app.record_event(&event);
                drain_events(app, event_rx);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Fold every label event already queued into the app
///
/// Hover bursts queue many events at once; taking one per loop pass would
/// leave the status bar behind and let the channel fill up.
fn drain_events(app: &mut App, event_rx: &mut mpsc::Receiver<ScrambleEvent>) {
    while let Ok(event) = event_rx.try_recv() {
        app.record_event(&event);
    }
}

/// Handle keyboard input
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }
    let now = Instant::now();

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
            app.next_slide(now)
        }
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
            app.prev_slide(now)
        }
        KeyCode::Home => app.activate(0, now),
        KeyCode::End => app.activate(app.slides.len().saturating_sub(1), now),
        KeyCode::Char('r') => app.replay(),
        KeyCode::Char('L') => app.toggle_logs(),
        KeyCode::Enter => app.open_website(),
        _ => {}
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let now = Instant::now();
    match mouse_event.kind {
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => app.wheel(true, now),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => app.wheel(false, now),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.pointer_moved(mouse_event.column, mouse_event.row)
        }
        MouseEventKind::Down(MouseButton::Left) => app.click(mouse_event.column, mouse_event.row),
        _ => {}
    }
}
