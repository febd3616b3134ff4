// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks)
// - Receiving background events and updating the display
//
// All state mutation happens on this loop; background tasks only send
// events. Network calls triggered from key handlers are spawned, never
// awaited here, so the render loop never stalls on I/O.

pub mod app;
pub mod clipboard;
pub mod components;
pub mod theme;
pub mod views;

use crate::events::AppEvent;
use anyhow::{Context, Result};
use app::{App, View};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal when
/// done. Blocks until the user quits or logs out.
pub async fn run_tui(mut event_rx: mpsc::Receiver<AppEvent>, mut app: App) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Three event sources feed the loop via tokio::select!:
/// 1. Keyboard input (navigation and commands)
/// 2. Timer ticks (toast expiry, delayed navigation, redraws)
/// 3. Background events (stats polls, plan workflow outcomes)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Periodic tick
            _ = tick_interval.tick() => {
                app.tick();
            }

            // Background events
            Some(event) = event_rx.recv() => {
                app.handle_event(event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: modal → checkout step → global keys → view keys
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }
    let key = key_event.code;

    // Layer 1: the API key modal absorbs all input while open
    if app.show_api_key {
        match key {
            KeyCode::Esc | KeyCode::Char('a') => app.show_api_key = false,
            KeyCode::Char('y') => app.copy_api_key(),
            _ => {}
        }
        return;
    }

    // Layer 2: the checkout confirmation step
    if app.view == View::Plans && app.checkout.is_some() {
        match key {
            KeyCode::Enter => app.confirm_checkout(),
            KeyCode::Esc => app.cancel_checkout(),
            _ => {}
        }
        return;
    }

    // Layer 3: global keys
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('d') | KeyCode::Char('1') => {
            app.set_view(View::Dashboard);
            return;
        }
        KeyCode::Char('p') | KeyCode::Char('2') => {
            app.set_view(View::Plans);
            return;
        }
        KeyCode::Char('?') | KeyCode::Char('3') => {
            app.set_view(View::Help);
            return;
        }
        KeyCode::Char('r') => {
            app.request_refresh();
            return;
        }
        KeyCode::Char('a') => {
            app.show_api_key = true;
            return;
        }
        KeyCode::Char('v') => {
            app.show_logs = !app.show_logs;
            return;
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            return;
        }
        KeyCode::Char('L') => {
            app.logout();
            return;
        }
        _ => {}
    }

    // Layer 4: view-specific keys
    match app.view {
        View::Dashboard => match key {
            KeyCode::Char('n') | KeyCode::PageDown => app.next_endpoint_page(),
            KeyCode::Char('b') | KeyCode::PageUp => app.prev_endpoint_page(),
            _ => {}
        },
        View::Plans => match key {
            KeyCode::Left => app.select_prev_plan(),
            KeyCode::Right => app.select_next_plan(),
            KeyCode::Enter => app.activate_selected_plan(),
            KeyCode::Esc => app.set_view(View::Dashboard),
            _ => {}
        },
        View::Help => {
            if key == KeyCode::Esc {
                app.set_view(View::Dashboard);
            }
        }
    }
}
