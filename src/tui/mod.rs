//! Terminal User Interface module for percolate.
//!
//! Renders the tagging form above per-domain result panels using ratatui
//! for rendering and crossterm for terminal management. Network calls run
//! on worker threads and report back over a channel, so the busy indicator
//! keeps animating while a request is in flight.

use std::io;
use std::panic;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use crossterm::{
    event::{self as crossterm_event, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

mod app;
pub mod event;
mod ui;

pub use app::{App, DetailRequest, Focus};

use crate::client::{PercolateClient, PercolateError};
use crate::response::{NO_DETAIL, TaggingResponse, compose_tooltip};
use event::Action;

/// Completion of a background network call, delivered to the event loop.
enum AppEvent {
    /// A tagging request finished.
    TagResponse(Result<TaggingResponse, PercolateError>),
    /// A tag detail lookup finished.
    TaxaResponse {
        domain: String,
        label: String,
        result: Result<serde_json::Value, PercolateError>,
    },
}

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and enters the alternate screen.
/// Returns a configured Terminal instance.
///
/// # Errors
///
/// Returns an error if terminal initialization fails.
fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen.
/// This should always be called before exiting the TUI,
/// even in error cases, to prevent terminal corruption.
///
/// # Errors
///
/// Returns an error if terminal restoration fails.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Minimal terminal restoration for panic handler.
///
/// Does not require a Terminal reference, making it safe to call
/// from a panic hook where we may not have access to the Terminal.
/// Ignores errors since we're likely already in a bad state.
fn restore_terminal_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Initializes a panic hook that restores the terminal before panicking.
///
/// This ensures the terminal is restored even if a panic occurs anywhere
/// in the application, not just in the event loop. The original panic
/// hook is preserved and called after terminal restoration.
fn init_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_panic();
        original_hook(panic_info);
    }));
}

/// Runs the main event loop for the TUI.
///
/// Polls for keyboard events, updates app state, dispatches network work to
/// background threads, and re-renders. Exits on 'q' outside the input group
/// or Ctrl+C.
///
/// # Errors
///
/// Returns an error if event polling, rendering, or terminal operations fail.
/// Terminal state is always restored, even on error.
pub fn run_event_loop(app: &mut App, client: &PercolateClient) -> Result<()> {
    let mut terminal = init_terminal()?;

    // Ensure terminal is restored even if we panic or error
    let result = run_event_loop_internal(app, client, &mut terminal);

    // Always restore terminal state
    if let Err(e) = restore_terminal(&mut terminal) {
        eprintln!("Error restoring terminal: {e}");
    }

    result
}

/// Internal event loop implementation.
///
/// Separated from `run_event_loop` to ensure terminal restoration happens
/// in the outer function.
fn run_event_loop_internal(
    app: &mut App,
    client: &PercolateClient,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();

    loop {
        // Render the current state
        terminal.draw(|frame| {
            ui::draw(frame, app);
        })?;

        // Apply any completed background work before handling new input.
        while let Ok(completed) = rx.try_recv() {
            apply_app_event(app, completed);
        }

        // Poll for events
        if crossterm_event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = crossterm_event::read()?
        {
            match event::handle_key_event(app, key) {
                Action::Quit => break,
                Action::SubmitTag => dispatch_tag(app, client, &tx),
                Action::FetchDetail(request) => dispatch_detail(client, &tx, request),
                Action::None => {}
            }
        }
    }

    Ok(())
}

/// Folds a background completion into the app state.
fn apply_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::TagResponse(Ok(response)) => app.apply_response(&response),
        AppEvent::TagResponse(Err(e)) => app.fail_submit(e.to_string()),
        AppEvent::TaxaResponse {
            domain,
            label,
            result,
        } => {
            // A failed lookup still resolves the tooltip, with the
            // placeholder text.
            let tooltip = match result {
                Ok(record) => compose_tooltip(&domain, &record),
                Err(_) => NO_DETAIL.to_string(),
            };
            app.resolve_detail(&domain, &label, tooltip);
        }
    }
}

/// Spawns a worker thread for the tagging request described by the current
/// form. The form snapshot is taken here so later edits cannot race the
/// in-flight request.
fn dispatch_tag(app: &App, client: &PercolateClient, tx: &mpsc::Sender<AppEvent>) {
    let client = client.clone();
    let form = app.form().clone();
    let tx = tx.clone();
    thread::spawn(move || {
        let result = client.tag_form(&form);
        // The receiver is gone only when the loop has exited.
        let _ = tx.send(AppEvent::TagResponse(result));
    });
}

/// Spawns a worker thread for a tag detail lookup.
fn dispatch_detail(client: &PercolateClient, tx: &mpsc::Sender<AppEvent>, request: DetailRequest) {
    let client = client.clone();
    let tx = tx.clone();
    thread::spawn(move || {
        let result = client.fetch_taxa(&request.domain, request.field, &request.label);
        let _ = tx.send(AppEvent::TaxaResponse {
            domain: request.domain,
            label: request.label,
            result,
        });
    });
}

/// Entry point for the TUI application.
///
/// Builds the backend client from the environment and starts the event
/// loop.
///
/// # Errors
///
/// Returns an error if:
/// - The backend URL is invalid or the HTTP client cannot be built
/// - Terminal initialization or the event loop fails
pub fn run() -> Result<()> {
    // Install panic hook to restore terminal on panic
    init_panic_hook();

    let client = crate::client::PercolateClientBuilder::new()
        .build()
        .context("Failed to configure the tagging backend client")?;

    let mut app = App::new();
    run_event_loop(&mut app, &client).context("TUI event loop failed")?;

    Ok(())
}
