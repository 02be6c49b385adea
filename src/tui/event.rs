//! Keyboard event handling for the TUI.
//!
//! Maps crossterm keyboard events to application state changes. Key
//! behavior depends on the focused panel. Transitions that need a network
//! call report it back to the event loop as an [`Action`] rather than
//! performing I/O here.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, DetailRequest, Focus};
use crate::form::InputMode;

/// What the event loop should do after a key has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to dispatch.
    None,
    /// Exit the application.
    Quit,
    /// Dispatch a tagging request for the current form
    /// (`App::begin_submit` has already run).
    SubmitTag,
    /// Dispatch a detail lookup for an interactive tag.
    FetchDetail(DetailRequest),
}

/// Handles a keyboard event and updates the app state accordingly.
///
/// # Event handling
///
/// - Any key dismisses a pending alert (blocking modal semantics)
/// - `Ctrl+C` always quits; `q` quits outside the input group
/// - `Tab` / `Shift+Tab`: cycle focus; `Esc`: back to the input group
/// - `Enter`: submit the form (commits the typed file path first in file
///   mode); on the results panel it activates the selected tag instead
/// - `ModeSelect` focused: `h`/`l`/arrows or `1`/`2`/`3` switch input mode
/// - `Input` focused: character input edits the active mode's field
/// - `Domains` focused: `j`/`k` move, `Space` toggles the domain, `s`
///   toggles score display
/// - `Results` focused: `j`/`k` move across panel entries
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    // The alert is a blocking affordance: the next key only dismisses it.
    if app.alert().is_some() {
        app.dismiss_alert();
        return Action::None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == KeyCode::Char('q')
        && key.modifiers.is_empty()
        && app.focus() != Focus::Input
    {
        return Action::Quit;
    }

    if key.code == KeyCode::Tab {
        app.next_focus();
        return Action::None;
    }
    if key.code == KeyCode::BackTab {
        app.prev_focus();
        return Action::None;
    }
    if key.code == KeyCode::Esc {
        app.reset_focus();
        return Action::None;
    }

    if key.code == KeyCode::Enter {
        return handle_enter(app);
    }

    match app.focus() {
        Focus::ModeSelect => handle_mode_select(app, key),
        Focus::Input => handle_input(app, key),
        Focus::Domains => handle_domains(app, key),
        Focus::Results => handle_results(app, key),
    }

    Action::None
}

/// Enter submits the form, except on the results panel where it activates
/// the selected tag's detail lookup.
fn handle_enter(app: &mut App) -> Action {
    if app.focus() == Focus::Results {
        return match app.request_detail() {
            Some(request) => Action::FetchDetail(request),
            None => Action::None,
        };
    }

    // In file mode the first Enter commits the typed path; submission
    // happens on the next one, once the gate opens.
    if app.focus() == Focus::Input && app.commit_file_input() {
        return Action::None;
    }

    if app.begin_submit() {
        Action::SubmitTag
    } else {
        Action::None
    }
}

fn handle_mode_select(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.select_prev_mode(),
        KeyCode::Right | KeyCode::Char('l') => app.select_next_mode(),
        KeyCode::Char('1') => app.select_mode(InputMode::Text),
        KeyCode::Char('2') => app.select_mode(InputMode::File),
        KeyCode::Char('3') => app.select_mode(InputMode::Url),
        _ => {}
    }
}

fn handle_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            app.push_input_char(c);
        }
        KeyCode::Backspace => {
            app.pop_input_char();
        }
        _ => {}
    }
}

fn handle_domains(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.domain_cursor_next(),
        KeyCode::Char('k') | KeyCode::Up => app.domain_cursor_prev(),
        KeyCode::Char(' ') => app.toggle_domain_at_cursor(),
        KeyCode::Char('s') => app.toggle_score_display(),
        _ => {}
    }
}

fn handle_results(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_result(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev_result(),
        _ => {}
    }
}
