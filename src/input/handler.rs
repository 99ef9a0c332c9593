use crate::app::AppState;
use crate::domain::UiMode;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> bool {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key, now),
        UiMode::AddingTask => handle_input_form_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Todos
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.delete_selected(),

        // Stopwatch
        KeyCode::Char('s') | KeyCode::Char('S') => app.start_stopwatch(now),
        KeyCode::Char('p') | KeyCode::Char('P') => app.pause_stopwatch(now),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_stopwatch(),

        KeyCode::Char('t') | KeyCode::Char('T') => app.toggle_theme(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.clear_history(),

        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        _ => {}
    }
    false
}

/// Handle keys while the add-task form is open
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    false
}
