pub mod history_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod stopwatch_pane;
pub mod styles;
pub mod todo_pane;

use crate::app::AppState;
use history_pane::render_history_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use ratatui::{widgets::Block, Frame};
use stopwatch_pane::render_stopwatch_pane;
use styles::default_style;
use todo_pane::render_todo_pane;

/// Main render function - draws the entire UI from current state
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    // Paint the theme background first
    f.render_widget(Block::default().style(default_style(app.theme)), size);

    render_keybindings(f, app.theme, layout.keybindings_area);
    render_todo_pane(f, app, layout.todo_area);
    render_stopwatch_pane(f, app, layout.stopwatch_area);
    render_history_pane(f, app, layout.history_area);

    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Storage;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::{Duration, Instant};

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_empty_states() {
        let app = AppState::load(Storage::in_memory());
        let screen = draw(&app);

        assert!(screen.contains("No tasks yet"));
        assert!(screen.contains("No history yet."));
        assert!(screen.contains("00:00:00"));
    }

    #[test]
    fn test_render_todos_history_and_timer() {
        let mut app = AppState::load(Storage::in_memory());
        app.add_todo("Write report");
        let t0 = Instant::now();
        app.start_stopwatch(t0);
        app.tick(t0 + Duration::from_secs(75));

        let screen = draw(&app);
        assert!(screen.contains("Write report"));
        assert!(screen.contains("00:01:15"));
        assert!(screen.contains("Started timing task"));
    }

    #[test]
    fn test_render_input_form() {
        let mut app = AppState::load(Storage::in_memory());
        app.start_add_task();
        app.input_form_add_char('x');

        let screen = draw(&app);
        assert!(screen.contains("Add Task"));
    }
}
