use crate::app::AppState;
use crate::ui::styles::{
    border_style, default_style, dimmed_style, paused_style, running_style, title_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the stopwatch pane. It is faded out while there are no todos.
pub fn render_stopwatch_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let stopwatch = &app.stopwatch;
    let elapsed = stopwatch.elapsed();

    let (status, status_style) = if stopwatch.is_running() {
        ("● running", running_style(theme))
    } else if elapsed.is_zero() {
        ("○ stopped", dimmed_style(theme))
    } else {
        ("❚❚ paused", paused_style(theme))
    };

    let task_line = match stopwatch.bound_task_id().and_then(|id| app.todos.get(id)) {
        Some(todo) => Line::from(vec![
            Span::styled("timing: ", dimmed_style(theme)),
            Span::styled(todo.text.clone(), default_style(theme)),
        ]),
        None => Line::from(Span::styled("no task bound", dimmed_style(theme))),
    };

    let lines = vec![
        Line::from(Span::styled(
            elapsed.to_string(),
            default_style(theme).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(status, status_style)),
        task_line,
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(" Stopwatch ", title_style(theme)));

    let mut paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    if app.todos.is_empty() {
        paragraph = paragraph.style(dimmed_style(theme));
    }

    f.render_widget(paragraph, area);
}
