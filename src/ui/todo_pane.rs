use crate::app::AppState;
use crate::domain::Todo;
use crate::ui::styles::{
    border_style, check_style, default_style, dimmed_style, done_style, running_style,
    selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Create a line for one todo
fn create_todo_line(app: &AppState, todo: &Todo) -> Line<'static> {
    let theme = app.theme;
    let (checkbox, text_style) = if todo.completed {
        (Span::styled("✔ ", check_style(theme)), done_style(theme))
    } else {
        (Span::styled("○ ", default_style(theme)), default_style(theme))
    };

    let mut spans = vec![checkbox, Span::styled(todo.text.clone(), text_style)];

    if app.stopwatch.bound_task_id() == Some(todo.id) {
        spans.push(Span::styled("  ⏱", running_style(theme)));
    }

    Line::from(spans)
}

/// Render the todo list pane
pub fn render_todo_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let open = app.todos.todos().iter().filter(|t| !t.completed).count();
    let title = format!(" Tasks ({} open / {}) ", open, app.todos.len());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(title, title_style(theme)));

    if app.todos.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No tasks yet. Press a to add one!",
            dimmed_style(theme),
        )))
        .block(block)
        .wrap(Wrap { trim: true });
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .todos
        .todos()
        .iter()
        .enumerate()
        .map(|(idx, todo)| {
            let item = ListItem::new(create_todo_line(app, todo));
            if idx == app.selected_index {
                item.style(selected_style(theme))
            } else {
                item
            }
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
