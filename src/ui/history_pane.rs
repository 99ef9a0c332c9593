use crate::app::AppState;
use crate::domain::HISTORY_DISPLAY_LIMIT;
use crate::ui::styles::{border_style, default_style, dimmed_style, timestamp_style, title_style};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the history pane (most recent first)
pub fn render_history_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let title = if app.history.len() > HISTORY_DISPLAY_LIMIT {
        format!(" History (last {} of {}) ", HISTORY_DISPLAY_LIMIT, app.history.len())
    } else {
        " History ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(title, title_style(theme)));

    if app.history.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled("No history yet.", dimmed_style(theme))))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .recent_history()
        .map(|entry| {
            let when = entry
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
            ListItem::new(vec![
                Line::from(Span::styled(entry.action.clone(), default_style(theme))),
                Line::from(Span::styled(when, timestamp_style(theme))),
            ])
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
