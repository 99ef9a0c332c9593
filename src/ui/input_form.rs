use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding a task
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };
    let theme = app.theme;
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(form.text.clone(), modal_title_style(theme)),
            Span::styled("█", modal_title_style(theme)),
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            "Enter to add  ·  Esc to cancel",
            hint_style(theme),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Add Task ", modal_title_style(theme)))
                .style(modal_bg_style(theme)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
