use crate::domain::Theme;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, theme: Theme, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ↑/↓ select   "),
        Span::raw("a add   "),
        Span::raw("Enter done   "),
        Span::raw("d delete   "),
        Span::raw("s start   "),
        Span::raw("p pause   "),
        Span::raw("r reset   "),
        Span::raw("c clear history   "),
        Span::raw(format!("t theme {}   ", theme.symbol())),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style(theme));
    f.render_widget(paragraph, area);
}
