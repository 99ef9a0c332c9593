use crate::domain::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Colours for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub done: Color,
    pub running: Color,
    pub paused: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            fg: Color::White,
            bg: Color::Black,
            accent: Color::LightCyan,
            muted: Color::DarkGray,
            done: Color::Green,
            running: Color::Magenta,
            paused: Color::Yellow,
        },
        Theme::Light => Palette {
            fg: Color::Black,
            bg: Color::White,
            accent: Color::Blue,
            muted: Color::Gray,
            done: Color::Green,
            running: Color::Magenta,
            paused: Color::Rgb(176, 120, 0),
        },
    }
}

/// Default text style
pub fn default_style(theme: Theme) -> Style {
    let p = palette(theme);
    Style::default().fg(p.fg).bg(p.bg)
}

/// Selected row highlight style
pub fn selected_style(theme: Theme) -> Style {
    let p = palette(theme);
    Style::default()
        .fg(p.bg)
        .bg(p.accent)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style(theme: Theme) -> Style {
    Style::default()
        .fg(palette(theme).accent)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).muted)
}

/// Keybinding hint style
pub fn hint_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).muted)
}

/// Completed todo style
pub fn done_style(theme: Theme) -> Style {
    Style::default()
        .fg(palette(theme).done)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Checkbox of a completed todo
pub fn check_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).done)
}

pub fn running_style(theme: Theme) -> Style {
    Style::default()
        .fg(palette(theme).running)
        .add_modifier(Modifier::BOLD)
}

pub fn paused_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).paused)
}

/// Faded style for inactive panes and empty states
pub fn dimmed_style(theme: Theme) -> Style {
    Style::default()
        .fg(palette(theme).muted)
        .add_modifier(Modifier::DIM)
}

/// History timestamp style
pub fn timestamp_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).muted)
}

/// Modal background style
pub fn modal_bg_style(theme: Theme) -> Style {
    let p = palette(theme);
    Style::default().bg(p.bg).fg(p.fg)
}

/// Modal title style
pub fn modal_title_style(theme: Theme) -> Style {
    Style::default()
        .fg(palette(theme).accent)
        .add_modifier(Modifier::BOLD)
}
