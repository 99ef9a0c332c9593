use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the stopwatch pane including borders
const STOPWATCH_HEIGHT: u16 = 7;

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub todo_area: Rect,
    pub stopwatch_area: Rect,
    pub history_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Main area: Todos (60%) | right column (40%)
///   - right column: Stopwatch (fixed height) above History
pub fn create_layout(area: Rect) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(STOPWATCH_HEIGHT), Constraint::Min(0)])
        .split(columns[1]);

    MainLayout {
        keybindings_area: main_chunks[0],
        todo_area: columns[0],
        stopwatch_area: right[0],
        history_area: right[1],
    }
}

/// Create centered modal area (for the add-task form)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(7),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
