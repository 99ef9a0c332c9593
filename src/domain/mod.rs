pub mod enums;
pub mod history;
pub mod ids;
pub mod stopwatch;
pub mod theme;
pub mod todo;

pub use enums::UiMode;
pub use history::{Action, HistoryEntry, HistoryLog, HISTORY_DISPLAY_LIMIT};
pub use stopwatch::{Stopwatch, StopwatchSnapshot};
pub use theme::Theme;
pub use todo::{Todo, TodoStore};
