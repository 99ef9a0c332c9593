pub mod error;
pub mod files;
pub mod store;

pub use files::{find_local_dir, global_dir, init_local_dir};
pub use store::{Storage, HISTORY_KEY, STOPWATCH_KEY, THEME_KEY, TODOS_KEY};
