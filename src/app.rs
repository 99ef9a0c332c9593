use crate::domain::{
    Action, HistoryEntry, HistoryLog, Stopwatch, StopwatchSnapshot, Theme, Todo, TodoStore, UiMode,
    HISTORY_DISPLAY_LIMIT,
};
use crate::persistence::{Storage, HISTORY_KEY, STOPWATCH_KEY, THEME_KEY, TODOS_KEY};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info};

/// Input form state for adding tasks
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    pub text: String,
}

/// Main application state.
///
/// Owns every component. Domain operations return the [`Action`] they
/// produced; this type appends it to the history and persists whatever
/// changed. Rendering only reads from here.
pub struct AppState {
    pub todos: TodoStore,
    pub history: HistoryLog,
    pub stopwatch: Stopwatch,
    pub theme: Theme,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    storage: Storage,
}

impl AppState {
    /// Build state from whatever `storage` holds, defaulting anything missing
    pub fn load(storage: Storage) -> Self {
        let todos = storage
            .load::<Vec<Todo>>(TODOS_KEY)
            .map(TodoStore::from_todos)
            .unwrap_or_default();
        let history = storage
            .load::<Vec<HistoryEntry>>(HISTORY_KEY)
            .map(HistoryLog::from_entries)
            .unwrap_or_default();
        let theme = Theme::from_stored(storage.load::<String>(THEME_KEY).as_deref());
        let stopwatch = storage
            .load::<StopwatchSnapshot>(STOPWATCH_KEY)
            .map(|snapshot| Stopwatch::restore(&snapshot))
            .unwrap_or_default();

        info!(
            todos = todos.len(),
            history = history.len(),
            theme = theme.as_str(),
            elapsed = %stopwatch.elapsed(),
            "state loaded"
        );

        Self {
            todos,
            history,
            stopwatch,
            theme,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            storage,
        }
    }

    pub fn is_persisting(&self) -> bool {
        !self.storage.is_degraded()
    }

    fn save_todos(&mut self) {
        self.storage.save(TODOS_KEY, self.todos.todos());
    }

    fn save_history(&mut self) {
        self.storage.save(HISTORY_KEY, self.history.entries());
    }

    fn save_stopwatch(&mut self) {
        let snapshot = self.stopwatch.snapshot();
        self.storage.save(STOPWATCH_KEY, &snapshot);
    }

    /// Append an action to the history and persist it
    pub fn record(&mut self, action: Action) {
        let entry = self.history.append(&action, Utc::now());
        debug!(id = entry.id, action = %entry.action, "history appended");
        self.save_history();
    }

    /// Add a todo; blank text is ignored
    pub fn add_todo(&mut self, text: &str) -> bool {
        let Some(action) = self.todos.add(text, Utc::now()) else {
            return false;
        };
        info!(count = self.todos.len(), "todo added");
        self.save_todos();
        self.record(action);
        true
    }

    /// Flip the completed flag of `id`
    pub fn toggle_todo(&mut self, id: i64) -> bool {
        let Some(action) = self.todos.toggle(id) else {
            return false;
        };
        debug!(id, "todo toggled");
        self.save_todos();
        self.record(action);
        true
    }

    /// Delete `id`. Deleting the task the stopwatch is timing also drops the binding.
    pub fn delete_todo(&mut self, id: i64) -> bool {
        let Some(action) = self.todos.delete(id) else {
            return false;
        };
        info!(id, count = self.todos.len(), "todo deleted");
        self.save_todos();
        self.record(action);

        if self.stopwatch.unbind(id) {
            debug!(id, "stopwatch binding cleared by delete");
            self.save_stopwatch();
        }
        self.clamp_selection();
        true
    }

    /// Empty the history, then note that it was cleared
    pub fn clear_history(&mut self) {
        info!(dropped = self.history.len(), "history cleared");
        self.history.clear();
        self.save_history();
        self.record(Action::Cleared);
    }

    /// Most recent history entries, newest first
    pub fn recent_history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.recent(HISTORY_DISPLAY_LIMIT)
    }

    pub fn start_stopwatch(&mut self, now: Instant) {
        if self.stopwatch.is_running() {
            return;
        }
        let action = self.stopwatch.start(now, &self.todos);
        debug!(bound = ?self.stopwatch.bound_task_id(), "stopwatch started");
        self.save_stopwatch();
        if let Some(action) = action {
            self.record(action);
        }
    }

    /// Pause at `now`, applying any tick that fell due first
    pub fn pause_stopwatch(&mut self, now: Instant) {
        if !self.stopwatch.is_running() {
            return;
        }
        self.stopwatch.advance(now);
        let action = self.stopwatch.pause(&self.todos);
        let elapsed = self.stopwatch.elapsed();
        debug!(%elapsed, seconds = elapsed.total_seconds(), "stopwatch paused");
        self.save_stopwatch();
        if let Some(action) = action {
            self.record(action);
        }
    }

    pub fn reset_stopwatch(&mut self) {
        let action = self.stopwatch.reset(&self.todos);
        debug!("stopwatch reset");
        self.save_stopwatch();
        if let Some(action) = action {
            self.record(action);
        }
    }

    /// Apply stopwatch ticks due by `now`
    pub fn tick(&mut self, now: Instant) -> u32 {
        self.stopwatch.advance(now)
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        info!(theme = self.theme.as_str(), "theme toggled");
        self.storage.save(THEME_KEY, self.theme.as_str());
    }

    /// Pause timing and flush everything before exit
    pub fn shutdown(&mut self, now: Instant) {
        self.pause_stopwatch(now);
        self.save_todos();
        self.save_history();
        self.save_stopwatch();
        info!("state saved on exit");
    }

    /// Id of the todo under the cursor
    pub fn selected_todo_id(&self) -> Option<i64> {
        self.todos.todos().get(self.selected_index).map(|t| t.id)
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.todos.len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected_index >= self.todos.len() {
            self.selected_index = self.todos.len().saturating_sub(1);
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_todo_id() {
            self.toggle_todo(id);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_todo_id() {
            self.delete_todo(id);
        }
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.text.push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.text.pop();
        }
    }

    /// Submit the form. Blank input keeps the form open.
    pub fn submit_input_form(&mut self) {
        let Some(form) = &self.input_form else {
            return;
        };
        let text = form.text.clone();
        if self.add_todo(&text) {
            self.input_form = None;
            self.ui_mode = UiMode::Normal;
        }
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn create_test_app() -> AppState {
        AppState::load(Storage::in_memory())
    }

    fn actions(app: &AppState) -> Vec<String> {
        app.history.entries().iter().map(|e| e.action.clone()).collect()
    }

    #[test]
    fn test_scenario_add_toggle_delete() {
        let mut app = create_test_app();
        app.add_todo("Write report");
        app.add_todo("Review PR");
        let first = app.todos.todos()[0].id;
        let second = app.todos.todos()[1].id;
        app.toggle_todo(first);
        app.delete_todo(second);

        assert_eq!(app.todos.len(), 1);
        assert_eq!(app.todos.todos()[0].text, "Write report");
        assert!(app.todos.todos()[0].completed);
        assert_eq!(
            actions(&app),
            vec![
                "Added task: \"Write report\"",
                "Added task: \"Review PR\"",
                "Completed task: \"Write report\"",
                "Deleted task: \"Review PR\"",
            ]
        );

        let recent: Vec<&str> = app.recent_history().map(|e| e.action.as_str()).collect();
        assert_eq!(recent[0], "Deleted task: \"Review PR\"");
        assert_eq!(recent[3], "Added task: \"Write report\"");
    }

    #[test]
    fn test_blank_add_changes_nothing() {
        let mut app = create_test_app();
        assert!(!app.add_todo(""));
        assert!(!app.add_todo("   "));
        assert!(app.todos.is_empty());
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_each_toggle_records_one_entry() {
        let mut app = create_test_app();
        app.add_todo("a");
        let id = app.todos.todos()[0].id;

        app.toggle_todo(id);
        app.toggle_todo(id);

        assert!(!app.todos.todos()[0].completed);
        assert_eq!(app.history.len(), 3);
        assert_eq!(actions(&app)[2], "Unmarked task: \"a\"");
    }

    #[test]
    fn test_delete_missing_records_nothing() {
        let mut app = create_test_app();
        app.add_todo("a");

        assert!(!app.delete_todo(12345));
        assert!(!app.toggle_todo(12345));
        assert_eq!(app.todos.len(), 1);
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_clear_history_leaves_one_entry() {
        let mut app = create_test_app();
        app.add_todo("a");
        app.add_todo("b");

        app.clear_history();
        assert_eq!(actions(&app), vec!["History cleared"]);

        app.clear_history();
        assert_eq!(actions(&app), vec!["History cleared"]);
    }

    #[test]
    fn test_stopwatch_history_entries() {
        let mut app = create_test_app();
        app.add_todo("Write report");
        let t0 = Instant::now();

        app.start_stopwatch(t0);
        app.start_stopwatch(t0);
        app.tick(t0 + Duration::from_secs(3));
        app.pause_stopwatch(t0 + Duration::from_secs(3));
        app.reset_stopwatch();

        assert_eq!(
            actions(&app),
            vec![
                "Added task: \"Write report\"",
                "Started timing task: \"Write report\"",
                "Paused timing task: \"Write report\" (00:00:03)",
                "Reset timer for task: \"Write report\"",
            ]
        );
        assert!(app.stopwatch.elapsed().is_zero());
        assert_eq!(app.stopwatch.bound_task_id(), None);
    }

    #[test]
    fn test_pause_applies_tick_already_due() {
        let mut app = create_test_app();
        app.add_todo("Write report");
        let t0 = Instant::now();

        app.start_stopwatch(t0);
        app.tick(t0 + Duration::from_millis(2500));
        // Third second fell due but no tick ran before the key press
        app.pause_stopwatch(t0 + Duration::from_millis(3100));

        assert_eq!(app.stopwatch.elapsed().total_seconds(), 3);
        assert_eq!(
            actions(&app).last().unwrap(),
            "Paused timing task: \"Write report\" (00:00:03)"
        );
    }

    #[test]
    fn test_stopwatch_without_todos_records_nothing() {
        let mut app = create_test_app();
        let t0 = Instant::now();
        app.start_stopwatch(t0);
        app.tick(t0 + Duration::from_secs(2));
        app.pause_stopwatch(t0 + Duration::from_secs(2));
        app.reset_stopwatch();

        assert!(app.history.is_empty());
    }

    #[test]
    fn test_deleting_bound_task_clears_binding() {
        let mut app = create_test_app();
        app.add_todo("first");
        app.add_todo("second");
        let t0 = Instant::now();
        app.start_stopwatch(t0);
        let bound = app.stopwatch.bound_task_id().unwrap();

        app.delete_todo(bound);
        assert_eq!(app.stopwatch.bound_task_id(), None);
        // Timing carries on
        assert!(app.stopwatch.is_running());
        assert_eq!(app.tick(t0 + Duration::from_secs(2)), 2);

        // Next start after a pause binds the remaining task
        app.pause_stopwatch(t0 + Duration::from_secs(2));
        app.start_stopwatch(t0 + Duration::from_secs(2));
        assert_eq!(app.stopwatch.bound_task_id(), Some(app.todos.todos()[0].id));
        assert_eq!(actions(&app).last().unwrap(), "Started timing task: \"second\"");
    }

    #[test]
    fn test_round_trip_through_storage() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = AppState::load(Storage::open(temp_dir.path()));
        app.add_todo("Write report");
        app.add_todo("Review PR");
        app.toggle_todo(app.todos.todos()[1].id);
        app.toggle_theme();

        let reloaded = AppState::load(Storage::open(temp_dir.path()));
        assert_eq!(reloaded.todos.todos(), app.todos.todos());
        assert_eq!(reloaded.history.entries(), app.history.entries());
        assert_eq!(reloaded.theme, Theme::Light);
    }

    #[test]
    fn test_shutdown_saves_paused_stopwatch() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = AppState::load(Storage::open(temp_dir.path()));
        app.add_todo("a");
        let t0 = Instant::now();
        app.start_stopwatch(t0);
        app.tick(t0 + Duration::from_secs(61));
        app.shutdown(t0 + Duration::from_secs(61));

        let reloaded = AppState::load(Storage::open(temp_dir.path()));
        assert!(!reloaded.stopwatch.is_running());
        assert_eq!(reloaded.stopwatch.elapsed().to_string(), "00:01:01");
        assert_eq!(reloaded.stopwatch.bound_task_id(), app.stopwatch.bound_task_id());
        assert!(actions(&reloaded).last().unwrap().starts_with("Paused timing task: \"a\""));
    }

    #[test]
    fn test_malformed_storage_falls_back_to_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("todos.json"), "[{\"id\":").unwrap();
        std::fs::write(temp_dir.path().join("history.json"), "null").unwrap();
        std::fs::write(temp_dir.path().join("theme.json"), "\"purple\"").unwrap();

        let app = AppState::load(Storage::open(temp_dir.path()));
        assert!(app.todos.is_empty());
        assert!(app.history.is_empty());
        assert_eq!(app.theme, Theme::Dark);
    }

    #[test]
    fn test_selection_clamped_after_delete() {
        let mut app = create_test_app();
        app.add_todo("a");
        app.add_todo("b");
        app.move_selection_down();
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        app.delete_selected();
        assert_eq!(app.selected_index, 0);
        app.delete_selected();
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_todo_id(), None);
        app.toggle_selected();
        assert_eq!(app.history.len(), 4);
    }

    #[test]
    fn test_input_form_submit() {
        let mut app = create_test_app();
        app.start_add_task();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        app.submit_input_form();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        for c in "Tea!".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_backspace();
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert_eq!(app.todos.todos()[0].text, "Tea");
    }

    #[test]
    fn test_cancel_input_form() {
        let mut app = create_test_app();
        app.start_add_task();
        app.input_form_add_char('x');
        app.cancel_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.todos.is_empty());
    }
}
