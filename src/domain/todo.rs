use super::history::Action;
use super::ids::{in_range, next_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// A single task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Creation timestamp in milliseconds, unique within the store
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Ordered list of todos. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoStore {
    todos: Vec<Todo>,
    last_id: i64,
}

impl TodoStore {
    /// Rebuild a store from persisted todos.
    ///
    /// Blank entries are dropped. Duplicate ids and ids past the allocation
    /// ceiling are re-issued, so ids stay unique for whatever was on disk.
    pub fn from_todos(todos: Vec<Todo>) -> Self {
        let mut last_id = todos
            .iter()
            .map(|t| t.id)
            .filter(|id| in_range(*id))
            .max()
            .unwrap_or(0);
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(todos.len());

        for mut todo in todos {
            if todo.text.trim().is_empty() {
                warn!(id = todo.id, "dropping stored todo with empty text");
                continue;
            }
            if !in_range(todo.id) || !seen.insert(todo.id) {
                last_id += 1;
                warn!(old = todo.id, new = last_id, "re-issuing stored todo id");
                todo.id = last_id;
                seen.insert(todo.id);
            }
            kept.push(todo);
        }

        Self {
            todos: kept,
            last_id,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// First todo in store order that is not completed
    pub fn first_incomplete(&self) -> Option<&Todo> {
        self.todos.iter().find(|t| !t.completed)
    }

    /// Append a new todo. Blank text is ignored.
    pub fn add(&mut self, text: &str, now: DateTime<Utc>) -> Option<Action> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = next_id(self.last_id, now);
        self.last_id = id;
        self.todos.push(Todo {
            id,
            text: text.to_string(),
            completed: false,
            created_at: now,
        });

        Some(Action::Added(text.to_string()))
    }

    /// Flip the completed flag of `id`
    pub fn toggle(&mut self, id: i64) -> Option<Action> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        todo.completed = !todo.completed;

        if todo.completed {
            Some(Action::Completed(todo.text.clone()))
        } else {
            Some(Action::Unmarked(todo.text.clone()))
        }
    }

    /// Remove `id` from the store
    pub fn delete(&mut self, id: i64) -> Option<Action> {
        let index = self.todos.iter().position(|t| t.id == id)?;
        let todo = self.todos.remove(index);
        Some(Action::Deleted(todo.text))
    }
}
