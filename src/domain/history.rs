use super::ids::{in_range, next_id};
use super::stopwatch::Elapsed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of entries shown in the history pane
pub const HISTORY_DISPLAY_LIMIT: usize = 10;

/// Something that happened to a todo or the stopwatch, rendered into a history line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Added(String),
    Completed(String),
    Unmarked(String),
    Deleted(String),
    StartedTiming(String),
    PausedTiming { text: String, elapsed: Elapsed },
    ResetTiming(String),
    Cleared,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Added(text) => write!(f, "Added task: \"{}\"", text),
            Action::Completed(text) => write!(f, "Completed task: \"{}\"", text),
            Action::Unmarked(text) => write!(f, "Unmarked task: \"{}\"", text),
            Action::Deleted(text) => write!(f, "Deleted task: \"{}\"", text),
            Action::StartedTiming(text) => write!(f, "Started timing task: \"{}\"", text),
            Action::PausedTiming { text, elapsed } => {
                write!(f, "Paused timing task: \"{}\" ({})", text, elapsed)
            }
            Action::ResetTiming(text) => write!(f, "Reset timer for task: \"{}\"", text),
            Action::Cleared => write!(f, "History cleared"),
        }
    }
}

/// A single immutable line in the audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation timestamp in milliseconds
    pub id: i64,
    /// Human-readable description
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of actions, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    last_id: i64,
}

impl HistoryLog {
    /// Rebuild the log from persisted entries, keeping their order.
    /// Ids past the allocation ceiling are re-issued.
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        let mut last_id = entries
            .iter()
            .map(|e| e.id)
            .filter(|id| in_range(*id))
            .max()
            .unwrap_or(0);
        for entry in entries.iter_mut().filter(|e| !in_range(e.id)) {
            last_id += 1;
            entry.id = last_id;
        }
        Self { entries, last_id }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record an action at `now`
    pub fn append(&mut self, action: &Action, now: DateTime<Utc>) -> &HistoryEntry {
        let id = next_id(self.last_id, now);
        self.last_id = id;
        self.entries.push(HistoryEntry {
            id,
            action: action.to_string(),
            timestamp: now,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Drop every entry. Ids keep increasing across clears.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Most recent entries, newest first
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev().take(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_action_text() {
        assert_eq!(Action::Added("Write report".into()).to_string(), "Added task: \"Write report\"");
        assert_eq!(Action::Unmarked("x".into()).to_string(), "Unmarked task: \"x\"");
        assert_eq!(Action::ResetTiming("x".into()).to_string(), "Reset timer for task: \"x\"");
        assert_eq!(Action::Cleared.to_string(), "History cleared");

        let paused = Action::PausedTiming {
            text: "Review PR".into(),
            elapsed: Elapsed::new(1, 2, 3),
        };
        assert_eq!(paused.to_string(), "Paused timing task: \"Review PR\" (01:02:03)");
    }

    #[test]
    fn test_append_keeps_order() {
        let mut log = HistoryLog::default();
        log.append(&Action::Added("a".into()), at(0));
        log.append(&Action::Deleted("a".into()), at(1));

        let actions: Vec<&str> = log.entries().iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["Added task: \"a\"", "Deleted task: \"a\""]);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut log = HistoryLog::default();
        let first = log.append(&Action::Cleared, at(0)).id;
        let second = log.append(&Action::Cleared, at(0)).id;
        assert!(second > first);
    }

    #[test]
    fn test_recent_is_newest_first_and_capped() {
        let mut log = HistoryLog::default();
        for i in 0..15 {
            log.append(&Action::Added(format!("task {}", i)), at(i));
        }

        let recent: Vec<&str> = log
            .recent(HISTORY_DISPLAY_LIMIT)
            .map(|e| e.action.as_str())
            .collect();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0], "Added task: \"task 14\"");
        assert_eq!(recent[9], "Added task: \"task 5\"");
        // Storage itself is not capped
        assert_eq!(log.len(), 15);
    }

    #[test]
    fn test_clear_keeps_ids_monotonic() {
        let mut log = HistoryLog::default();
        let before = log.append(&Action::Added("a".into()), at(5)).id;
        log.clear();
        assert!(log.is_empty());

        // Clock went backwards; ids must not
        let after = log.append(&Action::Cleared, at(0)).id;
        assert!(after > before);
    }

    #[test]
    fn test_from_entries_continues_ids() {
        let mut log = HistoryLog::default();
        log.append(&Action::Added("a".into()), at(10));
        let restored_last = log.entries()[0].id;

        let mut restored = HistoryLog::from_entries(log.entries().to_vec());
        let next = restored.append(&Action::Cleared, at(0)).id;
        assert!(next > restored_last);
    }

    #[test]
    fn test_from_entries_reissues_ids_past_ceiling() {
        let entry = |id: i64| HistoryEntry {
            id,
            action: "History cleared".to_string(),
            timestamp: at(0),
        };
        let mut log = HistoryLog::from_entries(vec![entry(5), entry(i64::MAX)]);
        let next = log.append(&Action::Cleared, at(0)).id;

        let ids: Vec<i64> = log.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 6, next]);
        assert!(next > 6);
    }
}
