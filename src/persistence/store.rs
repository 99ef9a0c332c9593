use super::error::StorageError;
use super::files::{atomic_write, ensure_dir};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key for the todo list
pub const TODOS_KEY: &str = "todos";
/// Key for the history log
pub const HISTORY_KEY: &str = "history";
/// Key for the theme preference
pub const THEME_KEY: &str = "theme";
/// Key for the stopwatch state
pub const STOPWATCH_KEY: &str = "stopwatch";

/// Durable string-to-string storage
pub trait KeyValueStore {
    /// Raw value for `key`, or `None` when nothing is stored
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        atomic_write(&path, value).map_err(|source| StorageError::Write {
            key: key.to_string(),
            path,
            source,
        })
    }
}

/// Volatile store used when no directory is usable, and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Best-effort JSON persistence over a [`KeyValueStore`].
///
/// Loads never fail: missing or malformed values come back as `None` and the
/// caller falls back to its default. The first failed write switches the
/// adapter to in-memory mode for the rest of the session.
pub struct Storage {
    backend: Box<dyn KeyValueStore>,
    degraded: bool,
}

impl Storage {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            degraded: false,
        }
    }

    /// Open a directory-backed store, falling back to memory if it cannot be created
    pub fn open(dir: &Path) -> Self {
        match ensure_dir(dir) {
            Ok(()) => {
                debug!(dir = %dir.display(), "opened storage directory");
                Self::new(Box::new(DirStore::new(dir)))
            }
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "storage unavailable, running in memory");
                let mut storage = Self::in_memory();
                storage.degraded = true;
                storage
            }
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::<MemoryStore>::default())
    }

    /// True once persistence has been abandoned for this session
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Serialize `value` as JSON under `key`. Errors are logged, not returned.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        if self.degraded {
            return;
        }
        if let Err(e) = self.try_save(key, value) {
            warn!(key, error = %e, "write failed, continuing without persistence");
            self.degraded = true;
        }
    }

    fn try_save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &json)
    }

    /// Load and parse `key`; anything unreadable counts as absent
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "read failed, using defaults");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "malformed stored value, using defaults");
                None
            }
        }
    }
}
