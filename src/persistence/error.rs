use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by a key-value backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read key `{key}` from {path}")]
    Read {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write key `{key}` to {path}")]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to serialize value for key `{key}`")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
