use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the per-project data directory
pub const LOCAL_DIR_NAME: &str = ".ticklist";

/// Find local .ticklist directory by walking up the directory tree
pub fn find_local_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(LOCAL_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

/// Global fallback directory (~/.ticklist)
pub fn global_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(LOCAL_DIR_NAME))
}

/// Ensure a directory exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Initialize a local .ticklist directory in the current directory
pub fn init_local_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let dir = current_dir.join(LOCAL_DIR_NAME);

    if dir.exists() {
        anyhow::bail!("Ticklist directory already exists: {}", dir.display());
    }

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    Ok(dir)
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("todos.json");

        atomic_write(&test_file, "[1]").unwrap();
        atomic_write(&test_file, "[2]").unwrap();

        assert_eq!(fs::read_to_string(&test_file).unwrap(), "[2]");
    }

    #[test]
    fn test_atomic_write_missing_dir_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("missing").join("todos.json");

        assert!(atomic_write(&test_file, "[]").is_err());
    }

    #[test]
    fn test_find_local_dir_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let local = temp_dir.path().join(LOCAL_DIR_NAME);
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&local).unwrap();
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_dir(&nested), Some(local));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("x").join("y");

        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
        // Idempotent
        ensure_dir(&dir).unwrap();
    }
}
