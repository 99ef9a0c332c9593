use crate::persistence::{find_local_dir, global_dir};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const DIR_ENV: &str = "TICKLIST_DIR";

/// Log file written inside the data directory
pub const LOG_FILE_NAME: &str = "ticklist.log";

/// Runtime configuration resolved from flags and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve the data directory.
    ///
    /// Order: `--dir` flag, `TICKLIST_DIR`, a `.ticklist` directory in the
    /// current directory or any parent, then `~/.ticklist`.
    pub fn resolve(dir_flag: Option<PathBuf>) -> Result<Self> {
        let env_dir = env::var_os(DIR_ENV).map(PathBuf::from);
        let cwd = env::current_dir().context("Could not determine current directory")?;
        Self::resolve_from(dir_flag, env_dir, &cwd)
    }

    fn resolve_from(dir_flag: Option<PathBuf>, env_dir: Option<PathBuf>, cwd: &Path) -> Result<Self> {
        let data_dir = match dir_flag.or(env_dir) {
            Some(dir) => dir,
            None => match find_local_dir(cwd) {
                Some(local) => local,
                None => global_dir()?,
            },
        };
        Ok(Self { data_dir })
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}
