use std::env;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directives, e.g. `ticklist=debug`
pub const LOG_ENV: &str = "TICKLIST_LOG";
/// `json` for JSON lines, anything else for the compact format
pub const LOG_FORMAT_ENV: &str = "TICKLIST_LOG_FORMAT";

/// Install the global subscriber, writing to `log_path`.
///
/// The terminal belongs to the UI, so logs never go to stdout or stderr.
/// If the file cannot be opened, logging stays off.
pub fn init_tracing(log_path: &Path) {
    let file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("ticklist=info"));
    let format = env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);
    let writer = Mutex::new(file);

    let result = match format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(writer))
            .try_init(),
        _ => registry
            .with(fmt::layer().compact().with_ansi(false).with_writer(writer))
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!(path = %log_path.display(), "logging initialised");
    }
}
