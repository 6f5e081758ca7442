//! Log sink setup
//!
//! The terminal is owned by the UI, so tracing output goes to a file in
//! the user's data directory. The filter comes from `TAPREFLEX_LOG`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use crate::{TapError, Result, APP_NAME, LOG_ENV_VAR, LOG_FILE};

/// Default filter when the environment variable is unset or invalid
pub const DEFAULT_FILTER: &str = "info";

/// Get the standard log file path
/// Uses $DATA_LOCAL_HOME/tapreflex/tapreflex.log
pub fn log_file_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| TapError::LoggingError(
            "Unable to determine data directory".to_string()
        ))?;

    Ok(data_dir.join(APP_NAME).join(LOG_FILE))
}

/// Build the filter from the environment, falling back to `DEFAULT_FILTER`
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Install the global subscriber writing to `path`
pub fn init_at(path: &Path) -> Result<()> {
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| TapError::LoggingError(format!("Failed to install subscriber: {}", e)))
}

/// Install the global subscriber writing to the standard log file
pub fn init() -> Result<PathBuf> {
    let path = log_file_path()?;
    init_at(&path)?;
    Ok(path)
}
