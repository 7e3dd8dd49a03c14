//! Home-based storage paths for everything the tracker persists.
//!
//! Layout under `~/.task-tracker/`:
//! - `task_progress.json` - monthly completed counts
//! - `roster.yaml` - client roster
//! - `config.yaml` - optional settings
//!
//! Setting `TASK_TRACKER_HOME` replaces `~/.task-tracker/` entirely.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// The name of the tracker directory inside the user's home.
const TRACKER_DIR: &str = ".task-tracker";

/// Environment variable that relocates the tracker directory.
pub const HOME_ENV: &str = "TASK_TRACKER_HOME";

pub const PROGRESS_FILENAME: &str = "task_progress.json";
pub const ROSTER_FILENAME: &str = "roster.yaml";
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Returns the tracker directory, creating it if needed.
///
/// # Errors
///
/// Returns an error if:
/// - Home directory cannot be determined
/// - Directory creation fails
pub fn tracker_home_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => dirs::home_dir()
            .context("Could not determine home directory for task storage")?
            .join(TRACKER_DIR),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create tracker directory: {}", dir.display()))?;
    Ok(dir)
}

/// Returns the progress store path: `~/.task-tracker/task_progress.json`
pub fn progress_path() -> Result<PathBuf> {
    Ok(tracker_home_dir()?.join(PROGRESS_FILENAME))
}

/// Returns the roster path: `~/.task-tracker/roster.yaml`
pub fn roster_path() -> Result<PathBuf> {
    Ok(tracker_home_dir()?.join(ROSTER_FILENAME))
}

/// Returns the config path: `~/.task-tracker/config.yaml`
pub fn config_path() -> Result<PathBuf> {
    Ok(tracker_home_dir()?.join(CONFIG_FILENAME))
}

#[cfg(test)]
#[path = "tests/tracker_paths_tests.rs"]
mod tests;
