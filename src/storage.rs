//! Progress store persistence.
//!
//! The whole store is one JSON document. Loading never fails: a missing file
//! is a fresh start, and an unreadable one is moved aside to
//! `task_progress.json.corrupt-<timestamp>` before an empty store is returned,
//! so the next save cannot overwrite recorded history. Saving rewrites the
//! full document through a temp file and a rename.

use crate::progress::ProgressStore;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed home of a [`ProgressStore`].
#[derive(Debug, Clone)]
pub struct ProgressRepository {
    path: PathBuf,
}

impl ProgressRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored progress, substituting an empty store on any failure.
    ///
    /// A regular file that exists but cannot be loaded is renamed out of the
    /// way first.
    pub fn load(&self) -> ProgressStore {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No progress file yet");
            return ProgressStore::new();
        }

        match self.try_load() {
            Ok(store) => store,
            Err(e) if self.path.is_file() => {
                self.quarantine(&e);
                ProgressStore::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Failed to load task progress, starting empty: {:#}",
                    e
                );
                ProgressStore::new()
            }
        }
    }

    /// Moves an unloadable progress file to a timestamped sibling and logs
    /// where it went.
    fn quarantine(&self, error: &anyhow::Error) {
        let backup = self.corrupt_path();
        match fs::rename(&self.path, &backup) {
            Ok(()) => tracing::warn!(
                path = %self.path.display(),
                backup = %backup.display(),
                "Failed to load task progress, moved it aside and starting empty: {:#}",
                error
            ),
            Err(rename_err) => tracing::warn!(
                path = %self.path.display(),
                "Failed to load task progress and could not move it aside ({}), \
                 starting empty: {:#}",
                rename_err,
                error
            ),
        }
    }

    fn corrupt_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d-%H%M%S%.3f");
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".corrupt-{}", stamp));
        PathBuf::from(name)
    }

    fn try_load(&self) -> Result<ProgressStore> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read progress file: {}", self.path.display()))?;
        serde_json::from_str(&content).context("Failed to parse progress file as JSON")
    }

    /// Writes the full store atomically.
    pub fn persist(&self, store: &ProgressStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content =
            serde_json::to_string_pretty(store).context("Failed to serialize task progress")?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, &content).with_context(|| {
            format!("Failed to write temp progress file: {}", temp_path.display())
        })?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to rename temp file to: {}", self.path.display()))?;

        tracing::debug!(
            path = %self.path.display(),
            bytes = content.len(),
            "Persisted task progress"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/storage_tests.rs"]
mod tests;
