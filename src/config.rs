use crate::report::DEFAULT_HEADING;
use crate::tracker_paths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from `config.yaml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    /// Cap count fields at the client's quota when they are written.
    /// Default: true
    #[serde(default = "default_clamp_on_write")]
    pub clamp_on_write: bool,
    /// Progress store location. Default: `~/.task-tracker/task_progress.json`
    #[serde(default)]
    pub progress_file: Option<PathBuf>,
    /// Roster location. Default: `~/.task-tracker/roster.yaml`
    #[serde(default)]
    pub roster_file: Option<PathBuf>,
    /// First line of the share message, before the month name.
    #[serde(default = "default_report_heading")]
    pub report_heading: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            clamp_on_write: default_clamp_on_write(),
            progress_file: None,
            roster_file: None,
            report_heading: default_report_heading(),
        }
    }
}

fn default_clamp_on_write() -> bool {
    true
}

fn default_report_heading() -> String {
    DEFAULT_HEADING.to_string()
}

impl TrackerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file as YAML: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, else `~/.task-tracker/config.yaml` if it exists,
    /// else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = tracker_paths::config_path()?;
        if default_path.exists() {
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn progress_path(&self) -> Result<PathBuf> {
        match &self.progress_file {
            Some(path) => Ok(path.clone()),
            None => tracker_paths::progress_path(),
        }
    }

    pub fn roster_path(&self) -> Result<PathBuf> {
        match &self.roster_file {
            Some(path) => Ok(path.clone()),
            None => tracker_paths::roster_path(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.report_heading.trim().is_empty() {
            anyhow::bail!("report_heading must not be empty");
        }
        for (name, path) in [
            ("progress_file", &self.progress_file),
            ("roster_file", &self.roster_file),
        ] {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                anyhow::bail!("{} must not be an empty path", name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
