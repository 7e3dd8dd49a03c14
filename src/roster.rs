//! Client roster: who the agency works for and what each client's monthly
//! quotas are.
//!
//! The tracker only reads quota strings from here. Editing the roster is a
//! separate concern exposed through `tasks clients ...`.

use crate::error::TrackerError;
use crate::progress::TaskField;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Built-in client list used until a roster file is written.
const SEED_ROSTER_YAML: &str = include_str!("../roster.yaml");

/// Numeric client identifier. Serialized as a bare number (or a string key
/// inside JSON maps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u32);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monthly quota text per task category, exactly as authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientTasks {
    #[serde(default)]
    pub videos: String,
    #[serde(default)]
    pub posts: String,
    #[serde(default)]
    pub visiting: String,
    #[serde(default)]
    pub stories: String,
    #[serde(default)]
    pub sponsorship: String,
}

impl ClientTasks {
    pub fn quota(&self, field: TaskField) -> &str {
        match field {
            TaskField::Videos => &self.videos,
            TaskField::Posts => &self.posts,
            TaskField::Visiting => &self.visiting,
            TaskField::Stories => &self.stories,
            TaskField::Sponsorship => &self.sponsorship,
        }
    }

    pub fn set_quota(&mut self, field: TaskField, quota: impl Into<String>) {
        let slot = match field {
            TaskField::Videos => &mut self.videos,
            TaskField::Posts => &mut self.posts,
            TaskField::Visiting => &mut self.visiting,
            TaskField::Stories => &mut self.stories,
            TaskField::Sponsorship => &mut self.sponsorship,
        };
        *slot = quota.into();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Zero means "not yet assigned"; see [`Roster::upsert`].
    pub id: ClientId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tasks: ClientTasks,
}

impl Client {
    /// A new, unsaved client with no quotas.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ClientId(0),
            name: name.into(),
            category: String::new(),
            tasks: ClientTasks::default(),
        }
    }
}

/// Ordered list of clients. Order is preserved everywhere it is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    clients: Vec<Client>,
}

impl Roster {
    pub fn new(clients: Vec<Client>) -> Self {
        Self { clients }
    }

    /// The roster shipped with the binary.
    pub fn seed() -> Result<Self> {
        serde_yaml::from_str(SEED_ROSTER_YAML).context("Failed to parse embedded roster.yaml")
    }

    /// Loads the roster file, falling back to the seed roster when the file
    /// does not exist yet. A file that exists but cannot be parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No roster file, using seed roster");
            return Self::seed();
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse roster file as YAML: {}", path.display()))
    }

    /// Writes the roster atomically (temp file, then rename).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize roster")?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp roster file: {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;
        Ok(())
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn get(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Inserts or replaces a client and returns its id.
    ///
    /// A client with id 0 is new and receives `max(existing ids) + 1`. A known
    /// id is replaced in place, keeping its roster position.
    pub fn upsert(&mut self, mut client: Client) -> Result<ClientId, TrackerError> {
        if client.name.trim().is_empty() {
            return Err(TrackerError::EmptyClientName);
        }

        if client.id == ClientId(0) {
            client.id = self.next_id();
        }

        let id = client.id;
        match self.clients.iter_mut().find(|c| c.id == id) {
            Some(existing) => *existing = client,
            None => self.clients.push(client),
        }
        Ok(id)
    }

    /// Removes a client. Stored progress for the client is left untouched.
    pub fn remove(&mut self, id: ClientId) -> Option<Client> {
        let index = self.clients.iter().position(|c| c.id == id)?;
        Some(self.clients.remove(index))
    }

    fn next_id(&self) -> ClientId {
        let max = self.clients.iter().map(|c| c.id.0).max().unwrap_or(0);
        ClientId(max.saturating_add(1))
    }
}

#[cfg(test)]
#[path = "tests/roster_tests.rs"]
mod tests;
