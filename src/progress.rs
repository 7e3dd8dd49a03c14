//! Month-by-month completed counts per client.
//!
//! ## Design Decisions
//!
//! - **Pure updates**: [`ProgressStore::set_count`] returns a new store and
//!   leaves the receiver untouched.
//! - **No clamping here**: the store records whatever it is given. Ceilings
//!   are applied by the aggregator on read and, optionally, by the tracker on
//!   write.
//! - **Current month only**: [`ProgressStore::set_current_count`] refuses to
//!   touch historical months. `set_count` itself has no such guard.

use crate::error::TrackerError;
use crate::month::{current_month_key, Clock, MonthKey};
use crate::roster::ClientId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The five tracked task categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TaskField {
    Videos,
    Posts,
    Visiting,
    Stories,
    Sponsorship,
}

impl TaskField {
    pub const ALL: [TaskField; 5] = [
        TaskField::Videos,
        TaskField::Posts,
        TaskField::Visiting,
        TaskField::Stories,
        TaskField::Sponsorship,
    ];

    /// Count-style fields, clamped to their quota.
    pub const COUNTS: [TaskField; 4] = [
        TaskField::Videos,
        TaskField::Posts,
        TaskField::Visiting,
        TaskField::Stories,
    ];

    /// Sponsorship is measured in currency units rather than items.
    pub fn is_currency(self) -> bool {
        matches!(self, TaskField::Sponsorship)
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskField::Videos => "Videos",
            TaskField::Posts => "Posts",
            TaskField::Visiting => "Visiting",
            TaskField::Stories => "Stories",
            TaskField::Sponsorship => "Sponsorship",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Completed counters for one client in one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressEntry {
    pub completed_posts: u64,
    pub completed_videos: u64,
    pub completed_visiting: u64,
    pub completed_stories: u64,
    /// Amount spent, not a count.
    pub completed_sponsorship: u64,
}

impl ProgressEntry {
    pub fn get(&self, field: TaskField) -> u64 {
        match field {
            TaskField::Videos => self.completed_videos,
            TaskField::Posts => self.completed_posts,
            TaskField::Visiting => self.completed_visiting,
            TaskField::Stories => self.completed_stories,
            TaskField::Sponsorship => self.completed_sponsorship,
        }
    }

    pub fn set(&mut self, field: TaskField, value: u64) {
        let slot = match field {
            TaskField::Videos => &mut self.completed_videos,
            TaskField::Posts => &mut self.completed_posts,
            TaskField::Visiting => &mut self.completed_visiting,
            TaskField::Stories => &mut self.completed_stories,
            TaskField::Sponsorship => &mut self.completed_sponsorship,
        };
        *slot = value;
    }
}

/// Entries for a single month, keyed by client.
pub type MonthEntries = BTreeMap<ClientId, ProgressEntry>;

static NO_ENTRIES: MonthEntries = BTreeMap::new();

/// Every month's progress. Serializes to
/// `{"YYYY-MM": {"<client id>": {"completedPosts": n, ...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressStore {
    months: BTreeMap<MonthKey, MonthEntries>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// The entry for `client` in `month`, zeroed when nothing was recorded.
    pub fn entry(&self, month: &MonthKey, client: ClientId) -> ProgressEntry {
        self.month_entries(month)
            .get(&client)
            .copied()
            .unwrap_or_default()
    }

    /// All entries for `month`; empty for months with no records.
    pub fn month_entries(&self, month: &MonthKey) -> &MonthEntries {
        self.months.get(month).unwrap_or(&NO_ENTRIES)
    }

    /// Returns a copy of the store with one counter replaced.
    ///
    /// The value is stored as given, even if it exceeds the client's quota.
    pub fn set_count(
        &self,
        month: &MonthKey,
        client: ClientId,
        field: TaskField,
        value: u64,
    ) -> ProgressStore {
        let mut next = self.clone();
        next.months
            .entry(month.clone())
            .or_default()
            .entry(client)
            .or_default()
            .set(field, value);
        next
    }

    /// Like [`set_count`](Self::set_count), but only for the clock's current
    /// month. Historical months are read-only.
    pub fn set_current_count(
        &self,
        clock: &dyn Clock,
        month: &MonthKey,
        client: ClientId,
        field: TaskField,
        value: u64,
    ) -> Result<ProgressStore, TrackerError> {
        let current = current_month_key(clock);
        if *month != current {
            return Err(TrackerError::ReadOnlyMonth {
                month: month.clone(),
                current,
            });
        }
        Ok(self.set_count(month, client, field, value))
    }

    /// Months with stored data plus `current`, newest first.
    pub fn months_desc(&self, current: &MonthKey) -> Vec<MonthKey> {
        let mut months: Vec<MonthKey> = self.months.keys().cloned().collect();
        if !self.months.contains_key(current) {
            months.push(current.clone());
        }
        months.sort();
        months.reverse();
        months
    }
}

#[cfg(test)]
#[path = "tests/progress_tests.rs"]
mod tests;
