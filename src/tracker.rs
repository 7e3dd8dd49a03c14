//! The interactive progress flow: look up a client, change one counter in the
//! current month, persist the whole store.

use crate::aggregate::{aggregate, ceiling, Aggregate};
use crate::error::TrackerError;
use crate::month::{current_month_key, Clock, MonthKey};
use crate::progress::{ProgressEntry, ProgressStore, TaskField};
use crate::roster::{Client, ClientId, Roster};
use crate::storage::ProgressRepository;
use anyhow::Result;

/// How writes treat values above a client's quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritePolicy {
    /// Cap count fields at the quota ceiling before storing them.
    pub clamp_on_write: bool,
}

impl Default for WritePolicy {
    fn default() -> Self {
        Self {
            clamp_on_write: true,
        }
    }
}

pub struct Tracker<C: Clock> {
    store: ProgressStore,
    repository: ProgressRepository,
    roster: Roster,
    clock: C,
    policy: WritePolicy,
}

impl<C: Clock> Tracker<C> {
    /// Loads the progress store and binds it to a roster and clock.
    pub fn open(
        repository: ProgressRepository,
        roster: Roster,
        clock: C,
        policy: WritePolicy,
    ) -> Self {
        let store = repository.load();
        tracing::debug!(
            path = %repository.path().display(),
            clients = roster.clients().len(),
            "Opened task tracker"
        );
        Self {
            store,
            repository,
            roster,
            clock,
            policy,
        }
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The editable month, computed from the clock on every call.
    pub fn current_month(&self) -> MonthKey {
        current_month_key(&self.clock)
    }

    pub fn is_editable(&self, month: &MonthKey) -> bool {
        *month == self.current_month()
    }

    /// Months available for viewing, newest first, always including the
    /// current one.
    pub fn months(&self) -> Vec<MonthKey> {
        self.store.months_desc(&self.current_month())
    }

    pub fn entry(&self, month: &MonthKey, client: ClientId) -> ProgressEntry {
        self.store.entry(month, client)
    }

    pub fn summary(&self, month: &MonthKey) -> Aggregate {
        aggregate(self.roster.clients(), self.store.month_entries(month))
    }

    /// Sets a counter for the current month and persists the store.
    ///
    /// Returns the value actually stored, which may be lower than `value` for
    /// count fields when clamping on write is enabled.
    pub fn set(&mut self, client: ClientId, field: TaskField, value: u64) -> Result<u64> {
        let stored = {
            let client = self.client(client)?;
            if self.policy.clamp_on_write && !field.is_currency() {
                value.min(ceiling(client, field))
            } else {
                value
            }
        };
        self.write(client, field, stored)
    }

    /// Moves a counter by `delta`, the way the +/- buttons do.
    ///
    /// Count fields start from the displayed (clamped) value and stay within
    /// `0..=quota`. Sponsorship only stays non-negative.
    pub fn adjust(&mut self, client: ClientId, field: TaskField, delta: i64) -> Result<u64> {
        let month = self.current_month();
        let stored = self.store.entry(&month, client).get(field);

        let next = {
            let client = self.client(client)?;
            if field.is_currency() {
                offset(stored, delta)
            } else {
                let total = ceiling(client, field);
                offset(stored.min(total), delta).min(total)
            }
        };
        self.write(client, field, next)
    }

    fn client(&self, id: ClientId) -> Result<&Client, TrackerError> {
        self.roster.get(id).ok_or(TrackerError::UnknownClient(id))
    }

    fn write(&mut self, client: ClientId, field: TaskField, value: u64) -> Result<u64> {
        let month = self.current_month();
        let next = self
            .store
            .set_current_count(&self.clock, &month, client, field, value)?;
        self.repository.persist(&next)?;
        self.store = next;

        tracing::info!(%month, %client, %field, value, "Recorded progress");
        Ok(value)
    }
}

fn offset(value: u64, delta: i64) -> u64 {
    if delta.is_negative() {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta.unsigned_abs())
    }
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;
