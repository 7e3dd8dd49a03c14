//! Per-client and fleet-wide progress against quota.
//!
//! Count fields are clamped to each client's own quota before anything is
//! summed, so one over-reported client cannot inflate the fleet numbers.
//! Sponsorship spend is never clamped.

use crate::progress::{MonthEntries, TaskField};
use crate::quota::{parse_count, parse_currency};
use crate::roster::{Client, ClientId};

/// Completed amount against a total for one task field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldProgress {
    pub total: u64,
    pub completed: u64,
}

impl FieldProgress {
    /// Completion in percent; 0 when there is no quota.
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            self.completed as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Fields with a zero total are not shown.
    pub fn is_tracked(&self) -> bool {
        self.total > 0
    }

    fn accumulate(&mut self, other: FieldProgress) {
        self.total = self.total.saturating_add(other.total);
        self.completed = self.completed.saturating_add(other.completed);
    }
}

/// One [`FieldProgress`] per task field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskBreakdown {
    pub videos: FieldProgress,
    pub posts: FieldProgress,
    pub visiting: FieldProgress,
    pub stories: FieldProgress,
    pub sponsorship: FieldProgress,
}

impl TaskBreakdown {
    pub fn get(&self, field: TaskField) -> FieldProgress {
        match field {
            TaskField::Videos => self.videos,
            TaskField::Posts => self.posts,
            TaskField::Visiting => self.visiting,
            TaskField::Stories => self.stories,
            TaskField::Sponsorship => self.sponsorship,
        }
    }

    fn slot(&mut self, field: TaskField) -> &mut FieldProgress {
        match field {
            TaskField::Videos => &mut self.videos,
            TaskField::Posts => &mut self.posts,
            TaskField::Visiting => &mut self.visiting,
            TaskField::Stories => &mut self.stories,
            TaskField::Sponsorship => &mut self.sponsorship,
        }
    }

    /// True if any field has a non-zero total.
    pub fn has_tasks(&self) -> bool {
        TaskField::ALL.iter().any(|f| self.get(*f).is_tracked())
    }

    /// Tracked fields in display order.
    pub fn tracked(&self) -> impl Iterator<Item = (TaskField, FieldProgress)> + '_ {
        TaskField::ALL
            .into_iter()
            .map(move |f| (f, self.get(f)))
            .filter(|(_, p)| p.is_tracked())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSummary {
    pub client_id: ClientId,
    pub name: String,
    pub tasks: TaskBreakdown,
}

impl ClientSummary {
    pub fn has_tasks(&self) -> bool {
        self.tasks.has_tasks()
    }
}

/// Result of [`aggregate`]: clients in roster order plus the fleet totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub per_client: Vec<ClientSummary>,
    pub fleet: TaskBreakdown,
}

impl Aggregate {
    pub fn client(&self, id: ClientId) -> Option<&ClientSummary> {
        self.per_client.iter().find(|s| s.client_id == id)
    }
}

/// Quota ceiling of `field` for `client`.
pub fn ceiling(client: &Client, field: TaskField) -> u64 {
    let quota = client.tasks.quota(field);
    if field.is_currency() {
        parse_currency(quota)
    } else {
        parse_count(quota)
    }
}

/// Progress of one client in one field, given the raw stored counter.
pub fn field_progress(client: &Client, field: TaskField, stored: u64) -> FieldProgress {
    let total = ceiling(client, field);
    let completed = if field.is_currency() {
        stored
    } else {
        stored.min(total)
    };
    FieldProgress { total, completed }
}

/// Folds the roster and one month's entries into per-client and fleet
/// summaries.
pub fn aggregate(clients: &[Client], month_entries: &MonthEntries) -> Aggregate {
    let mut result = Aggregate::default();

    for client in clients {
        let entry = month_entries.get(&client.id).copied().unwrap_or_default();

        let mut tasks = TaskBreakdown::default();
        for field in TaskField::ALL {
            let progress = field_progress(client, field, entry.get(field));
            *tasks.slot(field) = progress;
            result.fleet.slot(field).accumulate(progress);
        }

        result.per_client.push(ClientSummary {
            client_id: client.id,
            name: client.name.clone(),
            tasks,
        });
    }

    result
}

#[cfg(test)]
#[path = "tests/aggregate_tests.rs"]
mod tests;
