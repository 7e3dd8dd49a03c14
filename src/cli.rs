use crate::month::MonthKey;
use crate::progress::TaskField;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TASK_TRACKER_GIT_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "tasks")]
#[command(about = "Monthly client task progress tracker")]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config.yaml (defaults to ~/.task-tracker/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show per-client and overall progress for a month
    Status {
        /// Month to show (YYYY-MM); defaults to the current month
        #[arg(long)]
        month: Option<MonthKey>,

        /// Only show this client
        #[arg(long)]
        client: Option<u32>,
    },

    /// Set a completed count for the current month
    Set {
        client: u32,
        #[arg(value_enum)]
        field: TaskField,
        value: u64,
    },

    /// Add to (or subtract from) a completed count for the current month
    Add {
        client: u32,
        #[arg(value_enum)]
        field: TaskField,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// List months that have recorded progress
    Months,

    /// Print the month summary message for sharing
    Report {
        /// Month to report (YYYY-MM); defaults to the current month
        #[arg(long)]
        month: Option<MonthKey>,
    },

    /// Manage the client roster
    #[command(subcommand)]
    Clients(ClientsCommand),
}

#[derive(Subcommand, Debug)]
pub enum ClientsCommand {
    /// List clients and their quotas
    List,

    /// Add a new client
    Add {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: ClientFields,
    },

    /// Edit an existing client
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ClientFields,
    },

    /// Remove a client (recorded progress is kept)
    Remove { id: u32 },
}

/// Optional client attributes shared by `clients add` and `clients update`.
#[derive(Args, Debug, Default)]
pub struct ClientFields {
    #[arg(long)]
    pub category: Option<String>,
    /// Videos quota, e.g. "4" or "2-3"
    #[arg(long)]
    pub videos: Option<String>,
    /// Posts quota
    #[arg(long)]
    pub posts: Option<String>,
    /// Visiting quota
    #[arg(long)]
    pub visiting: Option<String>,
    /// Stories quota
    #[arg(long)]
    pub stories: Option<String>,
    /// Sponsorship budget, e.g. "200$"
    #[arg(long)]
    pub sponsorship: Option<String>,
}

impl ClientFields {
    /// Quota overrides paired with their field, skipping unset ones.
    pub fn quotas(&self) -> impl Iterator<Item = (TaskField, &str)> + '_ {
        [
            (TaskField::Videos, &self.videos),
            (TaskField::Posts, &self.posts),
            (TaskField::Visiting, &self.visiting),
            (TaskField::Stories, &self.stories),
            (TaskField::Sponsorship, &self.sponsorship),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
