//! Monthly task-progress tracking for agency clients.
//!
//! Quotas are free text per client; completed counts are recorded per month
//! and compared against the parsed quotas:
//!
//! - [`quota`] turns quota text into ceilings
//! - [`progress`] holds completed counts, month by month
//! - [`storage`] loads and saves the progress store as JSON
//! - [`aggregate`] folds everything into per-client and fleet summaries
//! - [`tracker`] is the edit flow used by the `tasks` binary

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod month;
pub mod progress;
pub mod quota;
pub mod report;
pub mod roster;
pub mod storage;
pub mod tracker;
pub mod tracker_paths;

pub use error::TrackerError;
