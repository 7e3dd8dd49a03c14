//! Error types for the task tracker domain.

use crate::month::MonthKey;
use crate::roster::ClientId;

/// Errors raised by domain operations that callers are expected to handle.
///
/// Quota parsing and store loading never produce these: both degrade to zero
/// or empty values instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// A month key that is not of the form `YYYY-MM`.
    #[error("invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),

    /// A write aimed at a month other than the current one.
    #[error("month {month} is read-only; only {current} can be edited")]
    ReadOnlyMonth { month: MonthKey, current: MonthKey },

    /// A client id that is not in the roster.
    #[error("unknown client id {0}")]
    UnknownClient(ClientId),

    /// A client record without a usable name.
    #[error("client name must not be empty")]
    EmptyClientName,
}
