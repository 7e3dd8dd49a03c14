//! Reporting-period keys and the clock they are derived from.

use crate::error::TrackerError;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month in `YYYY-MM` form.
///
/// The textual form is zero-padded, so ordering the strings orders the months.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, TrackerError> {
        if !(0..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(TrackerError::InvalidMonth(format!("{}-{}", year, month)));
        }
        Ok(Self(format!("{:04}-{:02}", year, month)))
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!("{:04}-{:02}", date.year(), date.month()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn year(&self) -> i32 {
        self.parts().0
    }

    pub fn month(&self) -> u32 {
        self.parts().1
    }

    /// Human-readable label, e.g. "January 2024".
    pub fn display_name(&self) -> String {
        let (year, month) = self.parts();
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.0.clone())
    }

    fn parts(&self) -> (i32, u32) {
        // Validated on construction, so both halves always parse.
        let mut split = self.0.splitn(2, '-');
        let year = split.next().and_then(|y| y.parse().ok()).unwrap_or(0);
        let month = split.next().and_then(|m| m.parse().ok()).unwrap_or(1);
        (year, month)
    }
}

impl FromStr for MonthKey {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TrackerError::InvalidMonth(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let well_formed = year.len() == 4
            && month.len() == 2
            && year.chars().all(|c| c.is_ascii_digit())
            && month.chars().all(|c| c.is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthKey {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of "today" for everything that depends on the current month.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Pins the clock to the given day, or `None` if the date does not exist.
    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// The month that is editable right now. Re-read on every mutation.
pub fn current_month_key(clock: &dyn Clock) -> MonthKey {
    MonthKey::from_date(clock.today())
}

#[cfg(test)]
#[path = "tests/month_tests.rs"]
mod tests;
