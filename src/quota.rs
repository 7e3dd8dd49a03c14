//! Quota parsing.
//!
//! Quotas are authored by hand per client and arrive as free text: a plain
//! number ("12"), a range ("2-3"), "N/A", an empty string, or for sponsorship
//! an amount wrapped in currency text ("200$", "400 دۆلار"). Anything that
//! cannot be read resolves to a ceiling of zero, never to an error.

use regex::Regex;
use std::sync::OnceLock;

/// A parsed quota that keeps "nothing specified" apart from an explicit zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quota {
    /// A readable amount (possibly zero).
    Amount(u64),
    /// Empty, "N/A", or text without a readable number.
    Unspecified,
}

impl Quota {
    /// Parses a count-style quota (videos, posts, visiting, stories).
    pub fn count(quota: &str) -> Self {
        if is_not_applicable(quota) {
            return Quota::Unspecified;
        }
        if leading_int(quota).is_none() {
            return Quota::Unspecified;
        }

        if quota.contains('-') {
            return quota
                .split('-')
                .filter_map(|part| leading_int(part.trim()))
                .max()
                .map_or(Quota::Unspecified, |n| Quota::Amount(clamp_non_negative(n)));
        }

        leading_int(quota).map_or(Quota::Unspecified, |n| Quota::Amount(clamp_non_negative(n)))
    }

    /// Parses a currency-style quota (sponsorship): the first run of digits wins.
    pub fn currency(quota: &str) -> Self {
        if is_not_applicable(quota) {
            return Quota::Unspecified;
        }
        digit_run()
            .find(quota)
            .map_or(Quota::Unspecified, |m| Quota::Amount(saturating_digits(m.as_str())))
    }

    /// The numeric ceiling; unspecified quotas count as zero.
    pub fn ceiling(self) -> u64 {
        match self {
            Quota::Amount(n) => n,
            Quota::Unspecified => 0,
        }
    }

    pub fn is_specified(self) -> bool {
        matches!(self, Quota::Amount(_))
    }
}

/// Ceiling of a count-style quota. See [`Quota::count`].
pub fn parse_count(quota: &str) -> u64 {
    Quota::count(quota).ceiling()
}

/// Ceiling of a currency-style quota. See [`Quota::currency`].
pub fn parse_currency(quota: &str) -> u64 {
    Quota::currency(quota).ceiling()
}

fn is_not_applicable(quota: &str) -> bool {
    quota.is_empty() || quota.eq_ignore_ascii_case("n/a")
}

fn digit_run() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only; `\d` would also match Arabic-Indic numerals.
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("static regex is valid"))
}

/// Reads an integer prefix: leading whitespace, an optional sign, then ASCII
/// digits. Trailing text is ignored, so "2 motion" reads as 2.
fn leading_int(text: &str) -> Option<i128> {
    let rest = text.trim_start();
    let (negative, rest) = match rest.chars().next() {
        Some('-') => (true, rest.trim_start_matches('-')),
        Some('+') => (false, rest.trim_start_matches('+')),
        _ => (false, rest),
    };
    // Only one sign character is allowed.
    if text.trim_start().len() - rest.len() > 1 {
        return None;
    }

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = i128::from(saturating_digits(&digits));
    Some(if negative { -magnitude } else { magnitude })
}

fn saturating_digits(digits: &str) -> u64 {
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

fn clamp_non_negative(n: i128) -> u64 {
    u64::try_from(n.max(0)).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "tests/quota_tests.rs"]
mod tests;
