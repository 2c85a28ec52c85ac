//! Recurrence rules and calendar stepping.
//!
//! A stored event carries its rule as a short lowercase name. Known names map to
//! the variants below; anything else is kept verbatim in
//! [`Recurrence::Unrecognized`] and steps weekly so the calendar stays populated.
//!
//! Every instance is computed from the series origin (`origin + n * step`), never
//! from the previous instance. For monthly series this means a Jan 31 origin
//! yields Jan 31, Feb 28 (or 29), Mar 31, Apr 30: each month clamps to its own
//! last day and the series does not drift.

use std::fmt;

use chrono::{Duration, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// How a base event repeats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recurrence {
    /// A single, non-repeating event.
    #[default]
    None,
    Daily,
    Weekly,
    Biweekly,
    /// Same day of month; clamped to the month's last day when it is shorter.
    Monthly,
    /// A rule name this engine does not know. Steps weekly.
    Unrecognized(String),
}

/// The distance between two consecutive instances of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Days(i64),
    Months(u32),
}

impl Recurrence {
    /// Parse a stored rule name. Matching ignores case and surrounding whitespace;
    /// an empty string or `"none"` means no recurrence.
    pub fn parse(rule: &str) -> Self {
        match rule.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Recurrence::None,
            "daily" => Recurrence::Daily,
            "weekly" => Recurrence::Weekly,
            "biweekly" => Recurrence::Biweekly,
            "monthly" => Recurrence::Monthly,
            _ => Recurrence::Unrecognized(rule.trim().to_string()),
        }
    }

    /// Build from the storage shape: an `is_recurring` flag plus an optional rule.
    ///
    /// The rule is ignored unless the flag is set, and a set flag without a rule
    /// is treated as non-recurring.
    pub fn from_row(is_recurring: bool, rule: Option<&str>) -> Self {
        match (is_recurring, rule) {
            (true, Some(rule)) => Self::parse(rule),
            _ => Recurrence::None,
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Biweekly => "biweekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Unrecognized(rule) => rule,
        }
    }

    /// The step between instances, or `None` for a non-recurring event.
    pub fn step(&self) -> Option<Step> {
        match self {
            Recurrence::None => None,
            Recurrence::Daily => Some(Step::Days(1)),
            Recurrence::Weekly => Some(Step::Days(7)),
            Recurrence::Biweekly => Some(Step::Days(14)),
            Recurrence::Monthly => Some(Step::Months(1)),
            Recurrence::Unrecognized(_) => Some(Step::Days(7)),
        }
    }

    /// Start of the `n`-th instance (0-based) of a series beginning at `origin`.
    ///
    /// Returns `None` when the date leaves chrono's representable range, or for
    /// `n > 0` on a non-recurring event.
    pub fn nth_start(&self, origin: NaiveDateTime, n: u32) -> Option<NaiveDateTime> {
        match self.step() {
            None if n == 0 => Some(origin),
            None => None,
            Some(Step::Days(days)) => {
                origin.checked_add_signed(Duration::try_days(days * i64::from(n))?)
            }
            Some(Step::Months(months)) => {
                origin.checked_add_months(Months::new(months.checked_mul(n)?))
            }
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Recurrence {
    fn from(rule: String) -> Self {
        Self::parse(&rule)
    }
}

impl From<&str> for Recurrence {
    fn from(rule: &str) -> Self {
        Self::parse(rule)
    }
}

impl From<Recurrence> for String {
    fn from(recurrence: Recurrence) -> Self {
        recurrence.as_str().to_string()
    }
}
