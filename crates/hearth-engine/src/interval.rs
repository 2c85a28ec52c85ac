//! Interval math -- closed time windows and calendar-day equality.
//!
//! Windows are closed on both ends: an instant equal to `start` or `end` is
//! inside. A window whose `start` is after its `end` is degenerate and contains
//! nothing.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// A closed `[start, end]` range of local timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// The window covering one calendar day, 00:00:00 through 23:59:59.
    pub fn day(date: NaiveDate) -> Self {
        Self::days(date, date)
    }

    /// The window from the start of `first` to the last second of `last`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: end_of_day(last),
        }
    }

    /// True when `start > end`. Such a window contains no instant.
    pub fn is_degenerate(&self) -> bool {
        self.start > self.end
    }

    /// Inclusive containment: `start <= t <= end`.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }

    /// Whether the span `[start, end]` touches this window at any instant.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        !self.is_degenerate() && start <= self.end && end >= self.start
    }
}

/// True when both timestamps fall on the same calendar day, ignoring time of day.
pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// The last whole second of `date` (23:59:59).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::seconds(86_399)
}

/// Fractional hour of day (`hour + minute / 60`); seconds are ignored.
pub fn hour_of_day(t: NaiveDateTime) -> f64 {
    f64::from(t.hour()) + f64::from(t.minute()) / 60.0
}
