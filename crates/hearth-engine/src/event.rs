//! Calendar data model: stored base events and the occurrences derived from them.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::interval;
use crate::recurrence::Recurrence;

/// Opaque identifier of a stored event.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

/// Opaque identifier of a family member.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(EventId);
string_id!(MemberId);

/// A family-defined event category. Shared between events, never copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// CSS color, e.g. `"#f97316"`.
    pub color: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A stored event as created or edited by a parent. Possibly recurring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseEvent {
    pub id: EventId,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub category: Option<Arc<Category>>,
    #[serde(default)]
    pub assigned_member_ids: BTreeSet<MemberId>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl BaseEvent {
    /// A timed, non-recurring, unassigned event.
    pub fn new(
        id: impl Into<EventId>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            is_all_day: false,
            recurrence: Recurrence::None,
            category: None,
            assigned_member_ids: BTreeSet::new(),
            location: None,
            description: None,
        }
    }

    /// An all-day event spanning 00:00:00-23:59:59 on `date`.
    pub fn all_day(id: impl Into<EventId>, title: impl Into<String>, date: NaiveDate) -> Self {
        let window = interval::TimeWindow::day(date);
        Self {
            is_all_day: true,
            ..Self::new(id, title, window.start, window.end)
        }
    }

    pub fn with_recurrence(mut self, recurrence: impl Into<Recurrence>) -> Self {
        self.recurrence = recurrence.into();
        self
    }

    pub fn with_category(mut self, category: Arc<Category>) -> Self {
        self.category = Some(category);
        self
    }

    pub fn assigned_to<I, M>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MemberId>,
    {
        self.assigned_member_ids
            .extend(members.into_iter().map(Into::into));
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    pub fn is_assigned_to(&self, member: &MemberId) -> bool {
        self.assigned_member_ids.contains(member)
    }

    /// Check the span invariant `end > start`.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidSpan`] when the event ends at or before its start.
    pub fn validate(&self) -> Result<()> {
        if self.end <= self.start {
            return Err(EngineError::InvalidSpan {
                event_id: self.id.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Identity of one occurrence: its base event plus the instance's position in
/// the series, counted from the series start (not from the window start).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OccurrenceId {
    pub event_id: EventId,
    pub sequence_index: u32,
}

impl OccurrenceId {
    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }
}

impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.event_id, self.sequence_index)
    }
}

/// One concrete, dated instance of a base event.
///
/// Display fields are read through the borrowed base event; only the instance
/// times differ.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence<'a> {
    pub id: OccurrenceId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(rename = "event")]
    base: &'a BaseEvent,
}

impl<'a> Occurrence<'a> {
    pub(crate) fn new(base: &'a BaseEvent, sequence_index: u32, start: NaiveDateTime) -> Self {
        Self {
            id: OccurrenceId {
                event_id: base.id.clone(),
                sequence_index,
            },
            start,
            end: start + base.duration(),
            base,
        }
    }

    /// The stored event this occurrence was expanded from. Edit and delete act on it.
    pub fn base(&self) -> &'a BaseEvent {
        self.base
    }

    pub fn title(&self) -> &'a str {
        &self.base.title
    }

    pub fn is_all_day(&self) -> bool {
        self.base.is_all_day
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Calendar day this occurrence is shown on (the day it starts).
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}
