//! Occurrence generation -- expands one base event into its dated instances
//! within a window.
//!
//! Recurring series are walked from their original start. The walk stops at the
//! first instance starting after the window, or after
//! [`MAX_INSTANCES_PER_EVENT`] steps, whichever comes first. The step budget
//! counts instances before the window too, so a series that began long ago may
//! produce nothing for a far-future window. That truncation is intentional and
//! not an error.

use crate::event::{BaseEvent, Occurrence};
use crate::interval::TimeWindow;
use crate::recurrence::Recurrence;

/// Upper bound on recurrence steps walked for one event in one call.
pub const MAX_INSTANCES_PER_EVENT: u32 = 100;

/// Expand `event` into the occurrences that fall in `window`.
///
/// - A non-recurring event yields itself (sequence index 0) when its span
///   overlaps the window.
/// - A recurring event yields every instance whose start lies in
///   `[window.start, window.end]`, each lasting exactly as long as the base event.
/// - A degenerate window (`start > end`) yields nothing.
///
/// The base event is only borrowed; every call returns a fresh vector.
pub fn generate<'a>(event: &'a BaseEvent, window: &TimeWindow) -> Vec<Occurrence<'a>> {
    if window.is_degenerate() {
        return Vec::new();
    }

    if !event.is_recurring() {
        return if window.overlaps(event.start, event.end) {
            vec![Occurrence::new(event, 0, event.start)]
        } else {
            Vec::new()
        };
    }

    if let Recurrence::Unrecognized(rule) = &event.recurrence {
        tracing::warn!(
            event_id = %event.id,
            rule = %rule,
            "unrecognized recurrence rule, stepping weekly"
        );
    }

    let mut occurrences = Vec::new();
    for index in 0..MAX_INSTANCES_PER_EVENT {
        let Some(start) = event.recurrence.nth_start(event.start, index) else {
            break;
        };
        if start > window.end {
            break;
        }
        if start >= window.start {
            occurrences.push(Occurrence::new(event, index, start));
        }
    }

    occurrences
}
