//! Window projection -- expands a collection of base events into one sorted
//! occurrence list for a window.

use crate::event::{BaseEvent, Occurrence};
use crate::generator;
use crate::interval::TimeWindow;

/// Project `events` onto `window`.
///
/// Each event is expanded with [`generator::generate`], then only occurrences
/// whose start lies in `[window.start, window.end]` are kept. This start clamp is
/// the authoritative inclusion test: a non-recurring event that began before the
/// window is dropped even though its span overlaps it.
///
/// The result is sorted by start time. The sort is stable, so ties keep the
/// order of `events` and, within one event, series order.
///
/// Events with `end <= start` are skipped with a warning. A degenerate window
/// returns an empty list.
pub fn project<'a>(events: &'a [BaseEvent], window: &TimeWindow) -> Vec<Occurrence<'a>> {
    if window.is_degenerate() {
        tracing::debug!(
            start = %window.start,
            end = %window.end,
            "degenerate window, nothing to project"
        );
        return Vec::new();
    }

    let mut occurrences: Vec<Occurrence<'a>> = events
        .iter()
        .filter(|event| match event.validate() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    event_id = %event.id,
                    start = %event.start,
                    end = %event.end,
                    "skipping malformed event: {err}"
                );
                false
            }
        })
        .flat_map(|event| generator::generate(event, window))
        .filter(|occurrence| window.contains(occurrence.start))
        .collect();

    occurrences.sort_by_key(|occurrence| occurrence.start);

    tracing::trace!(
        events = events.len(),
        occurrences = occurrences.len(),
        "projected window"
    );

    occurrences
}
