//! Tests for projecting many base events onto one window.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use hearth_engine::{project, BaseEvent, TimeWindow};
use tracing_test::traced_test;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn event(id: &str, start: NaiveDateTime, minutes: i64, rule: &str) -> BaseEvent {
    BaseEvent::new(id, id, start, start + Duration::minutes(minutes)).with_recurrence(rule)
}

fn ids(occurrences: &[hearth_engine::Occurrence<'_>]) -> Vec<String> {
    occurrences.iter().map(|o| o.id.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Merging and ordering
// ---------------------------------------------------------------------------

#[test]
fn merges_series_and_singles_sorted_by_start() {
    let events = vec![
        event("swim", dt(2024, 1, 2, 16, 0), 60, "weekly"),
        event("dentist", dt(2024, 1, 5, 10, 0), 30, "none"),
        event("school", dt(2024, 1, 1, 8, 0), 420, "daily"),
    ];
    let window = TimeWindow::days(date(2024, 1, 1), date(2024, 1, 7));

    let result = project(&events, &window);

    assert_eq!(result.len(), 7 + 1 + 1);
    for pair in result.windows(2) {
        assert!(pair[0].start <= pair[1].start, "not sorted: {pair:?}");
    }
    assert_eq!(result[0].id.to_string(), "school#0");
    assert_eq!(result[1].id.to_string(), "school#1");
    assert_eq!(result[2].id.to_string(), "swim#0");
}

#[test]
fn equal_starts_keep_input_order() {
    let events = vec![
        event("b", dt(2024, 1, 1, 9, 0), 30, "none"),
        event("a", dt(2024, 1, 1, 9, 0), 60, "none"),
        event("c", dt(2024, 1, 1, 9, 0), 15, "daily"),
    ];
    let window = TimeWindow::day(date(2024, 1, 1));

    let result = project(&events, &window);

    assert_eq!(ids(&result), vec!["b#0", "a#0", "c#0"]);
}

#[test]
fn projection_is_deterministic() {
    let events = vec![
        event("x", dt(2024, 1, 3, 9, 0), 45, "biweekly"),
        event("y", dt(2024, 1, 3, 9, 0), 45, "monthly"),
        event("z", dt(2024, 1, 1, 12, 0), 45, "weekly"),
    ];
    let window = TimeWindow::days(date(2024, 1, 1), date(2024, 6, 30));

    assert_eq!(project(&events, &window), project(&events, &window));
}

#[test]
fn input_events_are_not_modified() {
    let events = vec![event("x", dt(2024, 1, 3, 9, 0), 45, "daily")];
    let snapshot = events.clone();
    let window = TimeWindow::days(date(2024, 1, 1), date(2024, 1, 31));

    let _ = project(&events, &window);

    assert_eq!(events, snapshot);
}

// ---------------------------------------------------------------------------
// Window clamp
// ---------------------------------------------------------------------------

#[test]
fn event_starting_before_window_is_dropped() {
    // Overlaps the window but starts before it: the start clamp wins.
    let events = vec![BaseEvent::new(
        "camp",
        "Camp",
        dt(2024, 1, 30, 9, 0),
        dt(2024, 2, 3, 17, 0),
    )];
    let window = TimeWindow::days(date(2024, 2, 1), date(2024, 2, 29));

    assert!(project(&events, &window).is_empty());
}

#[test]
fn every_start_lies_within_window() {
    let events = vec![
        event("a", dt(2023, 12, 28, 23, 0), 180, "daily"),
        event("b", dt(2024, 1, 31, 23, 30), 120, "none"),
    ];
    let window = TimeWindow::days(date(2024, 1, 1), date(2024, 1, 31));

    let result = project(&events, &window);

    assert_eq!(result.len(), 31 + 1);
    assert!(result.iter().all(|o| window.contains(o.start)));
}

#[test]
fn non_recurring_outside_window_projects_nothing() {
    let events = vec![event("trip", dt(2024, 8, 1, 9, 0), 60, "none")];
    let window = TimeWindow::days(date(2024, 1, 1), date(2024, 1, 31));

    assert!(project(&events, &window).is_empty());
}

#[test]
fn degenerate_window_projects_nothing() {
    let events = vec![event("x", dt(2024, 1, 3, 9, 0), 45, "daily")];
    let window = TimeWindow::new(dt(2024, 2, 1, 0, 0), dt(2024, 1, 1, 0, 0));

    assert!(project(&events, &window).is_empty());
}

#[test]
fn empty_input_projects_nothing() {
    let window = TimeWindow::days(date(2024, 1, 1), date(2024, 1, 31));
    assert!(project(&[], &window).is_empty());
}

// ---------------------------------------------------------------------------
// Malformed events
// ---------------------------------------------------------------------------

#[traced_test]
#[test]
fn malformed_event_is_skipped_with_warning() {
    let events = vec![
        event("good", dt(2024, 1, 2, 9, 0), 60, "none"),
        BaseEvent::new("backwards", "Backwards", dt(2024, 1, 3, 10, 0), dt(2024, 1, 3, 9, 0)),
        BaseEvent::new("zero", "Zero", dt(2024, 1, 4, 10, 0), dt(2024, 1, 4, 10, 0)),
        event("also-good", dt(2024, 1, 5, 9, 0), 60, "none"),
    ];
    let window = TimeWindow::days(date(2024, 1, 1), date(2024, 1, 31));

    let result = project(&events, &window);

    assert_eq!(ids(&result), vec!["good#0", "also-good#0"]);
    assert!(logs_contain("skipping malformed event"));
    assert!(logs_contain("backwards"));
}

// ---------------------------------------------------------------------------
// Duration preservation
// ---------------------------------------------------------------------------

#[test]
fn occurrences_keep_base_duration() {
    let events = vec![
        event("short", dt(2024, 1, 1, 9, 0), 15, "daily"),
        event("long", dt(2024, 1, 31, 20, 0), 600, "monthly"),
    ];
    let window = TimeWindow::days(date(2024, 1, 1), date(2024, 12, 31));

    for occurrence in project(&events, &window) {
        assert_eq!(occurrence.duration(), occurrence.base().duration());
    }
}
