//! Tests for grouping occurrences by calendar day.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use hearth_engine::{bucket_by_day, occurrences_on, project, BaseEvent, TimeWindow};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn dt(d: u32, h: u32) -> NaiveDateTime {
    date(d).and_hms_opt(h, 0, 0).unwrap()
}

fn march() -> TimeWindow {
    TimeWindow::days(date(1), date(31))
}

#[test]
fn groups_by_start_day() {
    let events = vec![
        BaseEvent::new("walk", "Walk the dog", dt(1, 7), dt(1, 8)).with_recurrence("daily"),
        BaseEvent::new("game", "Game night", dt(8, 19), dt(8, 22)).with_recurrence("weekly"),
    ];
    let projected = project(&events, &march());

    let buckets = bucket_by_day(projected);

    assert_eq!(buckets.len(), 31);
    assert_eq!(buckets[&date(8)].len(), 2);
    assert_eq!(buckets[&date(9)].len(), 1);
    assert_eq!(buckets[&date(29)].len(), 2);
}

#[test]
fn late_night_event_stays_on_start_day() {
    let events = vec![BaseEvent::new(
        "party",
        "New year party",
        dt(31, 21),
        dt(31, 21) + Duration::hours(5),
    )];

    let buckets = bucket_by_day(project(&events, &march()));

    assert_eq!(buckets.keys().copied().collect::<Vec<_>>(), vec![date(31)]);
}

#[test]
fn days_without_occurrences_are_absent() {
    let events = vec![BaseEvent::new("x", "X", dt(4, 9), dt(4, 10))];

    let buckets = bucket_by_day(project(&events, &march()));

    assert!(buckets.get(&date(5)).is_none());
}

#[test]
fn bucket_keeps_input_order_within_day() {
    let events = vec![
        BaseEvent::new("late", "Late", dt(6, 18), dt(6, 19)),
        BaseEvent::new("early", "Early", dt(6, 8), dt(6, 9)),
    ];

    let buckets = bucket_by_day(project(&events, &march()));
    let titles: Vec<&str> = buckets[&date(6)].iter().map(|o| o.title()).collect();

    assert_eq!(titles, vec!["Early", "Late"], "projection already sorted them");
}

#[test]
fn occurrences_on_selects_one_day() {
    let events = vec![
        BaseEvent::new("walk", "Walk the dog", dt(1, 7), dt(1, 8)).with_recurrence("daily"),
        BaseEvent::all_day("fair", "School fair", date(12)),
    ];
    let projected = project(&events, &march());

    let on_twelfth: Vec<&str> = occurrences_on(&projected, date(12))
        .map(|o| o.title())
        .collect();

    assert_eq!(on_twelfth, vec!["School fair", "Walk the dog"]);
    assert_eq!(occurrences_on(&projected, date(13)).count(), 1);
}
