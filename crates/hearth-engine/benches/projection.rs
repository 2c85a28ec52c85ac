//! Projection throughput for a busy family month.

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use hearth_engine::view::{fetch_window, visible_days};
use hearth_engine::{
    bucket_by_day, filter, position, project, BaseEvent, CalendarView, GridBounds, Recurrence,
    Viewer, WeekStart,
};
use std::hint::black_box;

const MEMBERS: [&str; 4] = ["mom", "dad", "ava", "ben"];

fn family_events() -> Vec<BaseEvent> {
    let origin = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(7, 0, 0)
        .unwrap();
    let rules = [
        Recurrence::None,
        Recurrence::Daily,
        Recurrence::Weekly,
        Recurrence::Biweekly,
        Recurrence::Monthly,
    ];

    (0..200)
        .map(|i: i64| {
            let start = origin + Duration::hours(i * 13);
            BaseEvent::new(
                format!("event-{i}"),
                format!("Event {i}"),
                start,
                start + Duration::minutes(30 + (i % 4) * 30),
            )
            .with_recurrence(rules[i as usize % rules.len()].clone())
            .assigned_to([MEMBERS[i as usize % MEMBERS.len()]])
        })
        .collect()
}

fn bench_projection(c: &mut Criterion) {
    let events = family_events();
    let focus = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
    let window = fetch_window(focus, WeekStart::Sunday);
    let viewer = Viewer::child("ava");
    let bounds = GridBounds::week_view();

    c.bench_function("project_fetch_window", |b| {
        b.iter(|| project(black_box(&events), black_box(&window)))
    });

    c.bench_function("month_view_pipeline", |b| {
        b.iter(|| {
            let visible = filter(project(&events, &window), &viewer);
            let days = visible_days(CalendarView::Month, focus, WeekStart::Sunday);
            let buckets = bucket_by_day(visible);
            black_box((days.len(), buckets.len()))
        })
    });

    c.bench_function("week_grid_positions", |b| {
        let projected = project(&events, &window);
        b.iter(|| {
            projected
                .iter()
                .filter_map(|o| position(o, &bounds))
                .count()
        })
    });
}

criterion_group!(benches, bench_projection);
criterion_main!(benches);
