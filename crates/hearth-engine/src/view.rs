//! Calendar view windows and navigation.
//!
//! Maps a view (month, week, day) and a focus date to the days it displays, the
//! window those days cover, and the neighbouring focus date. Weeks start on
//! Sunday unless told otherwise.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::interval::TimeWindow;

/// The three calendar layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Day,
}

/// First day of a displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

/// First day of the week containing `date`.
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    date.week(week_start.weekday()).first_day()
}

/// Last day of the week containing `date`.
pub fn end_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    date.week(week_start.weekday()).last_day()
}

fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Every day `view` displays for focus `date`, in order.
///
/// Month view pads to whole weeks on both sides, so it always returns a multiple
/// of seven days.
pub fn visible_days(view: CalendarView, date: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    let (first, last) = match view {
        CalendarView::Month => (
            start_of_week(start_of_month(date), week_start),
            end_of_week(end_of_month(date), week_start),
        ),
        CalendarView::Week => (
            start_of_week(date, week_start),
            end_of_week(date, week_start),
        ),
        CalendarView::Day => (date, date),
    };
    first.iter_days().take_while(|day| *day <= last).collect()
}

/// The window covering every day `view` displays for `date`.
pub fn view_window(view: CalendarView, date: NaiveDate, week_start: WeekStart) -> TimeWindow {
    let days = visible_days(view, date, week_start);
    match (days.first(), days.last()) {
        (Some(first), Some(last)) => TimeWindow::days(*first, *last),
        _ => TimeWindow::day(date),
    }
}

/// The window to load events for while the calendar is focused on `date`.
///
/// Runs from the start of the week containing the 1st of `date`'s month to the
/// end of the week containing the last day of the following month, so paging
/// forward one month or switching views does not need a new load.
pub fn fetch_window(date: NaiveDate, week_start: WeekStart) -> TimeWindow {
    let first = start_of_week(start_of_month(date), week_start);
    let next_month = end_of_month(date)
        .checked_add_months(Months::new(1))
        .unwrap_or(date);
    let last = end_of_week(end_of_month(next_month), week_start);
    TimeWindow::days(first, last)
}

/// The window for a single day.
pub fn day_window(date: NaiveDate) -> TimeWindow {
    TimeWindow::day(date)
}

/// The focus date one page before or after `date` in `view`.
///
/// Month paging clamps to the last day of shorter months. Returns `date`
/// unchanged if the move leaves chrono's supported range.
pub fn navigate(view: CalendarView, date: NaiveDate, direction: Direction) -> NaiveDate {
    let moved = match (view, direction) {
        (CalendarView::Month, Direction::Next) => date.checked_add_months(Months::new(1)),
        (CalendarView::Month, Direction::Previous) => date.checked_sub_months(Months::new(1)),
        (CalendarView::Week, Direction::Next) => date.checked_add_days(Days::new(7)),
        (CalendarView::Week, Direction::Previous) => date.checked_sub_days(Days::new(7)),
        (CalendarView::Day, Direction::Next) => date.succ_opt(),
        (CalendarView::Day, Direction::Previous) => date.pred_opt(),
    };
    moved.unwrap_or(date)
}
