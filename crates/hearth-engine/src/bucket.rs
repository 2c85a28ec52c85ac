//! Grouping occurrences by calendar day for month and day views.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use crate::event::Occurrence;
use crate::interval::is_same_day;

/// Group occurrences by the calendar day they start on.
///
/// Time of day plays no part: an all-day occurrence spanning 00:00-23:59:59
/// lands on its own date only. Order within each day follows the input order.
pub fn bucket_by_day<'a>(
    occurrences: impl IntoIterator<Item = Occurrence<'a>>,
) -> BTreeMap<NaiveDate, Vec<Occurrence<'a>>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Occurrence<'a>>> = BTreeMap::new();
    for occurrence in occurrences {
        buckets.entry(occurrence.date()).or_default().push(occurrence);
    }
    buckets
}

/// The occurrences starting on `date`, in input order.
pub fn occurrences_on<'o, 'a>(
    occurrences: &'o [Occurrence<'a>],
    date: NaiveDate,
) -> impl Iterator<Item = &'o Occurrence<'a>> {
    let day_start = date.and_time(NaiveTime::MIN);
    occurrences
        .iter()
        .filter(move |occurrence| is_same_day(occurrence.start, day_start))
}
