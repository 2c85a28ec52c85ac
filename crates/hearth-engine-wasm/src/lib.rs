//! WASM bindings for hearth-engine.
//!
//! Exposes projection, visibility filtering, grid layout, day bucketing, and
//! view windows to the browser calendar via `wasm-bindgen`. All complex types
//! are passed as JSON strings.
//!
//! Events are accepted in the storage row shape (`start_time`, `is_recurring`,
//! `recurrence_rule`, `assignments: [{member_id}]`, ...). Timestamps may be RFC 3339
//! (converted into the family's timezone) or naive local time
//! (`"2024-01-01T09:00:00"`). Output timestamps are RFC 3339 in that timezone.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p hearth-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/hearth-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/hearth_engine_wasm.wasm
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use hearth_engine::view::{self, CalendarView, Direction, WeekStart};
use hearth_engine::{
    BaseEvent, Category, GridBounds, MemberId, Occurrence, OccurrenceId, Recurrence, TimeWindow,
    Viewer,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Input format for events passed from JavaScript (one storage row).
#[derive(Deserialize)]
struct EventInput {
    id: String,
    title: String,
    start_time: String,
    end_time: String,
    #[serde(default)]
    is_all_day: bool,
    #[serde(default)]
    is_recurring: bool,
    #[serde(default)]
    recurrence_rule: Option<String>,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    assignments: Vec<AssignmentInput>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct AssignmentInput {
    member_id: String,
}

#[derive(Serialize)]
struct OccurrenceDto {
    occurrence_id: OccurrenceId,
    title: String,
    start: String,
    end: String,
    is_all_day: bool,
    recurrence_rule: String,
    category: Option<Category>,
    assigned_member_ids: Vec<String>,
    location: Option<String>,
    description: Option<String>,
}

#[derive(Serialize)]
struct PositionedDto {
    #[serde(flatten)]
    occurrence: OccurrenceDto,
    top_percent: f64,
    height_percent: f64,
}

#[derive(Serialize)]
struct DayLayoutDto {
    all_day: Vec<OccurrenceDto>,
    timed: Vec<PositionedDto>,
}

#[derive(Serialize)]
struct DayBucketDto {
    date: String,
    occurrences: Vec<OccurrenceDto>,
}

#[derive(Serialize)]
struct WindowDto {
    start: String,
    end: String,
}

// ---------------------------------------------------------------------------
// Helpers: parsing and formatting across the boundary
// ---------------------------------------------------------------------------

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

/// Resolve an optional IANA timezone name, defaulting to UTC.
fn parse_timezone(timezone: Option<&str>) -> Result<Tz, JsValue> {
    match timezone {
        None => Ok(Tz::UTC),
        Some(name) => name
            .parse()
            .map_err(|_| JsValue::from_str(&format!("Invalid timezone: {}", name))),
    }
}

/// Parse an ISO 8601 datetime string into a local `NaiveDateTime` in `tz`.
///
/// RFC 3339 strings carrying an offset are converted into `tz`; naive strings are
/// taken as already local.
fn parse_datetime(s: &str, tz: Tz) -> Result<NaiveDateTime, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&tz).naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| js_error(&format!("Invalid datetime '{}'", s), e))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| js_error(&format!("Invalid date '{}'", s), e))
}

/// Format a local timestamp as RFC 3339 in `tz`. Local times skipped by a DST
/// gap fall back to the naive form.
fn format_datetime(local: NaiveDateTime, tz: Tz) -> String {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| local.format("%Y-%m-%dT%H:%M:%S").to_string())
}

fn parse_json<'de, T: Deserialize<'de>>(json: &'de str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| js_error(&format!("Invalid {} JSON", what), e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error("Serialization error", e))
}

/// Convert a JSON array of event rows into base events.
fn parse_events_json(json: &str, tz: Tz) -> Result<Vec<BaseEvent>, JsValue> {
    let inputs: Vec<EventInput> = parse_json(json, "events")?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_datetime(&input.start_time, tz)?;
            let end = parse_datetime(&input.end_time, tz)?;
            Ok(BaseEvent {
                id: input.id.into(),
                title: input.title,
                start,
                end,
                is_all_day: input.is_all_day,
                recurrence: Recurrence::from_row(
                    input.is_recurring,
                    input.recurrence_rule.as_deref(),
                ),
                category: input.category.map(Arc::new),
                assigned_member_ids: input
                    .assignments
                    .into_iter()
                    .map(|a| MemberId::new(a.member_id))
                    .collect(),
                location: input.location,
                description: input.description,
            })
        })
        .collect()
}

fn parse_viewer(json: &str) -> Result<Viewer, JsValue> {
    parse_json(json, "viewer")
}

fn parse_week_start(week_start: Option<&str>) -> Result<WeekStart, JsValue> {
    match week_start {
        None | Some("sunday") => Ok(WeekStart::Sunday),
        Some("monday") => Ok(WeekStart::Monday),
        Some(other) => Err(JsValue::from_str(&format!("Invalid week start: {}", other))),
    }
}

fn parse_view(view: &str) -> Result<CalendarView, JsValue> {
    match view {
        "month" => Ok(CalendarView::Month),
        "week" => Ok(CalendarView::Week),
        "day" => Ok(CalendarView::Day),
        other => Err(JsValue::from_str(&format!("Invalid view: {}", other))),
    }
}

fn occurrence_dto(occurrence: &Occurrence<'_>, tz: Tz) -> OccurrenceDto {
    let base = occurrence.base();
    OccurrenceDto {
        occurrence_id: occurrence.id.clone(),
        title: base.title.clone(),
        start: format_datetime(occurrence.start, tz),
        end: format_datetime(occurrence.end, tz),
        is_all_day: base.is_all_day,
        recurrence_rule: base.recurrence.to_string(),
        category: base.category.as_deref().cloned(),
        assigned_member_ids: base
            .assigned_member_ids
            .iter()
            .map(ToString::to_string)
            .collect(),
        location: base.location.clone(),
        description: base.description.clone(),
    }
}

fn window_dto(window: &TimeWindow, tz: Tz) -> WindowDto {
    WindowDto {
        start: format_datetime(window.start, tz),
        end: format_datetime(window.end, tz),
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Expand event rows into the occurrences starting within a window.
///
/// `events_json` is a JSON array of event rows; `window_start` and `window_end`
/// are ISO 8601 datetimes. Returns a JSON array of occurrence objects sorted by
/// start. Malformed rows (end not after start) are skipped.
#[wasm_bindgen(js_name = "projectEvents")]
pub fn project_events(
    events_json: &str,
    window_start: &str,
    window_end: &str,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    let tz = parse_timezone(timezone.as_deref())?;
    let events = parse_events_json(events_json, tz)?;
    let window = TimeWindow::new(
        parse_datetime(window_start, tz)?,
        parse_datetime(window_end, tz)?,
    );

    let dtos: Vec<OccurrenceDto> = hearth_engine::project(&events, &window)
        .iter()
        .map(|o| occurrence_dto(o, tz))
        .collect();

    to_json(&dtos)
}

/// Like [`project_events`], restricted to what `viewer_json` (`{role, member_id}`)
/// may see.
#[wasm_bindgen(js_name = "projectForViewer")]
pub fn project_for_viewer(
    events_json: &str,
    viewer_json: &str,
    window_start: &str,
    window_end: &str,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    let tz = parse_timezone(timezone.as_deref())?;
    let events = parse_events_json(events_json, tz)?;
    let viewer = parse_viewer(viewer_json)?;
    let window = TimeWindow::new(
        parse_datetime(window_start, tz)?,
        parse_datetime(window_end, tz)?,
    );

    let visible = hearth_engine::filter(hearth_engine::project(&events, &window), &viewer);
    let dtos: Vec<OccurrenceDto> = visible.iter().map(|o| occurrence_dto(o, tz)).collect();

    to_json(&dtos)
}

/// Lay out one day for a day or week column.
///
/// Returns `{all_day: [...], timed: [...]}` where each timed entry carries
/// `top_percent` and `height_percent`. `grid_json` is an optional
/// `{start_hour, end_hour, min_visible_percent}`; the day-view preset is used
/// when absent.
#[wasm_bindgen(js_name = "layoutDay")]
pub fn layout_day(
    events_json: &str,
    viewer_json: &str,
    date: &str,
    grid_json: Option<String>,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    let tz = parse_timezone(timezone.as_deref())?;
    let events = parse_events_json(events_json, tz)?;
    let viewer = parse_viewer(viewer_json)?;
    let date = parse_date(date)?;
    let bounds: GridBounds = match grid_json.as_deref() {
        Some(json) => parse_json(json, "grid")?,
        None => GridBounds::day_view(),
    };

    let visible = hearth_engine::filter(
        hearth_engine::project(&events, &view::day_window(date)),
        &viewer,
    );
    let (all_day, timed) = hearth_engine::partition_all_day(visible);

    let layout = DayLayoutDto {
        all_day: all_day.iter().map(|o| occurrence_dto(o, tz)).collect(),
        timed: timed
            .iter()
            .filter_map(|o| {
                let pos = hearth_engine::position(o, &bounds)?;
                Some(PositionedDto {
                    occurrence: occurrence_dto(o, tz),
                    top_percent: pos.top_percent,
                    height_percent: pos.height_percent,
                })
            })
            .collect(),
    };

    to_json(&layout)
}

/// Group visible occurrences by day for the month grid around `date`.
///
/// Returns a JSON array with one `{date, occurrences}` entry per displayed day,
/// including padding days from adjacent months and days with no occurrences.
#[wasm_bindgen(js_name = "bucketMonth")]
pub fn bucket_month(
    events_json: &str,
    viewer_json: &str,
    date: &str,
    week_start: Option<String>,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    let tz = parse_timezone(timezone.as_deref())?;
    let events = parse_events_json(events_json, tz)?;
    let viewer = parse_viewer(viewer_json)?;
    let date = parse_date(date)?;
    let week_start = parse_week_start(week_start.as_deref())?;

    let window = view::view_window(CalendarView::Month, date, week_start);
    let visible = hearth_engine::filter(hearth_engine::project(&events, &window), &viewer);
    let mut buckets: BTreeMap<NaiveDate, Vec<Occurrence<'_>>> =
        hearth_engine::bucket_by_day(visible);

    let dtos: Vec<DayBucketDto> = view::visible_days(CalendarView::Month, date, week_start)
        .into_iter()
        .map(|day| DayBucketDto {
            date: day.format("%Y-%m-%d").to_string(),
            occurrences: buckets
                .remove(&day)
                .unwrap_or_default()
                .iter()
                .map(|o| occurrence_dto(o, tz))
                .collect(),
        })
        .collect();

    to_json(&dtos)
}

/// The `{start, end}` window covered by `view_name` (`"month"`, `"week"`, `"day"`)
/// around `date`.
#[wasm_bindgen(js_name = "viewWindow")]
pub fn view_window(
    view_name: &str,
    date: &str,
    week_start: Option<String>,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    let tz = parse_timezone(timezone.as_deref())?;
    let window = view::view_window(
        parse_view(view_name)?,
        parse_date(date)?,
        parse_week_start(week_start.as_deref())?,
    );
    to_json(&window_dto(&window, tz))
}

/// The `{start, end}` window to load events for while focused on `date`.
#[wasm_bindgen(js_name = "fetchWindow")]
pub fn fetch_window(
    date: &str,
    week_start: Option<String>,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    let tz = parse_timezone(timezone.as_deref())?;
    let window = view::fetch_window(parse_date(date)?, parse_week_start(week_start.as_deref())?);
    to_json(&window_dto(&window, tz))
}

/// The focus date (`YYYY-MM-DD`) one page before or after `date` in `view_name`.
/// `direction` is `"previous"` or `"next"`.
#[wasm_bindgen(js_name = "navigate")]
pub fn navigate(view_name: &str, date: &str, direction: &str) -> Result<String, JsValue> {
    let direction = match direction {
        "previous" => Direction::Previous,
        "next" => Direction::Next,
        other => return Err(JsValue::from_str(&format!("Invalid direction: {}", other))),
    };
    let moved = view::navigate(parse_view(view_name)?, parse_date(date)?, direction);
    Ok(moved.format("%Y-%m-%d").to_string())
}
