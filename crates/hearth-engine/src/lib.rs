//! # hearth-engine
//!
//! Recurring event expansion and schedule projection for a shared family calendar.
//!
//! Given the stored base events of a family and a time window, the engine
//! produces the concrete, dated occurrences a calendar view needs, restricted to
//! what the viewer may see and laid out for month, week, or day views. Every
//! function is pure and synchronous; inputs are borrowed, never mutated, and
//! nothing is cached between calls.
//!
//! ```text
//! base events ─► generator (per event) ─► projector (merge, clamp, sort)
//!             ─► visibility (per viewer) ─► grid / bucket (per view)
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — Closed time windows and same-day tests
//! - [`event`] — Base events, occurrences, and identifiers
//! - [`recurrence`] — Recurrence rules and calendar stepping
//! - [`generator`] — One base event → its occurrences in a window
//! - [`projector`] — Many base events → one sorted occurrence list
//! - [`visibility`] — Parent/child visibility filtering
//! - [`grid`] — Percent layout on a bounded-hours time grid
//! - [`bucket`] — Day buckets for month views
//! - [`view`] — View windows and navigation
//! - [`error`] — Error types

pub mod bucket;
pub mod error;
pub mod event;
pub mod generator;
pub mod grid;
pub mod interval;
pub mod projector;
pub mod recurrence;
pub mod view;
pub mod visibility;

pub use bucket::{bucket_by_day, occurrences_on};
pub use error::EngineError;
pub use event::{BaseEvent, Category, EventId, MemberId, Occurrence, OccurrenceId};
pub use generator::{generate, MAX_INSTANCES_PER_EVENT};
pub use grid::{partition_all_day, position, GridBounds, GridPosition};
pub use interval::{is_same_day, TimeWindow};
pub use projector::project;
pub use recurrence::Recurrence;
pub use view::{CalendarView, Direction, WeekStart};
pub use visibility::{filter, Role, Viewer};
