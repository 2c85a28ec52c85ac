//! Error types for hearth-engine operations.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::event::EventId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid span for event {event_id}: end {end} is not after start {start}")]
    InvalidSpan {
        event_id: EventId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Invalid grid bounds: {start_hour}:00-{end_hour}:00")]
    InvalidGridBounds { start_hour: u32, end_hour: u32 },

    #[error("Invalid minimum visible height: {0}%")]
    InvalidMinimumHeight(f64),
}

pub type Result<T> = std::result::Result<T, EngineError>;
