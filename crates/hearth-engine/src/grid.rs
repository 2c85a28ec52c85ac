//! Vertical layout of timed occurrences on a bounded-hours day/week grid.
//!
//! The grid covers `[start_hour, end_hour)` of each day. An occurrence maps to a
//! `top` offset and a `height`, both in percent of the grid. Occurrences that
//! begin before the grid are pinned to the top edge rather than hidden, and short
//! occurrences are floored at a minimum visible height so they stay clickable.
//!
//! All-day occurrences are never positioned; split them off with
//! [`partition_all_day`] and render them in a separate strip.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::event::Occurrence;
use crate::interval::hour_of_day;

/// Hour range and minimum block height of a time grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGridBounds")]
pub struct GridBounds {
    start_hour: u32,
    end_hour: u32,
    min_visible_percent: f64,
}

#[derive(Deserialize)]
struct RawGridBounds {
    start_hour: u32,
    end_hour: u32,
    min_visible_percent: f64,
}

impl TryFrom<RawGridBounds> for GridBounds {
    type Error = EngineError;

    fn try_from(raw: RawGridBounds) -> Result<Self> {
        GridBounds::new(raw.start_hour, raw.end_hour, raw.min_visible_percent)
    }
}

impl GridBounds {
    /// # Errors
    /// [`EngineError::InvalidGridBounds`] unless `start_hour < end_hour <= 24`;
    /// [`EngineError::InvalidMinimumHeight`] unless the floor is within `[0, 100]`.
    pub fn new(start_hour: u32, end_hour: u32, min_visible_percent: f64) -> Result<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(EngineError::InvalidGridBounds {
                start_hour,
                end_hour,
            });
        }
        if !(0.0..=100.0).contains(&min_visible_percent) {
            return Err(EngineError::InvalidMinimumHeight(min_visible_percent));
        }
        Ok(Self {
            start_hour,
            end_hour,
            min_visible_percent,
        })
    }

    /// Day view: 6 AM to 10 PM, 6% floor.
    pub fn day_view() -> Self {
        Self {
            start_hour: 6,
            end_hour: 22,
            min_visible_percent: 6.0,
        }
    }

    /// Week view: 6 AM to 10 PM, 4% floor (narrower columns, more stacking).
    pub fn week_view() -> Self {
        Self {
            start_hour: 6,
            end_hour: 22,
            min_visible_percent: 4.0,
        }
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn min_visible_percent(&self) -> f64 {
        self.min_visible_percent
    }

    pub fn span_hours(&self) -> u32 {
        self.end_hour - self.start_hour
    }

    /// The hour labels drawn down the side of the grid.
    pub fn hours(&self) -> impl Iterator<Item = u32> {
        self.start_hour..self.end_hour
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::day_view()
    }
}

/// Where a timed occurrence sits on the grid, in percent of the grid height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPosition {
    pub top_percent: f64,
    pub height_percent: f64,
}

/// Lay out `occurrence` on a grid with the given bounds.
///
/// Returns `None` for all-day occurrences.
///
/// `top = clamp((start - grid_start) / span * 100, 0, 100)` and
/// `height = min(100 - top, max((end - start) / span * 100, floor))`, with start
/// and end measured as fractional hours of their own day. An occurrence ending
/// after midnight therefore gets the floor height.
pub fn position(occurrence: &Occurrence<'_>, bounds: &GridBounds) -> Option<GridPosition> {
    if occurrence.is_all_day() {
        return None;
    }

    let span = f64::from(bounds.span_hours());
    let start_hour = hour_of_day(occurrence.start);
    let end_hour = hour_of_day(occurrence.end);

    let top_percent =
        ((start_hour - f64::from(bounds.start_hour)) / span * 100.0).clamp(0.0, 100.0);
    let raw_height = (end_hour - start_hour) / span * 100.0;
    let height_percent = raw_height
        .max(bounds.min_visible_percent)
        .min(100.0 - top_percent);

    Some(GridPosition {
        top_percent,
        height_percent,
    })
}

/// Split occurrences into `(all_day, timed)`, preserving order in both.
pub fn partition_all_day<'a>(
    occurrences: impl IntoIterator<Item = Occurrence<'a>>,
) -> (Vec<Occurrence<'a>>, Vec<Occurrence<'a>>) {
    occurrences
        .into_iter()
        .partition(|occurrence| occurrence.is_all_day())
}
