// Layout module
// Plain-data output of a packing pass, consumed by a rendering adapter

use std::fmt;
use std::ops::Range;

use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::settings::DAYS_PER_WEEK;

/// Visual variant of one drawn piece of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentStyle {
    /// Timed single-day event: colored text, no background
    SingleTimed,
    /// All-day single-day event: filled background
    SingleFullday,
    /// Opening piece of an event that continues into the next week
    MultidayFirst,
    /// Full-week piece between the first and last weeks
    MultidayMid,
    /// Closing piece of an event that started in an earlier week
    MultidayLast,
    /// Multi-day event that fits entirely in its starting week
    MultidayFirstOnly,
}

impl SegmentStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentStyle::SingleTimed => "single-timed",
            SegmentStyle::SingleFullday => "single-fullday",
            SegmentStyle::MultidayFirst => "multiday-first",
            SegmentStyle::MultidayMid => "multiday-mid",
            SegmentStyle::MultidayLast => "multiday-last",
            SegmentStyle::MultidayFirstOnly => "multiday-first-only",
        }
    }

    pub fn is_multi_day(&self) -> bool {
        !matches!(self, SegmentStyle::SingleTimed | SegmentStyle::SingleFullday)
    }
}

impl fmt::Display for SegmentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One drawable piece of an event, confined to a single grid week.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Index of the source event in the engine's normalized pool
    pub event_index: usize,
    /// Grid cells covered, `start..end`
    pub cells: Range<usize>,
    pub row: usize,
    pub style: SegmentStyle,
    pub text: String,
    /// Fill color; `None` for timed single-day events
    pub background: Option<String>,
    pub foreground: String,
}

impl Segment {
    pub fn start_cell(&self) -> usize {
        self.cells.start
    }

    pub fn span_days(&self) -> usize {
        self.cells.len()
    }

    /// Width as a fraction of a full grid week.
    pub fn width_fraction(&self) -> f32 {
        self.span_days() as f32 / DAYS_PER_WEEK as f32
    }
}

// Written by hand so the derived widthFraction travels with the segment.
impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Segment", 9)?;
        state.serialize_field("eventIndex", &self.event_index)?;
        state.serialize_field("cells", &self.cells)?;
        state.serialize_field("row", &self.row)?;
        state.serialize_field("style", &self.style)?;
        state.serialize_field("text", &self.text)?;
        state.serialize_field("background", &self.background)?;
        state.serialize_field("foreground", &self.foreground)?;
        state.serialize_field("spanDays", &self.span_days())?;
        state.serialize_field("widthFraction", &self.width_fraction())?;
        state.end()
    }
}

/// Everything a renderer needs for one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellLayout {
    pub date: NaiveDate,
    /// "Mar 1" on the first of a month, the day number otherwise
    pub label: String,
    pub is_in_current_period: bool,
    pub is_today: bool,
    /// Segments anchored at this cell, ordered by row
    pub segments: Vec<Segment>,
    /// Events dropped here because every row was taken
    pub overflow: usize,
}

/// Layout for the whole visible grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarLayout {
    pub weekday_labels: [&'static str; DAYS_PER_WEEK],
    pub cells: Vec<CellLayout>,
}

impl CalendarLayout {
    pub fn weeks(&self) -> impl Iterator<Item = &[CellLayout]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.cells.iter().flat_map(|cell| cell.segments.iter())
    }

    pub fn total_overflow(&self) -> usize {
        self.cells.iter().map(|cell| cell.overflow).sum()
    }
}
