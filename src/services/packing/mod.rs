//! Row packing of events onto the visible grid.
//!
//! Every event is placed once, at its start cell, on the lowest row that is
//! free there. A multi-day event then keeps that row for every cell it
//! covers and is drawn as one segment per grid week it touches:
//!
//! ```text
//!   week 1:  . . . [first.....]     (or first-only when it ends this week)
//!   week 2:  [mid.............]     (one per full week in between)
//!   week 3:  [last.....] . . .
//! ```
//!
//! Events are visited in a stable order (start date, then input order) so
//! that row assignment is reproducible. Events starting outside the grid
//! are never placed; events running past its end are clipped.

use std::ops::{Range, RangeInclusive};

use crate::models::event::NormalizedEvent;
use crate::models::layout::{Segment, SegmentStyle};
use crate::models::settings::{OverflowPolicy, DAYS_PER_WEEK, GRID_SIZE, ROW_CAPACITY_PER_DAY};
use crate::services::contrast::pick_foreground_or_default;
use crate::services::grid::VisibleDateGrid;

/// Which rows are taken on each grid cell during one packing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOccupancy {
    slots: [[bool; ROW_CAPACITY_PER_DAY]; GRID_SIZE],
}

impl Default for RowOccupancy {
    fn default() -> Self {
        Self::new()
    }
}

impl RowOccupancy {
    pub fn new() -> Self {
        Self {
            slots: [[false; ROW_CAPACITY_PER_DAY]; GRID_SIZE],
        }
    }

    pub fn is_occupied(&self, cell: usize, row: usize) -> bool {
        self.slots
            .get(cell)
            .and_then(|rows| rows.get(row))
            .copied()
            .unwrap_or(false)
    }

    /// Lowest free row on `cell`, if any.
    pub fn first_free_row(&self, cell: usize) -> Option<usize> {
        self.slots.get(cell)?.iter().position(|taken| !taken)
    }

    pub fn occupied_rows(&self, cell: usize) -> usize {
        self.slots
            .get(cell)
            .map_or(0, |rows| rows.iter().filter(|taken| **taken).count())
    }

    fn occupy(&mut self, cells: RangeInclusive<usize>, row: usize) {
        for cell in cells {
            self.slots[cell][row] = true;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackingOptions {
    pub show_event_time: bool,
    pub overflow_policy: OverflowPolicy,
}

impl Default for PackingOptions {
    fn default() -> Self {
        Self {
            show_event_time: true,
            overflow_policy: OverflowPolicy::Count,
        }
    }
}

/// Result of one packing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedLayout {
    pub occupancy: RowOccupancy,
    /// Segments in processing order, each event's pieces in date order
    pub segments: Vec<Segment>,
    /// Events dropped per cell for lack of a free row
    pub overflow: [usize; GRID_SIZE],
}

/// Indices of `events` in the order they are placed.
pub fn processing_order(events: &[NormalizedEvent]) -> Vec<usize> {
    let mut order = (0..events.len()).collect::<Vec<_>>();
    // sort_by_key is stable, so equal start dates keep input order
    order.sort_by_key(|&idx| events[idx].start_date);
    order
}

/// Colors and text shared by every segment of one event.
struct EventPaint {
    text: String,
    background: Option<String>,
    foreground: String,
}

impl EventPaint {
    fn for_event(event: &NormalizedEvent, show_event_time: bool) -> Self {
        let text = event.display_text(show_event_time);
        if event.is_multi_day() || event.full_day {
            Self {
                text,
                background: Some(event.color.clone()),
                foreground: pick_foreground_or_default(&event.color).to_string(),
            }
        } else {
            // Timed single-day events draw the event color as text only.
            Self {
                text,
                background: None,
                foreground: event.color.clone(),
            }
        }
    }
}

pub struct RowPacker<'a> {
    grid: &'a VisibleDateGrid,
    options: PackingOptions,
}

impl<'a> RowPacker<'a> {
    pub fn new(grid: &'a VisibleDateGrid, options: PackingOptions) -> Self {
        Self { grid, options }
    }

    pub fn pack(&self, events: &[NormalizedEvent]) -> PackedLayout {
        let mut occupancy = RowOccupancy::new();
        let mut segments = Vec::new();
        let mut overflow = [0usize; GRID_SIZE];

        for event_index in processing_order(events) {
            let event = &events[event_index];
            let Some(cell) = self.grid.index_of(event.start_date) else {
                continue;
            };

            let Some(row) = occupancy.first_free_row(cell) else {
                log::debug!(
                    "No free row on {} for \"{}\"; dropping",
                    event.start_date,
                    event.title
                );
                if self.options.overflow_policy == OverflowPolicy::Count {
                    overflow[cell] += 1;
                }
                continue;
            };

            let paint = EventPaint::for_event(event, self.options.show_event_time);
            let mut emit = |cells: Range<usize>, style: SegmentStyle| {
                segments.push(Segment {
                    event_index,
                    cells,
                    row,
                    style,
                    text: paint.text.clone(),
                    background: paint.background.clone(),
                    foreground: paint.foreground.clone(),
                });
            };

            let last_cell = if event.is_multi_day() {
                place_multi_day(cell, event.size_in_days, &mut emit)
            } else {
                let style = if event.full_day {
                    SegmentStyle::SingleFullday
                } else {
                    SegmentStyle::SingleTimed
                };
                emit(cell..cell + 1, style);
                cell
            };

            occupancy.occupy(cell..=last_cell, row);
        }

        PackedLayout {
            occupancy,
            segments,
            overflow,
        }
    }
}

/// Emit the week pieces of a multi-day event starting at `cell` and
/// return the last grid cell it covers.
fn place_multi_day<F>(cell: usize, size_in_days: usize, emit: &mut F) -> usize
where
    F: FnMut(Range<usize>, SegmentStyle),
{
    let remaining_in_week = DAYS_PER_WEEK - cell % DAYS_PER_WEEK;
    let unclipped_last = cell + size_in_days - 1;
    let last_cell = unclipped_last.min(GRID_SIZE - 1);
    let ends_in_grid = unclipped_last == last_cell;
    let closing_style = if ends_in_grid {
        SegmentStyle::MultidayLast
    } else {
        SegmentStyle::MultidayMid
    };

    let visible_days = last_cell - cell + 1;
    let first_week_size = visible_days.min(remaining_in_week);
    let last_week_size = (visible_days - first_week_size) % DAYS_PER_WEEK;

    let first_style = if size_in_days <= remaining_in_week {
        SegmentStyle::MultidayFirstOnly
    } else {
        SegmentStyle::MultidayFirst
    };
    emit(cell..cell + first_week_size, first_style);

    // Full weeks between the first and the partial last week.
    let last_week_start = last_cell + 1 - last_week_size;
    let mut week_start = cell + first_week_size;
    while week_start < last_week_start {
        let week_end = week_start + DAYS_PER_WEEK;
        let style = if last_week_size == 0 && week_end == last_week_start {
            closing_style
        } else {
            SegmentStyle::MultidayMid
        };
        emit(week_start..week_end, style);
        week_start = week_end;
    }

    if last_week_size > 0 {
        emit(last_week_start..last_cell + 1, closing_style);
    }

    last_cell
}
