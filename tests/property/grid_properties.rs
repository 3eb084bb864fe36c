// Property-based tests for grid calculation and row packing
// Random reference dates, week starts and event pools

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use simple_calendar::models::settings::{GRID_SIZE, ROW_CAPACITY_PER_DAY};
use simple_calendar::services::grid::{compute_first_visible_date, compute_visible_dates};
use simple_calendar::services::packing::{PackingOptions, RowPacker};
use simple_calendar::{GridMode, NormalizedEvent, SegmentStyle};

fn reference_date() -> impl Strategy<Value = NaiveDate> {
    (1990..2100i32, 1..=12u32, 1..=28u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn mode() -> impl Strategy<Value = GridMode> {
    prop_oneof![Just(GridMode::Monthly), Just(GridMode::SixWeeks)]
}

/// (start cell offset, size in days, full day) relative to the grid start
fn raw_events() -> impl Strategy<Value = Vec<(i64, usize, bool)>> {
    prop::collection::vec((-5..45i64, 1..30usize, any::<bool>()), 0..40)
}

fn to_events(grid_start: NaiveDate, raw: &[(i64, usize, bool)]) -> Vec<NormalizedEvent> {
    raw.iter()
        .enumerate()
        .map(|(n, &(offset, size, full_day))| {
            let start_date = grid_start + Duration::days(offset);
            NormalizedEvent {
                start_date,
                end_date: start_date + Duration::days(size as i64 - 1),
                size_in_days: size,
                start_time_label: "08:00".to_string(),
                title: format!("event {}", n),
                full_day,
                color: "#808080".to_string(),
            }
        })
        .collect()
}

proptest! {
    /// Property: the grid is always 42 strictly consecutive dates
    #[test]
    fn prop_grid_is_42_consecutive_dates(
        date in reference_date(),
        mode in mode(),
        start_of_week in 0..=6u8,
    ) {
        let first = compute_first_visible_date(date, mode, start_of_week).unwrap();
        let grid = compute_visible_dates(first).unwrap();

        prop_assert_eq!(grid.dates().len(), GRID_SIZE);
        for pair in grid.dates().windows(2) {
            prop_assert_eq!((pair[1] - pair[0]).num_days(), 1);
        }
    }

    /// Property: the grid starts on the configured weekday, at most 6 days
    /// before the anchor, and the anchor is visible in the first row
    #[test]
    fn prop_grid_starts_on_week_start(
        date in reference_date(),
        mode in mode(),
        start_of_week in 0..=6u8,
    ) {
        let first = compute_first_visible_date(date, mode, start_of_week).unwrap();
        let anchor = match mode {
            GridMode::Monthly => date.with_day(1).unwrap(),
            GridMode::SixWeeks => date,
        };

        prop_assert_eq!(first.weekday().num_days_from_sunday() as u8, start_of_week);
        let lead = (anchor - first).num_days();
        prop_assert!((0..7).contains(&lead));
    }

    /// Property: each placed event's segments tile exactly its clipped span
    /// on one row, one piece per grid week
    #[test]
    fn prop_segments_cover_clipped_span(raw in raw_events()) {
        let grid_start = NaiveDate::from_ymd_opt(2024, 2, 25).unwrap();
        let grid = compute_visible_dates(grid_start).unwrap();
        let events = to_events(grid_start, &raw);
        let layout = RowPacker::new(&grid, PackingOptions::default()).pack(&events);

        for (index, &(offset, size, _)) in raw.iter().enumerate() {
            let mut pieces: Vec<_> = layout
                .segments
                .iter()
                .filter(|s| s.event_index == index)
                .collect();
            if pieces.is_empty() {
                continue;
            }
            pieces.sort_by_key(|s| s.cells.start);

            prop_assert!(offset >= 0);
            let start = offset as usize;
            let end = (start + size).min(GRID_SIZE);
            prop_assert_eq!(pieces[0].cells.start, start);
            prop_assert_eq!(pieces[pieces.len() - 1].cells.end, end);

            let row = pieces[0].row;
            for pair in pieces.windows(2) {
                prop_assert_eq!(pair[0].cells.end, pair[1].cells.start);
            }
            for piece in &pieces {
                prop_assert_eq!(piece.row, row);
                prop_assert!(piece.cells.start / 7 == (piece.cells.end - 1) / 7);
                if size == 1 {
                    prop_assert!(!piece.style.is_multi_day());
                } else {
                    prop_assert!(piece.style.is_multi_day());
                }
            }
            if size > 1 && start + size <= GRID_SIZE {
                let last = pieces[pieces.len() - 1];
                let single_week = pieces.len() == 1 && size <= 7 - start % 7;
                let expected = if single_week {
                    SegmentStyle::MultidayFirstOnly
                } else {
                    SegmentStyle::MultidayLast
                };
                prop_assert_eq!(last.style, expected);
            }
        }
    }

    /// Property: no (cell, row) pair is drawn twice and every drop is counted
    #[test]
    fn prop_no_collisions_and_overflow_accounted(raw in raw_events()) {
        let grid_start = NaiveDate::from_ymd_opt(2024, 2, 25).unwrap();
        let grid = compute_visible_dates(grid_start).unwrap();
        let events = to_events(grid_start, &raw);
        let layout = RowPacker::new(&grid, PackingOptions::default()).pack(&events);

        let mut taken = HashSet::new();
        for segment in &layout.segments {
            prop_assert!(segment.row < ROW_CAPACITY_PER_DAY);
            for cell in segment.cells.clone() {
                prop_assert!(taken.insert((cell, segment.row)));
            }
        }

        let in_grid = raw.iter().filter(|(offset, _, _)| (0..42).contains(offset)).count();
        let placed: HashSet<usize> = layout.segments.iter().map(|s| s.event_index).collect();
        let dropped: usize = layout.overflow.iter().sum();
        prop_assert_eq!(placed.len() + dropped, in_grid);
    }
}
