//! Visible date grid calculation.
//!
//! The grid is always 42 consecutive dates (six rows of seven). Its first
//! date is the start of the week that contains the anchor date, where the
//! anchor is the first of the reference month (`monthly`) or the reference
//! date itself (`6weeks`).

use chrono::{Datelike, NaiveDate};

use crate::error::{CalendarError, CalendarResult};
use crate::models::settings::{validate_start_of_week, GridMode, DAYS_PER_WEEK, GRID_SIZE};
use crate::utils::date::{add_days, month_name_short, weekday_index};

const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["S", "M", "T", "W", "T", "F", "S"];

/// The 42 dates currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleDateGrid {
    dates: Vec<NaiveDate>,
}

impl VisibleDateGrid {
    pub fn first(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.dates[GRID_SIZE - 1]
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn get(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied()
    }

    /// Cell index of `date`, or `None` when it falls outside the grid.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.first()).num_days();
        usize::try_from(offset).ok().filter(|idx| *idx < GRID_SIZE)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index_of(date).is_some()
    }
}

/// Compute the first date shown for `reference_date`.
pub fn compute_first_visible_date(
    reference_date: NaiveDate,
    mode: GridMode,
    start_of_week: u8,
) -> CalendarResult<NaiveDate> {
    validate_start_of_week(start_of_week)?;

    let anchor = match mode {
        GridMode::Monthly => reference_date.with_day(1).ok_or_else(|| {
            CalendarError::configuration(format!("no first day for {}", reference_date))
        })?,
        GridMode::SixWeeks => reference_date,
    };

    let offset = (i64::from(weekday_index(anchor)) - i64::from(start_of_week) + 7) % 7;
    add_days(anchor, -offset).ok_or_else(|| {
        CalendarError::configuration(format!("grid start before {} is out of range", anchor))
    })
}

/// Build the 42 consecutive dates beginning at `first_visible_date`.
pub fn compute_visible_dates(first_visible_date: NaiveDate) -> CalendarResult<VisibleDateGrid> {
    let dates = first_visible_date
        .iter_days()
        .take(GRID_SIZE)
        .collect::<Vec<_>>();

    if dates.len() != GRID_SIZE {
        return Err(CalendarError::configuration(format!(
            "grid starting at {} runs past the supported calendar range",
            first_visible_date
        )));
    }

    Ok(VisibleDateGrid { dates })
}

/// Single-letter weekday headers rotated so the grid's first column leads.
pub fn weekday_labels(start_of_week: u8) -> [&'static str; DAYS_PER_WEEK] {
    let start = usize::from(start_of_week % 7);
    std::array::from_fn(|i| WEEKDAY_NAMES[(start + i) % DAYS_PER_WEEK])
}

/// Day-number label; the first of each month also names the month.
pub fn day_label(date: NaiveDate) -> String {
    if date.day() == 1 {
        format!("{} {}", month_name_short(date), date.day())
    } else {
        date.day().to_string()
    }
}
