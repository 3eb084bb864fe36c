//! Calendar engine: owns the grid, the event pool and the last layout.
//!
//! Every mutation runs the full pipeline (grid, packing, cell assembly)
//! and swaps the new state in only once all of it succeeded, so a failed
//! call leaves the previous layout untouched.

use chrono::{Local, NaiveDate, TimeZone};

use crate::error::{CalendarError, CalendarResult};
use crate::models::event::{EventRecord, NormalizedEvent};
use crate::models::layout::{CalendarLayout, CellLayout, Segment};
use crate::models::settings::{CalendarConfig, DAYS_PER_WEEK, GRID_SIZE};
use crate::services::contrast::pick_foreground;
use crate::services::grid::{
    compute_first_visible_date, compute_visible_dates, day_label, weekday_labels,
    VisibleDateGrid,
};
use crate::services::normalizer::EventNormalizer;
use crate::services::packing::{PackedLayout, PackingOptions, RowOccupancy, RowPacker};
use crate::services::time_format::PatternFormatter;
use crate::utils::date::{add_days, is_same_month};

/// Source of "today" for the engine.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// An event left out of the pool, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEvent {
    /// Position in the payload passed to `replace_event_pool`
    pub index: usize,
    pub title: String,
    pub error: CalendarError,
}

/// Outcome of replacing the event pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolReport {
    pub accepted: usize,
    pub rejected: Vec<RejectedEvent>,
}

impl PoolReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub struct CalendarEngine<C = SystemClock, Tz = Local> {
    config: CalendarConfig,
    clock: C,
    normalizer: EventNormalizer<PatternFormatter, Tz>,
    today: NaiveDate,
    reference_date: NaiveDate,
    first_visible_date: NaiveDate,
    grid: VisibleDateGrid,
    events: Vec<NormalizedEvent>,
    occupancy: RowOccupancy,
    layout: CalendarLayout,
}

impl CalendarEngine<SystemClock, Local> {
    /// Build an engine on the system clock and local time zone.
    pub fn new(config: CalendarConfig) -> CalendarResult<Self> {
        Self::with_clock(config, SystemClock, Local)
    }
}

impl<C: Clock, Tz: TimeZone> CalendarEngine<C, Tz> {
    /// Build an engine with an injected clock and time zone.
    ///
    /// Fails with [`CalendarError::Configuration`] on invalid settings.
    pub fn with_clock(config: CalendarConfig, clock: C, tz: Tz) -> CalendarResult<Self> {
        config.validate()?;

        let today = clock.today();
        let first_visible_date = compute_first_visible_date(today, config.mode, config.start_of_week)?;
        let grid = compute_visible_dates(first_visible_date)?;
        let normalizer =
            EventNormalizer::with_timezone(PatternFormatter::new(config.time_format.clone()), tz);

        let options = packing_options(&config);
        let packed = RowPacker::new(&grid, options).pack(&[]);
        let layout = build_layout(&config, &grid, today, today, &packed);

        log::info!(
            "Calendar engine ready: mode {}, week starts on {}, grid {} to {}",
            config.mode,
            config.start_of_week,
            grid.first(),
            grid.last()
        );

        Ok(Self {
            config,
            clock,
            normalizer,
            today,
            reference_date: today,
            first_visible_date,
            grid,
            events: Vec::new(),
            occupancy: packed.occupancy,
            layout,
        })
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn first_visible_date(&self) -> NaiveDate {
        self.first_visible_date
    }

    pub fn grid(&self) -> &VisibleDateGrid {
        &self.grid
    }

    pub fn events(&self) -> &[NormalizedEvent] {
        &self.events
    }

    pub fn occupancy(&self) -> &RowOccupancy {
        &self.occupancy
    }

    pub fn layout(&self) -> &CalendarLayout {
        &self.layout
    }

    /// Re-anchor the grid on `date`.
    pub fn set_reference_date(&mut self, date: NaiveDate) -> CalendarResult<()> {
        let first =
            compute_first_visible_date(date, self.config.mode, self.config.start_of_week)?;
        self.recompute(date, first)?;
        log::debug!("Reference date set to {}", date);
        Ok(())
    }

    /// Re-anchor the grid on the clock's current date.
    pub fn reset_to_today(&mut self) -> CalendarResult<()> {
        self.today = self.clock.today();
        self.set_reference_date(self.today)
    }

    /// Periodic refresh: pick up a new "today" without moving the grid.
    pub fn refresh(&mut self) -> CalendarResult<()> {
        self.today = self.clock.today();
        self.recompute(self.today, self.first_visible_date)
    }

    /// Replace the event pool with a new snapshot from the host.
    ///
    /// Events that fail normalization or carry a malformed color are left
    /// out and listed in the returned report; the rest are laid out.
    pub fn replace_event_pool(&mut self, raw_events: &[EventRecord]) -> CalendarResult<PoolReport> {
        let mut report = PoolReport::default();
        let mut events = Vec::with_capacity(raw_events.len());

        for (index, raw) in raw_events.iter().enumerate() {
            let normalized = self
                .normalizer
                .normalize(raw)
                .and_then(|event| pick_foreground(&event.color).map(|_| event));

            match normalized {
                Ok(event) => events.push(event),
                Err(error) => {
                    log::warn!("Skipping event #{} \"{}\": {}", index, raw.title, error);
                    report.rejected.push(RejectedEvent {
                        index,
                        title: raw.title.clone(),
                        error,
                    });
                }
            }
        }

        report.accepted = events.len();
        let previous = std::mem::replace(&mut self.events, events);
        if let Err(err) = self.recompute(self.reference_date, self.first_visible_date) {
            self.events = previous;
            return Err(err);
        }

        log::debug!(
            "Event pool replaced: {} accepted, {} rejected",
            report.accepted,
            report.rejected.len()
        );
        Ok(report)
    }

    /// Shift the grid by whole weeks.
    pub fn navigate_weeks(&mut self, delta_weeks: i64) -> CalendarResult<()> {
        let days = delta_weeks
            .checked_mul(DAYS_PER_WEEK as i64)
            .ok_or_else(|| out_of_range(self.first_visible_date, delta_weeks))?;
        self.navigate_days(days)
    }

    /// Shift the grid's first visible date by any number of days.
    pub fn navigate_days(&mut self, delta_days: i64) -> CalendarResult<()> {
        let first = add_days(self.first_visible_date, delta_days)
            .ok_or_else(|| out_of_range(self.first_visible_date, delta_days))?;
        self.recompute(self.reference_date, first)?;
        log::info!("Navigated {} days; grid now starts {}", delta_days, first);
        Ok(())
    }

    fn recompute(&mut self, reference_date: NaiveDate, first_visible_date: NaiveDate) -> CalendarResult<()> {
        let grid = compute_visible_dates(first_visible_date)?;
        let packed = RowPacker::new(&grid, packing_options(&self.config)).pack(&self.events);
        let layout = build_layout(&self.config, &grid, reference_date, self.today, &packed);

        let overflow = layout.total_overflow();
        if overflow > 0 {
            log::debug!("{} events did not fit in their day cells", overflow);
        }

        self.reference_date = reference_date;
        self.first_visible_date = first_visible_date;
        self.grid = grid;
        self.occupancy = packed.occupancy;
        self.layout = layout;
        Ok(())
    }
}

fn out_of_range(first: NaiveDate, delta: i64) -> CalendarError {
    CalendarError::configuration(format!(
        "cannot move grid starting {} by {}: outside the supported date range",
        first, delta
    ))
}

fn packing_options(config: &CalendarConfig) -> PackingOptions {
    PackingOptions {
        show_event_time: config.show_event_time,
        overflow_policy: config.overflow_policy,
    }
}

fn build_layout(
    config: &CalendarConfig,
    grid: &VisibleDateGrid,
    reference_date: NaiveDate,
    today: NaiveDate,
    packed: &PackedLayout,
) -> CalendarLayout {
    let mut per_cell: Vec<Vec<Segment>> = vec![Vec::new(); GRID_SIZE];
    for segment in &packed.segments {
        per_cell[segment.start_cell()].push(segment.clone());
    }

    let cells = grid
        .dates()
        .iter()
        .zip(per_cell)
        .zip(packed.overflow)
        .map(|((&date, mut segments), overflow)| {
            segments.sort_by_key(|segment| segment.row);
            CellLayout {
                date,
                label: day_label(date),
                is_in_current_period: is_same_month(date, reference_date),
                is_today: date == today,
                segments,
                overflow,
            }
        })
        .collect();

    CalendarLayout {
        weekday_labels: weekday_labels(config.start_of_week),
        cells,
    }
}
