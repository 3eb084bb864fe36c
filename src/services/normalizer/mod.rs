//! Conversion of raw host events into calendar-date descriptors.

use chrono::{Local, TimeZone};

use crate::error::{CalendarError, CalendarResult};
use crate::models::event::{EventRecord, NormalizedEvent};
use crate::services::time_format::TimeLabelFormatter;
use crate::utils::date::{days_between, instant_to_local};

/// Truncates event instants to calendar dates in a fixed time zone.
pub struct EventNormalizer<F, Tz = Local> {
    formatter: F,
    tz: Tz,
}

impl<F: TimeLabelFormatter> EventNormalizer<F, Local> {
    pub fn new(formatter: F) -> Self {
        Self::with_timezone(formatter, Local)
    }
}

impl<F: TimeLabelFormatter, Tz: TimeZone> EventNormalizer<F, Tz> {
    pub fn with_timezone(formatter: F, tz: Tz) -> Self {
        Self { formatter, tz }
    }

    /// Normalize a single event.
    ///
    /// The exclusive end instant is pulled back by one millisecond before
    /// truncation, so an event ending exactly at midnight does not spill
    /// into the next date.
    pub fn normalize(&self, raw: &EventRecord) -> CalendarResult<NormalizedEvent> {
        let start = self.local(raw, raw.start_ms)?;
        let end = self.local(raw, raw.end_ms.saturating_sub(1))?;

        let start_date = start.date();
        let end_date = end.date();
        let size_in_days = days_between(start_date, end_date) + 1;

        if size_in_days < 1 {
            return Err(CalendarError::InvalidRange {
                title: raw.title.clone(),
                size_in_days,
            });
        }

        let start_time_label = if raw.full_day {
            String::new()
        } else {
            self.formatter.format_time(start)
        };

        Ok(NormalizedEvent {
            start_date,
            end_date,
            size_in_days: size_in_days as usize,
            start_time_label,
            title: raw.title.clone(),
            full_day: raw.full_day,
            color: raw.color.clone(),
        })
    }

    fn local(&self, raw: &EventRecord, epoch_ms: i64) -> CalendarResult<chrono::NaiveDateTime> {
        instant_to_local(epoch_ms, &self.tz).ok_or_else(|| CalendarError::InvalidInstant {
            title: raw.title.clone(),
            epoch_ms,
        })
    }
}
