// Test fixtures - reusable test data
// Provides consistent dates and event payloads across test files

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use simple_calendar::EventRecord;

pub const HOUR_MS: i64 = 3_600_000;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Friday, March 15 2024
    pub fn mar_15_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    /// Sunday, February 25 2024; first cell of the March 2024 monthly grid
    pub fn mar_2024_grid_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 25).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }
}

/// Epoch milliseconds for `date` at `hour:00` UTC.
pub fn epoch_ms(date: NaiveDate, hour: u32) -> i64 {
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
        .and_utc()
        .timestamp_millis()
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// Full-day event covering `days` dates starting at `start`
    pub fn all_day(title: &str, start: NaiveDate, days: i64, color: &str) -> EventRecord {
        let start_ms = epoch_ms(start, 0);
        EventRecord::new(title, start_ms, start_ms + days * DAY_MS, true, color)
    }

    /// One-hour timed event
    pub fn timed(title: &str, date: NaiveDate, hour: u32, color: &str) -> EventRecord {
        let start_ms = epoch_ms(date, hour);
        EventRecord::new(title, start_ms, start_ms + HOUR_MS, false, color)
    }
}
