// Date utility functions
// Calendar-date helpers shared by the grid and the normalizer

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

const MONTH_NAMES_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Convert an epoch-millisecond instant into wall-clock time in `tz`.
///
/// Returns `None` when the instant is outside chrono's representable range.
pub fn instant_to_local<Tz: TimeZone>(epoch_ms: i64, tz: &Tz) -> Option<NaiveDateTime> {
    let utc = DateTime::<Utc>::from_timestamp_millis(epoch_ms)?;
    Some(utc.with_timezone(tz).naive_local())
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Shift a date by a signed number of days, `None` on calendar overflow.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

/// Weekday index with Sunday = 0 .. Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn month_name_short(date: NaiveDate) -> &'static str {
    MONTH_NAMES_SHORT[date.month0() as usize]
}

pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_instant_to_local_respects_offset() {
        // 2024-03-15T23:30:00Z
        let ms = 1_710_545_400_000;
        let utc = instant_to_local(ms, &Utc).unwrap();
        assert_eq!(utc.date(), date(2024, 3, 15));

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let shifted = instant_to_local(ms, &plus_two).unwrap();
        assert_eq!(shifted.date(), date(2024, 3, 16));
    }

    #[test]
    fn test_instant_out_of_range() {
        assert!(instant_to_local(i64::MAX, &Utc).is_none());
    }

    #[test]
    fn test_days_between_and_add_days() {
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(days_between(date(2024, 3, 1), date(2024, 2, 28)), -2);
        assert_eq!(add_days(date(2024, 2, 28), 2), Some(date(2024, 3, 1)));
        assert_eq!(add_days(date(2024, 3, 1), -7), Some(date(2024, 2, 23)));
    }

    #[test]
    fn test_weekday_index_sunday_first() {
        assert_eq!(weekday_index(date(2024, 3, 3)), 0);
        assert_eq!(weekday_index(date(2024, 3, 15)), 5);
    }

    #[test]
    fn test_month_helpers() {
        assert_eq!(month_name_short(date(2024, 12, 1)), "Dec");
        assert!(is_same_month(date(2024, 3, 1), date(2024, 3, 31)));
        assert!(!is_same_month(date(2024, 3, 1), date(2025, 3, 1)));
    }
}
