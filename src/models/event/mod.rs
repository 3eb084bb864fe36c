// Event module
// Raw event payloads from the host and their calendar-date form

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Raw event record as supplied by the host data source.
///
/// Instants are epoch milliseconds; `end_ms` is exclusive. Hosts sometimes
/// send the instants as numeric strings, so both forms are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(rename = "startDate", alias = "startInstant", deserialize_with = "epoch_ms")]
    pub start_ms: i64,
    #[serde(rename = "endDate", alias = "endInstant", deserialize_with = "epoch_ms")]
    pub end_ms: i64,
    pub title: String,
    #[serde(rename = "fullDayEvent", alias = "isFullDay", default)]
    pub full_day: bool,
    pub color: String,
}

impl EventRecord {
    pub fn new(
        title: impl Into<String>,
        start_ms: i64,
        end_ms: i64,
        full_day: bool,
        color: impl Into<String>,
    ) -> Self {
        Self {
            start_ms,
            end_ms,
            title: title.into(),
            full_day,
            color: color.into(),
        }
    }
}

fn epoch_ms<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Instant {
        Number(i64),
        Float(f64),
        Text(String),
    }

    match Instant::deserialize(deserializer)? {
        Instant::Number(ms) => Ok(ms),
        Instant::Float(ms) if ms.is_finite() => Ok(ms.trunc() as i64),
        Instant::Float(ms) => Err(serde::de::Error::custom(format!(
            "instant is not a finite number: {}",
            ms
        ))),
        Instant::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid instant \"{}\": {}", text, e))),
    }
}

/// Event reduced to calendar dates, ready for row packing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub start_date: NaiveDate,
    /// Inclusive last date of the event
    pub end_date: NaiveDate,
    /// Number of calendar dates covered, always >= 1
    pub size_in_days: usize,
    /// Formatted start time, only shown for timed events
    pub start_time_label: String,
    pub title: String,
    pub full_day: bool,
    pub color: String,
}

impl NormalizedEvent {
    pub fn is_multi_day(&self) -> bool {
        self.size_in_days > 1
    }

    /// Text shown in every segment of this event.
    pub fn display_text(&self, show_event_time: bool) -> String {
        if !self.full_day && show_event_time && !self.start_time_label.is_empty() {
            format!("{} {}", self.start_time_label, self.title)
        } else {
            self.title.clone()
        }
    }
}
