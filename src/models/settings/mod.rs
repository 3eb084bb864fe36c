// Settings module
// Display configuration for the calendar grid

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Number of cells in the visible grid (6 weeks x 7 days).
pub const GRID_SIZE: usize = 42;

pub const DAYS_PER_WEEK: usize = 7;

/// Maximum number of stacked event rows drawn in one day cell.
pub const ROW_CAPACITY_PER_DAY: usize = 5;

pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 10 * 60 * 1000;

pub const DEFAULT_TIME_FORMAT: &str = "HH:mm";

/// How the first visible date is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum GridMode {
    /// Grid starts on the week containing the first of the reference month.
    #[default]
    #[serde(rename = "monthly")]
    Monthly,
    /// Grid starts on the week containing the reference date itself.
    #[serde(rename = "6weeks")]
    SixWeeks,
}

impl GridMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridMode::Monthly => "monthly",
            GridMode::SixWeeks => "6weeks",
        }
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridMode {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(GridMode::Monthly),
            "6weeks" => Ok(GridMode::SixWeeks),
            other => Err(CalendarError::configuration(format!(
                "unknown mode \"{}\" (expected \"monthly\" or \"6weeks\")",
                other
            ))),
        }
    }
}

impl TryFrom<String> for GridMode {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// What happens to events that find no free row in their start cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Drop the event and record how many were dropped on each cell.
    #[default]
    Count,
    /// Drop the event without a trace.
    Silent,
}

/// Calendar display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarConfig {
    /// First weekday of each grid row, 0 = Sunday .. 6 = Saturday
    pub start_of_week: u8,
    pub mode: GridMode,
    pub refresh_interval_ms: u64,
    /// Prefix timed events with their start time
    pub show_event_time: bool,
    /// Moment-style pattern such as "HH:mm" or "hh:mm A"
    pub time_format: String,
    pub overflow_policy: OverflowPolicy,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            start_of_week: 0, // Sunday
            mode: GridMode::Monthly,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            show_event_time: true,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            overflow_policy: OverflowPolicy::Count,
        }
    }
}

impl CalendarConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), CalendarError> {
        validate_start_of_week(self.start_of_week)?;

        if self.refresh_interval_ms == 0 {
            return Err(CalendarError::configuration(
                "refreshIntervalMs must be greater than zero",
            ));
        }

        if self.time_format.trim().is_empty() {
            return Err(CalendarError::configuration("timeFormat cannot be empty"));
        }

        Ok(())
    }

    pub fn row_capacity(&self) -> usize {
        ROW_CAPACITY_PER_DAY
    }
}

pub fn validate_start_of_week(start_of_week: u8) -> Result<(), CalendarError> {
    if start_of_week > 6 {
        return Err(CalendarError::configuration(format!(
            "startOfWeek must be between 0 and 6, got {}",
            start_of_week
        )));
    }
    Ok(())
}
