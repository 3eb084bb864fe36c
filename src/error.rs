//! Error taxonomy for grid computation and event layout.
//!
//! Configuration errors are fatal when an engine is built. Range, instant
//! and color errors are scoped to a single event: the engine drops that
//! event from the layout and reports the failure to its host.

/// Errors raised by the calendar layout core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Invalid `startOfWeek`, unknown grid mode, or another bad setting.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Event ends before it starts once truncated to calendar dates.
    #[error("event \"{title}\" ends before it starts (size {size_in_days} days)")]
    InvalidRange { title: String, size_in_days: i64 },

    /// Epoch-millisecond instant outside the representable date range.
    #[error("event \"{title}\" has an unrepresentable instant: {epoch_ms}")]
    InvalidInstant { title: String, epoch_ms: i64 },

    /// Malformed hex color string.
    #[error("invalid color \"{0}\": expected #RGB or #RRGGBB")]
    InvalidColor(String),
}

impl CalendarError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// True for errors that only invalidate one event rather than the engine.
    pub fn is_per_event(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }
}

pub type CalendarResult<T> = Result<T, CalendarError>;
