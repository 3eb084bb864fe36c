use std::time::{Duration, Instant};

/// Tracks when the next periodic refresh is due.
///
/// Time is passed in by the caller so the schedule can be driven by a
/// real timer or by tests.
#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    interval: Duration,
    last_run_at: Option<Instant>,
}

impl RefreshSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run_at: None,
        }
    }

    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// A schedule that never ran is due immediately.
    pub fn is_due(&self, now: Instant) -> bool {
        self.last_run_at
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval)
    }

    pub fn mark_ran(&mut self, now: Instant) {
        self.last_run_at = Some(now);
    }

    /// Time left until the next refresh, zero when already due.
    pub fn next_due_in(&self, now: Instant) -> Duration {
        match self.last_run_at {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Mark a run at `now` if one is due; returns whether it was.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.mark_ran(now);
            true
        } else {
            false
        }
    }
}
