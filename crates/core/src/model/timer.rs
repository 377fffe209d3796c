use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed attempt length. The deadline is computed once from this and then
/// persisted; reloads reuse the stored deadline instead of restarting it.
pub const ATTEMPT_DURATION_MINUTES: i64 = 150;

/// Absolute wall-clock instant at which an in-progress attempt auto-submits.
///
/// Storing the end instant (not a remaining counter) is what makes the
/// countdown survive a page reload without granting extra time. Remaining
/// time is always a pure function of (deadline, now).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline(DateTime<Utc>);

impl Deadline {
    #[must_use]
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Deadline for an attempt starting now with the default duration.
    #[must_use]
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self(now + Duration::minutes(ATTEMPT_DURATION_MINUTES))
    }

    #[must_use]
    pub fn at(&self) -> DateTime<Utc> {
        self.0
    }

    /// Whole seconds left until the deadline, clamped at zero.
    #[must_use]
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.0 - now).num_seconds().max(0)
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.0
    }

    /// Countdown display for the given instant, `MM:SS` zero-padded, pinned
    /// to `00:00` once expired.
    #[must_use]
    pub fn display(&self, now: DateTime<Utc>) -> String {
        format_clock(self.remaining_seconds(now))
    }
}

/// Render seconds as a zero-padded `MM:SS` countdown. Minutes grow past two
/// digits for long exams (a full attempt starts at `150:00`).
#[must_use]
pub fn format_clock(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}
