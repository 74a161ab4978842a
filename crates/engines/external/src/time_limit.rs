//! Translation of a harness time budget into the backend's `time_limit`.
//!
//! The backend takes one millisecond figure per move. Under a fixed
//! allotment that is the allotment itself. Under a running clock it is a
//! hundredth of the remaining clock plus whole seconds of increment, minus a
//! reserve for process overhead, never below a minimum think time.

use std::fmt;
use std::time::Duration;

use engine_core::{Color, SideClock, TimeBudget};

/// Reserved for starting the backend and reading its answer.
pub const TIME_MARGIN_MS: i64 = 300;

/// Shortest limit the backend is ever given under a clock.
pub const MIN_TIME_LIMIT_MS: i64 = 96;

/// Per-move limit in milliseconds, as written into the request file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeLimit(u64);

impl TimeLimit {
    /// Limit for the side to move under `budget`.
    pub fn for_budget(budget: &TimeBudget, side_to_move: Color) -> Self {
        match budget {
            TimeBudget::Fixed { allotment } => Self::fixed(*allotment),
            TimeBudget::Clock { white, black } => Self::from_clock(match side_to_move {
                Color::White => white,
                Color::Black => black,
            }),
        }
    }

    pub fn fixed(allotment: Duration) -> Self {
        TimeLimit(u64::try_from(allotment.as_millis()).unwrap_or(u64::MAX))
    }

    /// `remaining/100 + whole_increment_seconds*1000 - 300`, floored at 96.
    pub fn from_clock(clock: &SideClock) -> Self {
        let from_clock = clock.remaining_ms / 100;
        let from_increment = (clock.increment_ms / 1000).saturating_mul(1000);
        let raw = from_clock
            .saturating_add(from_increment)
            .saturating_sub(TIME_MARGIN_MS);
        TimeLimit(raw.max(MIN_TIME_LIMIT_MS) as u64)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "time_limit_tests.rs"]
mod time_limit_tests;
