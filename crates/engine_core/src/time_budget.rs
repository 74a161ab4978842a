//! Time budgets handed to adapters on every search.
//!
//! A harness either grants a fixed allotment per move or reports both players'
//! remaining clocks and increments. Adapters decide how to spend it; the
//! external driver, for example, converts it into a single millisecond limit.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shakmaty::Color;

fn duration_to_ms(d: Duration) -> i64 {
    i64::try_from(d.as_millis()).unwrap_or(i64::MAX)
}

/// Remaining clock and increment of one side.
///
/// Stored as signed milliseconds so a clock that ran past zero can still be
/// reported as it is instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideClock {
    /// Time left on the clock
    pub remaining_ms: i64,
    /// Time added after each move
    pub increment_ms: i64,
}

impl SideClock {
    pub fn new(remaining: Duration, increment: Duration) -> Self {
        Self {
            remaining_ms: duration_to_ms(remaining),
            increment_ms: duration_to_ms(increment),
        }
    }

    /// Remaining time, with an overdrawn clock reported as zero.
    pub fn remaining(&self) -> Duration {
        Duration::from_millis(self.remaining_ms.max(0) as u64)
    }

    pub fn increment(&self) -> Duration {
        Duration::from_millis(self.increment_ms.max(0) as u64)
    }

    /// Deduct thinking time from the clock.
    pub fn spend(&mut self, elapsed: Duration) {
        self.remaining_ms = self.remaining_ms.saturating_sub(duration_to_ms(elapsed));
    }

    /// Credit the increment after a completed move.
    pub fn add_increment(&mut self) {
        self.remaining_ms = self.remaining_ms.saturating_add(self.increment_ms);
    }

    /// The flag fell.
    pub fn is_flagged(&self) -> bool {
        self.remaining_ms <= 0
    }
}

/// How much time an adapter may use for the move it is asked for.
///
/// Exactly one shape is populated per call, so adapters dispatch on the
/// variant instead of probing for fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBudget {
    /// A fixed allotment for this move.
    Fixed { allotment: Duration },
    /// Sudden-death or increment play: both clocks as they stand now.
    Clock { white: SideClock, black: SideClock },
}

impl TimeBudget {
    pub fn fixed(allotment: Duration) -> Self {
        TimeBudget::Fixed { allotment }
    }

    pub fn clock(white: SideClock, black: SideClock) -> Self {
        TimeBudget::Clock { white, black }
    }

    /// The clock of `color`, if this budget carries clocks at all.
    pub fn side(&self, color: Color) -> Option<&SideClock> {
        match self {
            TimeBudget::Fixed { .. } => None,
            TimeBudget::Clock { white, black } => Some(match color {
                Color::White => white,
                Color::Black => black,
            }),
        }
    }
}

/// Time control announced to adapters before a game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeControl {
    pub initial_ms: u64,
    pub increment_ms: u64,
}

impl TimeControl {
    pub fn new(initial: Duration, increment: Duration) -> Self {
        Self {
            initial_ms: u64::try_from(initial.as_millis()).unwrap_or(u64::MAX),
            increment_ms: u64::try_from(increment.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn initial(&self) -> Duration {
        Duration::from_millis(self.initial_ms)
    }

    pub fn increment(&self) -> Duration {
        Duration::from_millis(self.increment_ms)
    }

    /// Starting clock for either side under this control.
    pub fn starting_clock(&self) -> SideClock {
        SideClock::new(self.initial(), self.increment())
    }
}

impl fmt::Display for TimeControl {
    /// Formats as `minutes+seconds`, e.g. `3+2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}+{}",
            self.initial_ms as f64 / 60_000.0,
            self.increment_ms as f64 / 1_000.0
        )
    }
}

#[cfg(test)]
#[path = "time_budget_tests.rs"]
mod time_budget_tests;
