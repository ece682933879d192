//! Hand-driven clock for tests and simulations.
//!
//! Time only moves when told to, which makes day and period boundaries
//! deterministic.
//!
//! # Example
//!
//! ```
//! use tiergate::adapters::clock::ManualClock;
//! use tiergate::domain::foundation::Timestamp;
//! use tiergate::ports::Clock;
//!
//! let start = Timestamp::from_ymd_hms(2024, 1, 1, 9, 0, 0).unwrap();
//! let clock = ManualClock::starting_at(start);
//! clock.advance_days(2);
//! assert_eq!(clock.now(), start.plus_days(2));
//! ```

use chrono::{FixedOffset, Offset, Utc};
use std::sync::{Mutex, PoisonError};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Clock whose current time is set explicitly.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
    offset: FixedOffset,
    /// Offset changes as `(effective_from, offset)`, sorted by instant.
    transitions: Vec<(Timestamp, FixedOffset)>,
}

impl ManualClock {
    /// Creates a clock at `start` on the UTC calendar.
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
            offset: Utc.fix(),
            transitions: Vec::new(),
        }
    }

    /// Uses a different local calendar for daily resets.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Switches to `offset` from `at` onwards, as a daylight-saving change would.
    pub fn with_transition(mut self, at: Timestamp, offset: FixedOffset) -> Self {
        self.transitions.push((at, offset));
        self.transitions.sort_by_key(|(from, _)| *from);
        self
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: Timestamp) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    /// Moves the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = now.plus_days(days);
    }

    /// Moves the clock forward by whole hours.
    pub fn advance_hours(&self, hours: i64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = now.plus_hours(hours);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn offset_at(&self, instant: Timestamp) -> FixedOffset {
        self.transitions
            .iter()
            .rev()
            .find(|(from, _)| !instant.is_before(from))
            .map_or(self.offset, |(_, offset)| *offset)
    }
}
