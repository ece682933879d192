//! Wall-clock implementation of the Clock port.

use chrono::{FixedOffset, Local, TimeZone};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Reads the system clock and the machine's local UTC offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn offset_at(&self, instant: Timestamp) -> FixedOffset {
        Local.offset_from_utc_datetime(&instant.as_datetime().naive_utc())
    }
}
