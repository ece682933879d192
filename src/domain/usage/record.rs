//! Per-resource usage counter state.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use super::ResetWindow;
use crate::domain::foundation::Timestamp;

/// Uses consumed in the current window of one tracked resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub count: u32,
    pub window_start: Timestamp,
}

impl UsageRecord {
    /// A record with nothing consumed and a window starting at `now`.
    pub fn fresh(now: Timestamp) -> Self {
        Self {
            count: 0,
            window_start: now,
        }
    }

    /// Starts a new window at `now`.
    pub fn reset(&mut self, now: Timestamp) {
        self.count = 0;
        self.window_start = now;
    }

    /// Resets the record if `window` has rolled over. Returns true on reset.
    pub fn roll_if_expired(
        &mut self,
        window: ResetWindow,
        now: Timestamp,
        offset_at: impl Fn(Timestamp) -> FixedOffset,
    ) -> bool {
        if window.is_expired(self.window_start, now, offset_at) {
            self.reset(now);
            true
        } else {
            false
        }
    }

    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }
}
