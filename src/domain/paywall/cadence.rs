//! Exponential backoff between upgrade prompts.

use serde::{Deserialize, Serialize};

/// Default ceiling on the delay between prompts, in days.
pub const DEFAULT_BACKOFF_CAP_DAYS: u32 = 30;

/// Default interval after which the dismissal ladder starts over, in days.
pub const DEFAULT_PERIODIC_RESET_DAYS: u32 = 30;

/// Timing rules for re-showing a dismissed prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    /// Upper bound returned by [`Cadence::backoff_days`].
    pub backoff_cap_days: u32,
    /// Dismissals are forgotten once this many days pass without a reset.
    pub periodic_reset_days: u32,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            backoff_cap_days: DEFAULT_BACKOFF_CAP_DAYS,
            periodic_reset_days: DEFAULT_PERIODIC_RESET_DAYS,
        }
    }
}

impl Cadence {
    /// Days to wait after the last showing, given `dismiss_count` dismissals.
    ///
    /// `min(2^n, cap)`: 1, 2, 4, 8, 16, then the cap.
    pub fn backoff_days(&self, dismiss_count: u32) -> u32 {
        2u32.checked_pow(dismiss_count)
            .map_or(self.backoff_cap_days, |days| days.min(self.backoff_cap_days))
    }
}

/// Backoff with the default 30-day cap.
pub fn backoff_days(dismiss_count: u32) -> u32 {
    Cadence::default().backoff_days(dismiss_count)
}
