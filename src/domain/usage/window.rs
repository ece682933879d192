//! Counter windows and their lazy reset rules.

use chrono::{Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Time span over which a usage counter accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResetWindow {
    /// One local calendar day.
    Daily,
    /// A fixed number of days measured from the window start.
    Period { days: u32 },
}

impl ResetWindow {
    /// Returns true if a window that began at `window_start` is over at `now`.
    ///
    /// `offset_at` gives the local calendar offset in force at an instant.
    /// Daily windows end when the local date changes (in either direction,
    /// so a clock moved backwards across midnight also starts a new day).
    /// Period windows end once `days` full days have elapsed.
    pub fn is_expired(
        &self,
        window_start: Timestamp,
        now: Timestamp,
        offset_at: impl Fn(Timestamp) -> FixedOffset,
    ) -> bool {
        match self {
            ResetWindow::Daily => {
                window_start.local_date(offset_at(window_start)) != now.local_date(offset_at(now))
            }
            ResetWindow::Period { days } => {
                now.duration_since(&window_start) >= Duration::days(i64::from(*days))
            }
        }
    }

    /// The instant at which a window that began at `window_start` ends.
    pub fn ends_at(
        &self,
        window_start: Timestamp,
        offset_at: impl Fn(Timestamp) -> FixedOffset,
    ) -> Timestamp {
        match self {
            ResetWindow::Daily => {
                let start_offset = offset_at(window_start);
                let next_day = window_start.local_date(start_offset).succ_opt();
                let estimate = window_start.next_local_midnight(start_offset);
                match next_day {
                    // The offset may change before midnight arrives.
                    Some(day) => Timestamp::local_midnight(day, offset_at(estimate)),
                    None => estimate,
                }
            }
            ResetWindow::Period { days } => window_start.plus_days(i64::from(*days)),
        }
    }
}
