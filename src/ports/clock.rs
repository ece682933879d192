//! Clock port - Source of the current time.
//!
//! Every reset and backoff decision reads time through this port so tests
//! can move across day and period boundaries without sleeping.

use chrono::FixedOffset;

use crate::domain::foundation::Timestamp;

/// Port for reading the current time and the local calendar.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;

    /// Offset of the local calendar in force at `instant`.
    ///
    /// Daily resets compare each instant against the offset that applied at
    /// that instant, so a stored window start keeps its local date across a
    /// daylight-saving change.
    fn offset_at(&self, instant: Timestamp) -> FixedOffset;
}
