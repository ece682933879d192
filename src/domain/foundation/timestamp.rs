//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Calendar questions ("is this the same day?") are answered against an
/// explicit UTC offset so the caller decides which local calendar applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from UTC calendar components.
    ///
    /// Returns `None` for components that do not form a valid date/time.
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(Self)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Saturates at the representable range instead of overflowing.
    pub fn plus_days(&self, days: i64) -> Self {
        self.saturating_add(Duration::try_days(days), days < 0)
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        self.plus_days(days.saturating_neg())
    }

    /// Creates a new timestamp by adding the specified number of hours.
    pub fn plus_hours(&self, hours: i64) -> Self {
        self.saturating_add(Duration::try_hours(hours), hours < 0)
    }

    fn saturating_add(&self, delta: Option<Duration>, backwards: bool) -> Self {
        match delta.and_then(|d| self.0.checked_add_signed(d)) {
            Some(dt) => Self(dt),
            None if backwards => Self(DateTime::<Utc>::MIN_UTC),
            None => Self(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Returns the calendar date of this instant in the given offset.
    pub fn local_date(&self, offset: FixedOffset) -> NaiveDate {
        self.0.with_timezone(&offset).date_naive()
    }

    /// Returns the instant at which the next local calendar day begins.
    pub fn next_local_midnight(&self, offset: FixedOffset) -> Self {
        let next_day = self
            .local_date(offset)
            .succ_opt()
            .unwrap_or(NaiveDate::MAX);
        Self::local_midnight(next_day, offset)
    }

    /// The instant at which `date` begins in the given offset.
    pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> Self {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        match offset.from_local_datetime(&midnight).single() {
            Some(local) => Self(local.with_timezone(&Utc)),
            None => Self(midnight.and_utc()),
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn ts(day: u32, hour: u32) -> Timestamp {
        Timestamp::from_ymd_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_ordering_works() {
        assert!(ts(1, 10).is_before(&ts(1, 11)));
        assert!(ts(2, 0).is_after(&ts(1, 23)));
        assert!(ts(1, 10) < ts(2, 10));
    }

    #[test]
    fn plus_and_minus_days_are_symmetric() {
        let start = ts(10, 12);
        assert_eq!(start.plus_days(3).minus_days(3), start);
        assert_eq!(start.plus_days(1).duration_since(&start), Duration::days(1));
    }

    #[test]
    fn local_date_respects_offset() {
        // 23:00 UTC on the 1st is already the 2nd at UTC+2
        let late = ts(1, 23);
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();

        assert_eq!(late.local_date(utc).day(), 1);
        assert_eq!(late.local_date(plus_two).day(), 2);
    }

    #[test]
    fn next_local_midnight_in_utc() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(ts(5, 15).next_local_midnight(utc), ts(6, 0));
    }

    #[test]
    fn next_local_midnight_in_negative_offset() {
        // 03:00 UTC on the 5th is 22:00 on the 4th at UTC-5; next midnight is 05:00 UTC on the 5th
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(ts(5, 3).next_local_midnight(minus_five), ts(5, 5));
    }

    #[test]
    fn from_ymd_hms_rejects_invalid_dates() {
        assert!(Timestamp::from_ymd_hms(2024, 2, 30, 0, 0, 0).is_none());
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let json = serde_json::to_string(&ts(15, 10)).unwrap();
        assert!(json.contains("2024-03-15"));
    }

    #[test]
    fn day_arithmetic_saturates_instead_of_panicking() {
        let start = ts(1, 0);
        assert_eq!(start.plus_days(i64::from(u32::MAX)), start.plus_days(i64::MAX));
        assert_eq!(start.plus_days(i64::MAX), Timestamp(DateTime::<Utc>::MAX_UTC));
        assert_eq!(start.minus_days(i64::MAX), Timestamp(DateTime::<Utc>::MIN_UTC));
        assert_eq!(start.plus_hours(i64::MIN), Timestamp(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn local_midnight_applies_offset() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let plus_one = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(
            Timestamp::local_midnight(date, plus_one),
            Timestamp::from_ymd_hms(2024, 3, 5, 23, 0, 0).unwrap()
        );
    }
}
