//! UsageTracker - Per-resource quota counters with lazy window resets.
//!
//! Every read or write first checks whether the resource's window has
//! rolled over and, if so, starts a new one. No timer is involved.
//!
//! `consume` does not refuse over-quota calls. Callers must check
//! `can_consume` (or use `check`) first; an over-quota consume is logged
//! and still counted.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entitlement::{Quota, Tier, TierLimits, TrackedResource, UNLIMITED_REMAINING};
use crate::domain::foundation::Timestamp;
use crate::domain::usage::{AccessDeniedReason, AccessResult, UsageRecord};
use crate::ports::{Clock, KeyValueStore, StoreWrite};

/// Stateful quota counters, one per tracked resource.
///
/// Not internally synchronised; wrap in a `Mutex` to share (see
/// [`FeatureGate`](super::FeatureGate)).
pub struct UsageTracker {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    records: HashMap<TrackedResource, UsageRecord>,
}

impl UsageTracker {
    /// Creates a tracker, loading any counters already in `store`.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let records = TrackedResource::ALL
            .into_iter()
            .filter_map(|resource| load_record(store.as_ref(), resource).map(|r| (resource, r)))
            .collect();

        Self {
            store,
            clock,
            records,
        }
    }

    /// Uses left in the current window.
    ///
    /// Returns [`UNLIMITED_REMAINING`] for unlimited quotas and 0 for
    /// disabled ones.
    pub fn remaining(&mut self, resource: TrackedResource, tier: Tier) -> u32 {
        let quota = quota_of(resource, tier);
        if quota.is_unlimited() {
            return UNLIMITED_REMAINING;
        }
        let record = self.current_record(resource, tier);
        quota.remaining_after(record.count)
    }

    /// Returns true if one more use is permitted now.
    pub fn can_consume(&mut self, resource: TrackedResource, tier: Tier) -> bool {
        let quota = quota_of(resource, tier);
        match quota {
            Quota::Unlimited => true,
            Quota::Limited(0) => false,
            Quota::Limited(_) => {
                let record = self.current_record(resource, tier);
                quota.allows(record.count)
            }
        }
    }

    /// Records one use of `resource`.
    ///
    /// Unlimited quotas are not counted.
    pub fn consume(&mut self, resource: TrackedResource, tier: Tier) {
        let quota = quota_of(resource, tier);
        if quota.is_unlimited() {
            tracing::debug!(%resource, %tier, "Unlimited quota, not counted");
            return;
        }

        let mut record = self.current_record(resource, tier);
        if !quota.allows(record.count) {
            tracing::warn!(
                %resource,
                %tier,
                count = record.count,
                %quota,
                "Consume called past quota"
            );
        }
        record.increment();
        self.records.insert(resource, record);
        self.persist(resource, &record);

        tracing::debug!(%resource, %tier, count = record.count, "Usage consumed");
    }

    /// Checks access and explains a denial.
    pub fn check(&mut self, resource: TrackedResource, tier: Tier) -> AccessResult {
        let limits = TierLimits::for_tier(tier);
        let quota = limits.quota_for(resource);
        match quota {
            Quota::Unlimited => AccessResult::Allowed {
                remaining: UNLIMITED_REMAINING,
            },
            Quota::Limited(0) => {
                AccessResult::Denied(AccessDeniedReason::FeatureDisabled { resource, tier })
            }
            Quota::Limited(max) => {
                let record = self.current_record(resource, tier);
                if quota.allows(record.count) {
                    AccessResult::Allowed {
                        remaining: quota.remaining_after(record.count),
                    }
                } else {
                    let resets_at = limits
                        .window_for(resource)
                        .ends_at(record.window_start, |t| self.clock.offset_at(t));
                    AccessResult::Denied(AccessDeniedReason::QuotaExhausted {
                        resource,
                        used: record.count,
                        quota: max,
                        resets_at,
                    })
                }
            }
        }
    }

    /// When the current window for `resource` ends.
    ///
    /// `None` for unlimited or disabled quotas, which never reset.
    pub fn resets_at(&mut self, resource: TrackedResource, tier: Tier) -> Option<Timestamp> {
        let limits = TierLimits::for_tier(tier);
        let quota = limits.quota_for(resource);
        if quota.is_unlimited() || quota.is_disabled() {
            return None;
        }
        let record = self.current_record(resource, tier);
        Some(
            limits
                .window_for(resource)
                .ends_at(record.window_start, |t| self.clock.offset_at(t)),
        )
    }

    /// The stored record as last written, without applying any reset.
    pub fn snapshot(&self, resource: TrackedResource) -> Option<UsageRecord> {
        self.records.get(&resource).copied()
    }

    /// Returns the record for `resource`, creating it or rolling its window
    /// over as needed. Changes are persisted before returning.
    fn current_record(&mut self, resource: TrackedResource, tier: Tier) -> UsageRecord {
        let now = self.clock.now();
        let window = TierLimits::for_tier(tier).window_for(resource);

        let (record, changed) = match self.records.get(&resource).copied() {
            None => (UsageRecord::fresh(now), true),
            Some(mut record) => {
                let rolled = record.roll_if_expired(window, now, |t| self.clock.offset_at(t));
                if rolled {
                    tracing::debug!(%resource, %tier, ?window, "Usage window reset");
                }
                (record, rolled)
            }
        };

        if changed {
            self.records.insert(resource, record);
            self.persist(resource, &record);
        }
        record
    }

    fn persist(&self, resource: TrackedResource, record: &UsageRecord) {
        let writes = vec![
            StoreWrite::Set(resource.count_key(), record.count.into()),
            StoreWrite::Set(resource.window_start_key(), record.window_start.into()),
        ];
        if let Err(e) = self.store.apply(writes) {
            tracing::warn!(%resource, error = %e, "Failed to persist usage record");
        }
    }
}

fn quota_of(resource: TrackedResource, tier: Tier) -> Quota {
    TierLimits::for_tier(tier).quota_for(resource)
}

/// Reads a record back from the store. Anything missing or malformed is
/// treated as never used.
fn load_record(store: &dyn KeyValueStore, resource: TrackedResource) -> Option<UsageRecord> {
    let count = store
        .get(&resource.count_key())
        .and_then(|v| v.as_int())
        .and_then(|v| u32::try_from(v).ok())?;
    let window_start = store
        .get(&resource.window_start_key())
        .and_then(|v| v.as_timestamp())?;
    Some(UsageRecord {
        count,
        window_start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::store::InMemoryKeyValueStore;
    use crate::ports::StoreValue;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    const IMAGES: TrackedResource = TrackedResource::DailyImageGeneration;
    const AVATARS: TrackedResource = TrackedResource::AvatarGeneration;

    fn start() -> Timestamp {
        Timestamp::from_ymd_hms(2024, 8, 12, 9, 0, 0).unwrap()
    }

    fn setup() -> (UsageTracker, Arc<InMemoryKeyValueStore>, Arc<ManualClock>) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let clock = Arc::new(ManualClock::starting_at(start()));
        let tracker = UsageTracker::new(store.clone(), clock.clone());
        (tracker, store, clock)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Daily Quota Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn fresh_resource_has_full_quota() {
        let (mut tracker, _, _) = setup();
        assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced), 5);
        assert!(tracker.can_consume(IMAGES, Tier::Enhanced));
    }

    #[test]
    fn exhausts_after_quota_consumes() {
        let (mut tracker, _, _) = setup();
        for _ in 0..5 {
            assert!(tracker.can_consume(IMAGES, Tier::Enhanced));
            tracker.consume(IMAGES, Tier::Enhanced);
        }
        assert!(!tracker.can_consume(IMAGES, Tier::Enhanced));
        assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced), 0);
    }

    #[test]
    fn next_calendar_day_restores_quota() {
        let (mut tracker, _, clock) = setup();
        for _ in 0..5 {
            tracker.consume(IMAGES, Tier::Enhanced);
        }
        clock.advance_hours(14); // 23:00 same day
        assert!(!tracker.can_consume(IMAGES, Tier::Enhanced));

        clock.advance_hours(1); // midnight
        assert!(tracker.can_consume(IMAGES, Tier::Enhanced));
        assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced), 5);
    }

    #[test]
    fn daylight_saving_change_does_not_grant_second_quota() {
        use chrono::FixedOffset;

        // Window opens at 00:30 local (+02:00); clocks fall back to +01:00 at 01:00Z.
        let opened = Timestamp::from_ymd_hms(2024, 10, 26, 22, 30, 0).unwrap();
        let fall_back = Timestamp::from_ymd_hms(2024, 10, 27, 1, 0, 0).unwrap();
        let clock = Arc::new(
            ManualClock::starting_at(opened)
                .with_offset(FixedOffset::east_opt(2 * 3600).unwrap())
                .with_transition(fall_back, FixedOffset::east_opt(3600).unwrap()),
        );
        let mut tracker = UsageTracker::new(Arc::new(InMemoryKeyValueStore::new()), clock.clone());
        for _ in 0..5 {
            tracker.consume(IMAGES, Tier::Enhanced);
        }

        clock.set(Timestamp::from_ymd_hms(2024, 10, 27, 11, 0, 0).unwrap());
        assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced), 0);
        assert_eq!(
            tracker.resets_at(IMAGES, Tier::Enhanced),
            Timestamp::from_ymd_hms(2024, 10, 27, 23, 0, 0)
        );

        clock.set(Timestamp::from_ymd_hms(2024, 10, 27, 23, 0, 0).unwrap());
        assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced), 5);
    }

    #[test]
    fn disabled_quota_never_allows() {
        let (mut tracker, _, _) = setup();
        assert!(!tracker.can_consume(IMAGES, Tier::Free));
        assert_eq!(tracker.remaining(IMAGES, Tier::Free), 0);
        assert!(matches!(
            tracker.check(IMAGES, Tier::Free),
            AccessResult::Denied(AccessDeniedReason::FeatureDisabled { .. })
        ));
    }

    #[test]
    fn unlimited_quota_skips_counting() {
        let (mut tracker, store, _) = setup();
        for _ in 0..100 {
            tracker.consume(IMAGES, Tier::Premium);
        }
        assert!(tracker.can_consume(IMAGES, Tier::Premium));
        assert_eq!(tracker.remaining(IMAGES, Tier::Premium), UNLIMITED_REMAINING);
        assert!(tracker.snapshot(IMAGES).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn over_quota_consume_is_still_counted() {
        let (mut tracker, _, _) = setup();
        for _ in 0..7 {
            tracker.consume(IMAGES, Tier::Enhanced);
        }
        assert_eq!(tracker.snapshot(IMAGES).unwrap().count, 7);
        assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Period Quota Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn period_quota_holds_until_length_elapses() {
        let (mut tracker, _, clock) = setup();
        tracker.consume(AVATARS, Tier::Free);
        assert_eq!(tracker.remaining(AVATARS, Tier::Free), 0);

        clock.advance_days(29);
        assert_eq!(tracker.remaining(AVATARS, Tier::Free), 0);

        clock.advance_days(1);
        assert_eq!(tracker.remaining(AVATARS, Tier::Free), 1);
    }

    #[test]
    fn enhanced_period_is_fourteen_days() {
        let (mut tracker, _, clock) = setup();
        for _ in 0..3 {
            tracker.consume(AVATARS, Tier::Enhanced);
        }
        clock.advance_days(13);
        assert!(!tracker.can_consume(AVATARS, Tier::Enhanced));
        clock.advance_days(1);
        assert!(tracker.can_consume(AVATARS, Tier::Enhanced));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Check / Reset Time Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn exhausted_check_reports_reset_time() {
        let (mut tracker, _, _) = setup();
        for _ in 0..5 {
            tracker.consume(IMAGES, Tier::Enhanced);
        }
        let expected_reset = Timestamp::from_ymd_hms(2024, 8, 13, 0, 0, 0).unwrap();
        assert_eq!(
            tracker.check(IMAGES, Tier::Enhanced),
            AccessResult::Denied(AccessDeniedReason::QuotaExhausted {
                resource: IMAGES,
                used: 5,
                quota: 5,
                resets_at: expected_reset,
            })
        );
        assert_eq!(tracker.resets_at(IMAGES, Tier::Enhanced), Some(expected_reset));
    }

    #[test]
    fn allowed_check_reports_remaining() {
        let (mut tracker, _, _) = setup();
        tracker.consume(AVATARS, Tier::Premium);
        assert_eq!(
            tracker.check(AVATARS, Tier::Premium),
            AccessResult::Allowed { remaining: 9 }
        );
    }

    #[test]
    fn resets_at_is_none_for_unlimited() {
        let (mut tracker, _, _) = setup();
        assert_eq!(tracker.resets_at(IMAGES, Tier::Premium), None);
        assert_eq!(tracker.resets_at(IMAGES, Tier::Free), None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Persistence Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn consume_writes_namespaced_keys() {
        let (mut tracker, store, _) = setup();
        tracker.consume(IMAGES, Tier::Enhanced);
        assert_eq!(
            store.get("dailyImageGenerations.count"),
            Some(StoreValue::Int(1))
        );
        assert_eq!(
            store.get("dailyImageGenerations.windowStart"),
            Some(StoreValue::Timestamp(start()))
        );
    }

    #[test]
    fn counters_survive_reconstruction() {
        let (mut tracker, store, clock) = setup();
        tracker.consume(IMAGES, Tier::Enhanced);
        tracker.consume(IMAGES, Tier::Enhanced);

        let mut reloaded = UsageTracker::new(store, clock);
        assert_eq!(reloaded.remaining(IMAGES, Tier::Enhanced), 3);
    }

    #[test]
    fn malformed_state_is_treated_as_unused() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set("dailyImageGenerations.count", StoreValue::Int(-4)).unwrap();
        store
            .set("dailyImageGenerations.windowStart", StoreValue::Text("yesterday".into()))
            .unwrap();
        let clock = Arc::new(ManualClock::starting_at(start()));

        let mut tracker = UsageTracker::new(store, clock);
        assert!(tracker.snapshot(IMAGES).is_none());
        assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced), 5);
    }
}
