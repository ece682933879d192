//! Integration tests for tier-gated usage quotas.
//!
//! Drives the public API with a manual clock and in-memory store to cover
//! day and period boundaries, disabled features, unlimited tiers, and
//! persistence across restarts.

use std::sync::Arc;

use proptest::prelude::*;
use tempfile::tempdir;

use tiergate::adapters::{InMemoryKeyValueStore, JsonFileStore, ManualClock, StaticEntitlementSource};
use tiergate::application::{FeatureGate, UsageTracker};
use tiergate::domain::entitlement::{Tier, TierLimits, TrackedResource, UNLIMITED_REMAINING};
use tiergate::domain::foundation::Timestamp;
use tiergate::domain::paywall::Cadence;
use tiergate::domain::usage::{AccessDeniedReason, AccessResult};

// =============================================================================
// Test Infrastructure
// =============================================================================

const IMAGES: TrackedResource = TrackedResource::DailyImageGeneration;
const AVATARS: TrackedResource = TrackedResource::AvatarGeneration;

fn monday_morning() -> Timestamp {
    Timestamp::from_ymd_hms(2025, 3, 3, 8, 15, 0).unwrap()
}

fn tracker() -> (UsageTracker, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::starting_at(monday_morning()));
    let tracker = UsageTracker::new(Arc::new(InMemoryKeyValueStore::new()), clock.clone());
    (tracker, clock)
}

// =============================================================================
// Disabled Features
// =============================================================================

#[test]
fn zero_daily_quota_disables_regardless_of_counter() {
    for tier in Tier::ALL {
        let limits = TierLimits::for_tier(tier);
        if !limits.daily_quota.is_disabled() {
            continue;
        }
        let (mut tracker, clock) = tracker();
        assert!(!tracker.can_consume(IMAGES, tier));
        tracker.consume(IMAGES, tier);
        clock.advance_days(1);
        assert!(!tracker.can_consume(IMAGES, tier));
    }
}

#[test]
fn disabled_feature_denial_differs_from_exhaustion() {
    let (mut tracker, _) = tracker();
    let disabled = tracker.check(IMAGES, Tier::Free).into_result().unwrap_err();

    for _ in 0..5 {
        tracker.consume(IMAGES, Tier::Enhanced);
    }
    let exhausted = tracker.check(IMAGES, Tier::Enhanced).into_result().unwrap_err();

    assert!(disabled.requires_upgrade());
    assert!(!exhausted.requires_upgrade());
    assert_ne!(disabled.user_message(), exhausted.user_message());
}

// =============================================================================
// Daily Windows
// =============================================================================

#[test]
fn enhanced_daily_images_reset_next_day() {
    let (mut tracker, clock) = tracker();
    for _ in 0..5 {
        assert!(tracker.can_consume(IMAGES, Tier::Enhanced));
        tracker.consume(IMAGES, Tier::Enhanced);
    }
    assert!(!tracker.can_consume(IMAGES, Tier::Enhanced));

    clock.advance_days(1);
    assert!(tracker.can_consume(IMAGES, Tier::Enhanced));
    assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced), 5);
}

#[test]
fn daily_reset_follows_local_calendar() {
    use chrono::FixedOffset;

    // 08:15 UTC is 17:15 at UTC+9; local midnight is 15:00 UTC.
    let clock = Arc::new(
        ManualClock::starting_at(monday_morning())
            .with_offset(FixedOffset::east_opt(9 * 3600).unwrap()),
    );
    let mut tracker = UsageTracker::new(Arc::new(InMemoryKeyValueStore::new()), clock.clone());
    for _ in 0..5 {
        tracker.consume(IMAGES, Tier::Enhanced);
    }

    clock.advance_hours(6); // 14:15 UTC, still the same local day
    assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced), 0);

    clock.advance_hours(1); // 15:15 UTC, next local day
    assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced), 5);
}

// =============================================================================
// Period Windows
// =============================================================================

#[test]
fn thirty_day_period_resets_only_after_thirty_days() {
    let (mut tracker, clock) = tracker();
    let quota = TierLimits::for_tier(Tier::Premium).period_quota.limit().unwrap();
    for _ in 0..quota {
        tracker.consume(AVATARS, Tier::Premium);
    }
    assert_eq!(tracker.remaining(AVATARS, Tier::Premium), 0);

    clock.advance_days(29);
    assert_eq!(tracker.remaining(AVATARS, Tier::Premium), 0);

    clock.advance_days(1);
    assert_eq!(tracker.remaining(AVATARS, Tier::Premium), quota);
}

#[test]
fn unlimited_daily_quota_reports_sentinel() {
    let (mut tracker, _) = tracker();
    for _ in 0..50 {
        tracker.consume(IMAGES, Tier::Premium);
    }
    assert_eq!(tracker.remaining(IMAGES, Tier::Premium), UNLIMITED_REMAINING);
    assert!(tracker.can_consume(IMAGES, Tier::Premium));
    assert_eq!(tracker.snapshot(IMAGES), None);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn counters_survive_restart_with_file_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tiergate.json");
    let clock = Arc::new(ManualClock::starting_at(monday_morning()));

    {
        let store = Arc::new(JsonFileStore::open(&path).unwrap());
        let mut tracker = UsageTracker::new(store, clock.clone());
        tracker.consume(IMAGES, Tier::Enhanced);
        tracker.consume(IMAGES, Tier::Enhanced);
        tracker.consume(AVATARS, Tier::Enhanced);
    }

    let store = Arc::new(JsonFileStore::open(&path).unwrap());
    let mut tracker = UsageTracker::new(store, clock.clone());
    assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced), 3);
    assert_eq!(tracker.remaining(AVATARS, Tier::Enhanced), 2);

    clock.advance_days(1);
    assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced), 5);
    assert_eq!(tracker.remaining(AVATARS, Tier::Enhanced), 2);
}

// =============================================================================
// Feature Gate
// =============================================================================

#[test]
fn gate_reports_reset_time_when_exhausted() {
    let clock = Arc::new(ManualClock::starting_at(monday_morning()));
    let source = Arc::new(StaticEntitlementSource::with_tier(Tier::Free));
    let gate = FeatureGate::new(
        Arc::new(InMemoryKeyValueStore::new()),
        clock.clone(),
        source,
        Cadence::default(),
    );

    assert_eq!(gate.try_consume(AVATARS), AccessResult::Allowed { remaining: 0 });
    match gate.try_consume(AVATARS) {
        AccessResult::Denied(AccessDeniedReason::QuotaExhausted { resets_at, .. }) => {
            assert_eq!(resets_at, monday_morning().plus_days(30));
        }
        other => panic!("expected exhaustion, got {:?}", other),
    }
}

proptest! {
    #[test]
    fn remaining_plus_used_equals_quota_within_window(uses in 0u32..5) {
        let (mut tracker, _) = tracker();
        for _ in 0..uses {
            tracker.consume(IMAGES, Tier::Enhanced);
        }
        prop_assert_eq!(tracker.remaining(IMAGES, Tier::Enhanced) + uses, 5);
        prop_assert!(tracker.can_consume(IMAGES, Tier::Enhanced));
    }
}
