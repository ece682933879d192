//! PaywallScheduler - Decides when a free-tier user sees the upgrade prompt.
//!
//! State lives in the key/value store under fixed keys; it is read once on
//! construction and every mutation is written back as one batch.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::paywall::{Cadence, PaywallContext, PaywallDecision, PaywallState};
use crate::ports::{Clock, EntitlementSource, KeyValueStore, StoreWrite};

/// Store keys for the scheduler's persisted state.
pub mod keys {
    pub const FIRST_LAUNCH_DATE: &str = "firstLaunchDate";
    pub const LAST_SHOWN_DATE: &str = "lastShownDate";
    pub const DISMISS_COUNT: &str = "dismissCount";
    pub const LAST_MONTHLY_RESET: &str = "lastMonthlyReset";
    pub const HAS_SEEN_FIRST_LAUNCH: &str = "hasSeenFirstLaunch";
}

/// Upgrade prompt scheduler.
///
/// Not internally synchronised; wrap in a `Mutex` to share (see
/// [`FeatureGate`](super::FeatureGate)).
pub struct PaywallScheduler {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    entitlements: Arc<dyn EntitlementSource>,
    cadence: Cadence,
    state: PaywallState,
    active_context: Option<PaywallContext>,
}

impl PaywallScheduler {
    /// Creates a scheduler with the default 30-day cadence.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        entitlements: Arc<dyn EntitlementSource>,
    ) -> Self {
        Self::with_cadence(store, clock, entitlements, Cadence::default())
    }

    /// Creates a scheduler, loading persisted state.
    ///
    /// Missing values take first-run defaults. The first-launch date and
    /// periodic reset anchor are recorded if absent.
    pub fn with_cadence(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        entitlements: Arc<dyn EntitlementSource>,
        cadence: Cadence,
    ) -> Self {
        let now = clock.now();
        let (state, needs_write) = load_state(store.as_ref(), now);

        let scheduler = Self {
            store,
            clock,
            entitlements,
            cadence,
            state,
            active_context: None,
        };
        if needs_write {
            tracing::info!(first_launch_at = %now, "Recorded first launch");
            scheduler.persist();
        }
        scheduler
    }

    /// Decides whether to show the prompt now.
    ///
    /// Paid tiers are suppressed before any history is consulted. For the
    /// free tier a due periodic reset is applied and persisted first.
    pub fn should_show(&mut self) -> PaywallDecision {
        let tier = self.entitlements.current_tier();
        if tier.is_paid() {
            tracing::debug!(%tier, "Paywall suppressed for paid tier");
            return PaywallDecision::Suppressed;
        }

        let now = self.clock.now();
        if self.state.periodic_reset_due(now, &self.cadence) {
            tracing::debug!(
                dismiss_count = self.state.dismiss_count,
                last_reset = %self.state.last_periodic_reset_at,
                "Periodic paywall reset"
            );
            self.state.apply_periodic_reset(now);
            self.persist();
        }

        let decision = self.state.decide(tier, now, &self.cadence);
        tracing::debug!(
            %decision,
            dismiss_count = self.state.dismiss_count,
            "Paywall decision"
        );
        decision
    }

    /// Marks the prompt as on screen in `context`. Does not touch persisted
    /// state.
    pub fn show(&mut self, context: PaywallContext) {
        tracing::debug!(?context, "Paywall shown");
        self.active_context = Some(context);
    }

    /// The context the prompt is currently shown in, if any.
    pub fn active_context(&self) -> Option<PaywallContext> {
        self.active_context
    }

    /// Records that the prompt shown in `context` was closed.
    pub fn dismiss(&mut self, context: PaywallContext) {
        let now = self.clock.now();
        self.state.record_dismissal(context, now);
        self.active_context = None;
        self.persist();

        tracing::debug!(
            ?context,
            dismiss_count = self.state.dismiss_count,
            next_show_at = ?self.state.next_show_at(&self.cadence),
            "Paywall dismissed"
        );
    }

    /// Resets the backoff ladder after a purchase.
    pub fn record_purchase(&mut self) {
        let now = self.clock.now();
        self.state.record_purchase(now);
        self.active_context = None;
        self.persist();

        tracing::info!(at = %now, "Purchase recorded, paywall backoff reset");
    }

    /// Earliest time a periodic prompt may appear, or `None` if immediately.
    pub fn next_show_at(&self) -> Option<Timestamp> {
        self.state.next_show_at(&self.cadence)
    }

    pub fn state(&self) -> &PaywallState {
        &self.state
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    fn persist(&self) {
        let state = &self.state;
        let mut writes = vec![
            StoreWrite::Set(keys::HAS_SEEN_FIRST_LAUNCH.into(), state.first_launch_seen.into()),
            StoreWrite::Set(keys::DISMISS_COUNT.into(), state.dismiss_count.into()),
            StoreWrite::Set(keys::LAST_MONTHLY_RESET.into(), state.last_periodic_reset_at.into()),
        ];
        writes.push(match state.last_shown_at {
            Some(shown) => StoreWrite::Set(keys::LAST_SHOWN_DATE.into(), shown.into()),
            None => StoreWrite::Remove(keys::LAST_SHOWN_DATE.into()),
        });
        if let Some(first) = state.first_launch_at {
            writes.push(StoreWrite::Set(keys::FIRST_LAUNCH_DATE.into(), first.into()));
        }

        if let Err(e) = self.store.apply(writes) {
            tracing::warn!(error = %e, "Failed to persist paywall state");
        }
    }
}

/// Reads state from the store, filling first-run defaults. Returns true if
/// a default was filled that must be written back.
fn load_state(store: &dyn KeyValueStore, now: Timestamp) -> (PaywallState, bool) {
    let mut state = PaywallState::initial(now);
    let mut needs_write = false;

    state.first_launch_seen = store
        .get(keys::HAS_SEEN_FIRST_LAUNCH)
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    state.dismiss_count = store
        .get(keys::DISMISS_COUNT)
        .and_then(|v| v.as_int())
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0);
    state.last_shown_at = store
        .get(keys::LAST_SHOWN_DATE)
        .and_then(|v| v.as_timestamp());

    match store
        .get(keys::LAST_MONTHLY_RESET)
        .and_then(|v| v.as_timestamp())
    {
        Some(reset) => state.last_periodic_reset_at = reset,
        None => needs_write = true,
    }
    match store
        .get(keys::FIRST_LAUNCH_DATE)
        .and_then(|v| v.as_timestamp())
    {
        Some(first) => state.first_launch_at = Some(first),
        None => {
            state.first_launch_at = Some(now);
            needs_write = true;
        }
    }

    (state, needs_write)
}
