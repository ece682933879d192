//! FeatureGate - The caller-facing entry point.
//!
//! Combines the entitlement source, the usage tracker, and the paywall
//! scheduler behind one shareable value. Each component sits behind its
//! own lock so a decision and the write it causes happen as one unit.
//!
//! # Example
//!
//! ```ignore
//! let gate = FeatureGate::new(store, clock, entitlements, Cadence::default());
//!
//! match gate.try_consume(TrackedResource::DailyImageGeneration) {
//!     AccessResult::Allowed { remaining } => generate_image(remaining),
//!     AccessResult::Denied(reason) => show_limit_message(reason.user_message()),
//! }
//!
//! // On app foreground:
//! if let Some(context) = gate.should_show_paywall().context() {
//!     gate.show_paywall(context);
//! }
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{PaywallScheduler, UsageTracker};
use crate::adapters::clock::SystemClock;
use crate::adapters::store::{InMemoryKeyValueStore, JsonFileStore};
use crate::config::{AppConfig, ConfigError};
use crate::domain::entitlement::{Feature, Tier, TierLimits, TrackedResource};
use crate::domain::paywall::{Cadence, PaywallContext, PaywallDecision, PaywallState};
use crate::domain::usage::AccessResult;
use crate::ports::{Clock, EntitlementSource, KeyValueStore};

/// Thread-safe façade over usage quotas and paywall cadence.
pub struct FeatureGate {
    entitlements: Arc<dyn EntitlementSource>,
    usage: Mutex<UsageTracker>,
    paywall: Mutex<PaywallScheduler>,
}

impl FeatureGate {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        entitlements: Arc<dyn EntitlementSource>,
        cadence: Cadence,
    ) -> Self {
        let usage = UsageTracker::new(store.clone(), clock.clone());
        let paywall = PaywallScheduler::with_cadence(store, clock, entitlements.clone(), cadence);
        Self {
            entitlements,
            usage: Mutex::new(usage),
            paywall: Mutex::new(paywall),
        }
    }

    /// Builds a gate on the system clock from application configuration.
    ///
    /// The configuration is validated first. Uses a JSON file store when
    /// `store.path` is set, otherwise state is kept in memory only.
    pub fn from_config(
        config: &AppConfig,
        entitlements: Arc<dyn EntitlementSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let store: Arc<dyn KeyValueStore> = match &config.store.path {
            Some(path) => Arc::new(JsonFileStore::open(path)?),
            None => {
                tracing::warn!("No store path configured, usage state will not persist");
                Arc::new(InMemoryKeyValueStore::new())
            }
        };
        Ok(Self::new(
            store,
            Arc::new(SystemClock::new()),
            entitlements,
            config.paywall.cadence(),
        ))
    }

    /// The tier currently in force.
    pub fn tier(&self) -> Tier {
        self.entitlements.current_tier()
    }

    /// Limits of the current tier.
    pub fn limits(&self) -> TierLimits {
        TierLimits::for_tier(self.tier())
    }

    /// Returns true if the current tier grants the capability.
    pub fn can_use(&self, feature: Feature) -> bool {
        self.limits().allows(feature)
    }

    /// Returns true if another style slot may be filled.
    pub fn can_add_style(&self, current_slots: u32) -> bool {
        !self.limits().style_slot_limit_reached(current_slots)
    }

    pub fn remaining(&self, resource: TrackedResource) -> u32 {
        let tier = self.tier();
        self.usage().remaining(resource, tier)
    }

    pub fn can_consume(&self, resource: TrackedResource) -> bool {
        let tier = self.tier();
        self.usage().can_consume(resource, tier)
    }

    /// Records one use without checking the quota.
    pub fn consume(&self, resource: TrackedResource) {
        let tier = self.tier();
        self.usage().consume(resource, tier);
    }

    /// Checks access without consuming.
    pub fn check(&self, resource: TrackedResource) -> AccessResult {
        let tier = self.tier();
        self.usage().check(resource, tier)
    }

    /// Checks access and, if allowed, consumes one use under the same lock.
    ///
    /// The returned `remaining` reflects the use just consumed.
    pub fn try_consume(&self, resource: TrackedResource) -> AccessResult {
        let tier = self.tier();
        let mut usage = self.usage();
        match usage.check(resource, tier) {
            AccessResult::Allowed { .. } => {
                usage.consume(resource, tier);
                AccessResult::Allowed {
                    remaining: usage.remaining(resource, tier),
                }
            }
            denied => {
                tracing::debug!(%resource, %tier, "Access denied");
                denied
            }
        }
    }

    pub fn should_show_paywall(&self) -> PaywallDecision {
        self.paywall().should_show()
    }

    pub fn show_paywall(&self, context: PaywallContext) {
        self.paywall().show(context);
    }

    pub fn dismiss_paywall(&self, context: PaywallContext) {
        self.paywall().dismiss(context);
    }

    /// Resets paywall backoff after a purchase. The entitlement source is
    /// expected to report the new tier on its own.
    pub fn record_purchase(&self) {
        self.paywall().record_purchase();
    }

    pub fn paywall_state(&self) -> PaywallState {
        *self.paywall().state()
    }

    fn usage(&self) -> MutexGuard<'_, UsageTracker> {
        self.usage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn paywall(&self) -> MutexGuard<'_, PaywallScheduler> {
        self.paywall.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
