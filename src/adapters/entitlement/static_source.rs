//! Settable implementation of EntitlementSource.
//!
//! Stands in for the platform purchase system in tests and in hosts that
//! push entitlement changes in from elsewhere.
//!
//! # Usage
//!
//! ```ignore
//! use tiergate::adapters::entitlement::StaticEntitlementSource;
//!
//! let source = StaticEntitlementSource::with_tier(Tier::Enhanced);
//! // After a purchase event:
//! source.set_entitlement(Entitlement::new(Tier::Premium, Some(expiry)));
//! ```

use std::sync::{PoisonError, RwLock};

use crate::domain::entitlement::{Entitlement, Tier};
use crate::domain::foundation::Timestamp;
use crate::ports::EntitlementSource;

/// EntitlementSource holding a single, replaceable entitlement.
#[derive(Debug)]
pub struct StaticEntitlementSource {
    current: RwLock<Entitlement>,
}

impl Default for StaticEntitlementSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticEntitlementSource {
    /// Create a source reporting the free tier.
    pub fn new() -> Self {
        Self::with_entitlement(Entitlement::free())
    }

    /// Create a source with a non-expiring tier.
    pub fn with_tier(tier: Tier) -> Self {
        Self::with_entitlement(Entitlement::new(tier, None))
    }

    pub fn with_entitlement(entitlement: Entitlement) -> Self {
        Self {
            current: RwLock::new(entitlement),
        }
    }

    /// Create a source from every entitlement the user holds, keeping the
    /// one in force at `now`.
    pub fn from_entitlements(entitlements: &[Entitlement], now: Timestamp) -> Self {
        Self::with_entitlement(Entitlement::resolve_active(entitlements, now))
    }

    /// Replace the tier with a non-expiring one.
    pub fn set_tier(&self, tier: Tier) {
        self.set_entitlement(Entitlement::new(tier, None));
    }

    pub fn set_entitlement(&self, entitlement: Entitlement) {
        tracing::info!(tier = %entitlement.tier, "Entitlement updated");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = entitlement;
    }

    fn entitlement(&self) -> Entitlement {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EntitlementSource for StaticEntitlementSource {
    fn current_tier(&self) -> Tier {
        self.entitlement().tier
    }

    fn current_tier_expiry(&self) -> Option<Timestamp> {
        self.entitlement().expires_at
    }
}
