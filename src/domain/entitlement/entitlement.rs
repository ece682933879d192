//! Active entitlement resolution.

use serde::{Deserialize, Serialize};

use super::Tier;
use crate::domain::foundation::Timestamp;

/// A tier the user is entitled to, optionally until an expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub tier: Tier,
    /// `None` means the entitlement does not lapse.
    pub expires_at: Option<Timestamp>,
}

impl Entitlement {
    pub fn new(tier: Tier, expires_at: Option<Timestamp>) -> Self {
        Self { tier, expires_at }
    }

    /// The entitlement every user holds when nothing else is active.
    pub fn free() -> Self {
        Self::new(Tier::Free, None)
    }

    /// Returns true if the entitlement is still valid at `now`.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        self.expires_at.map_or(true, |expiry| now.is_before(&expiry))
    }

    /// Picks the entitlement in force at `now`.
    ///
    /// Expired entries are ignored and the highest-priority tier wins. Ties
    /// go to the later expiry. Falls back to [`Entitlement::free`].
    pub fn resolve_active<'a, I>(entitlements: I, now: Timestamp) -> Entitlement
    where
        I: IntoIterator<Item = &'a Entitlement>,
    {
        entitlements
            .into_iter()
            .filter(|e| e.is_active_at(now))
            .max_by(|a, b| {
                a.tier
                    .priority()
                    .cmp(&b.tier.priority())
                    .then_with(|| expiry_rank(a).cmp(&expiry_rank(b)))
            })
            .copied()
            .unwrap_or_else(Entitlement::free)
    }
}

// Non-expiring entitlements outrank any dated one.
fn expiry_rank(e: &Entitlement) -> (bool, Option<Timestamp>) {
    (e.expires_at.is_none(), e.expires_at)
}
