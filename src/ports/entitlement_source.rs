//! EntitlementSource port - Which tier the user currently holds.
//!
//! The purchase system behind this port refreshes on its own schedule
//! (app foreground, after a purchase). Services only read from it.

use crate::domain::entitlement::Tier;
use crate::domain::foundation::Timestamp;

/// Port for reading the caller's active entitlement.
pub trait EntitlementSource: Send + Sync {
    /// The tier currently in force.
    fn current_tier(&self) -> Tier;

    /// When the current tier lapses, if it does.
    fn current_tier_expiry(&self) -> Option<Timestamp>;
}
