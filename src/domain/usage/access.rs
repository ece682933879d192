//! Outcomes of a quota check.
//!
//! A denial is an ordinary policy outcome, not a fault. The two denial
//! reasons must read differently to the user: a disabled feature needs an
//! upgrade, an exhausted quota only needs to wait for the next window.

use serde::{Deserialize, Serialize};

use crate::domain::entitlement::{Tier, TrackedResource};
use crate::domain::foundation::Timestamp;

/// Result of an access check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccessResult {
    /// Access is granted.
    Allowed {
        /// Uses left after this check, or the unlimited sentinel.
        remaining: u32,
    },
    /// Access is denied with a specific reason.
    Denied(AccessDeniedReason),
}

impl AccessResult {
    /// Returns true if access is allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessResult::Allowed { .. })
    }

    /// Returns true if access is denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, AccessResult::Denied(_))
    }

    /// Converts the result to a Result type, with denied becoming an error.
    pub fn into_result(self) -> Result<u32, AccessDeniedReason> {
        match self {
            AccessResult::Allowed { remaining } => Ok(remaining),
            AccessResult::Denied(reason) => Err(reason),
        }
    }
}

/// Reason why access was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessDeniedReason {
    /// The tier has a quota of zero for this resource.
    FeatureDisabled {
        resource: TrackedResource,
        tier: Tier,
    },

    /// Every use in the current window has been consumed.
    QuotaExhausted {
        resource: TrackedResource,
        used: u32,
        quota: u32,
        /// When the window rolls over and uses become available again.
        resets_at: Timestamp,
    },
}

impl AccessDeniedReason {
    /// Returns true if upgrading is the only way to gain access.
    pub fn requires_upgrade(&self) -> bool {
        matches!(self, AccessDeniedReason::FeatureDisabled { .. })
    }

    /// Get a user-facing message for the denial reason.
    pub fn user_message(&self) -> String {
        match self {
            AccessDeniedReason::FeatureDisabled { resource, tier } => {
                format!(
                    "{} is not included in the {} plan. Upgrade to unlock it.",
                    resource.display_name(),
                    tier.display_name()
                )
            }
            AccessDeniedReason::QuotaExhausted {
                resource,
                used,
                quota,
                resets_at,
            } => {
                format!(
                    "You've used {} of {} {} credits. More become available at {}.",
                    used,
                    quota,
                    resource.display_name(),
                    resets_at
                )
            }
        }
    }
}

impl std::fmt::Display for AccessDeniedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}
