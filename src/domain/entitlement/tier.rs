//! Subscription tier definitions.
//!
//! Represents the closed set of subscription levels a user can hold.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Subscription tier.
///
/// Determines feature access and usage quotas. Tiers are totally ordered by
/// [`Tier::priority`], so `Free < Enhanced < Premium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free tier - evaluation access, eligible for upgrade prompts.
    Free,

    /// Enhanced subscription tier.
    Enhanced,

    /// Premium subscription tier - everything unlocked.
    Premium,
}

impl Tier {
    /// All tiers in ascending priority order.
    pub const ALL: [Tier; 3] = [Tier::Free, Tier::Enhanced, Tier::Premium];

    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, Tier::Free)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Free => "Free",
            Tier::Enhanced => "Enhanced",
            Tier::Premium => "Premium",
        }
    }

    /// Returns the numeric priority of this tier.
    ///
    /// When several entitlements are valid at once, the highest priority wins.
    pub fn priority(&self) -> u8 {
        match self {
            Tier::Free => 0,
            Tier::Enhanced => 1,
            Tier::Premium => 2,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string does not name a known tier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tier: {0}")]
pub struct ParseTierError(pub String);

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "enhanced" => Ok(Tier::Enhanced),
            "premium" => Ok(Tier::Premium),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}
