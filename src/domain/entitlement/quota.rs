//! Quota sizes for rate-limited operations.

use serde::{Deserialize, Serialize};

/// Remaining count reported for an unlimited quota.
pub const UNLIMITED_REMAINING: u32 = u32::MAX;

/// Maximum number of uses permitted within one window.
///
/// `Limited(0)` means the feature is disabled for the tier, which is a
/// different situation from a quota that has been used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quota {
    Limited(u32),
    Unlimited,
}

impl Quota {
    /// Quota that disables the feature outright.
    pub const DISABLED: Quota = Quota::Limited(0);

    /// Returns true if the feature is turned off for the tier.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Quota::Limited(0))
    }

    /// Returns true if no counting applies.
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Quota::Unlimited)
    }

    /// Uses left after `used` have been consumed, clamped at zero.
    pub fn remaining_after(&self, used: u32) -> u32 {
        match self {
            Quota::Limited(max) => max.saturating_sub(used),
            Quota::Unlimited => UNLIMITED_REMAINING,
        }
    }

    /// Returns true if one more use is permitted after `used`.
    pub fn allows(&self, used: u32) -> bool {
        match self {
            Quota::Limited(0) => false,
            Quota::Limited(max) => used < *max,
            Quota::Unlimited => true,
        }
    }

    /// The finite size of this quota, if any.
    pub fn limit(&self) -> Option<u32> {
        match self {
            Quota::Limited(max) => Some(*max),
            Quota::Unlimited => None,
        }
    }
}

impl std::fmt::Display for Quota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quota::Limited(max) => write!(f, "{}", max),
            Quota::Unlimited => write!(f, "unlimited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_quota_is_disabled() {
        assert!(Quota::DISABLED.is_disabled());
        assert!(!Quota::DISABLED.allows(0));
        assert_eq!(Quota::DISABLED.remaining_after(0), 0);
    }

    #[test]
    fn unlimited_always_allows() {
        assert!(Quota::Unlimited.allows(u32::MAX));
        assert_eq!(Quota::Unlimited.remaining_after(1_000), UNLIMITED_REMAINING);
        assert_eq!(Quota::Unlimited.limit(), None);
    }

    #[test]
    fn limited_allows_until_exhausted() {
        let quota = Quota::Limited(5);
        assert!(quota.allows(4));
        assert!(!quota.allows(5));
        assert_eq!(quota.remaining_after(5), 0);
    }

    #[test]
    fn remaining_clamps_when_over_consumed() {
        assert_eq!(Quota::Limited(3).remaining_after(7), 0);
    }

    #[test]
    fn displays_unlimited_by_name() {
        assert_eq!(Quota::Unlimited.to_string(), "unlimited");
        assert_eq!(Quota::Limited(14).to_string(), "14");
    }

    proptest! {
        #[test]
        fn allows_iff_remaining_positive(max in 0u32..1_000, used in 0u32..2_000) {
            let quota = Quota::Limited(max);
            prop_assert_eq!(quota.allows(used), quota.remaining_after(used) > 0);
        }
    }
}
