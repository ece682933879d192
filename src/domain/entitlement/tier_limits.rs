//! Tier-based feature limits configuration.
//!
//! Defines what features and quotas are available for each tier. The table
//! is fixed at build time; changing a value requires a new release.

use super::{Quota, Tier, TrackedResource, WindowKind};
use crate::domain::usage::ResetWindow;
use serde::{Deserialize, Serialize};

/// Boolean capabilities toggled per tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Create,
    Update,
    Regenerate,
}

/// Feature limits for a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// The tier these limits apply to.
    pub tier: Tier,
    /// AI image generations per calendar day.
    pub daily_quota: Quota,
    /// Avatar generations per period.
    pub period_quota: Quota,
    /// Length of the period quota window, in days.
    pub period_length_days: u32,
    /// Maximum number of saved styles held at once.
    pub max_concurrent_style_slots: u32,
    pub can_create: bool,
    pub can_update: bool,
    pub can_regenerate: bool,
}

impl TierLimits {
    /// Get the limits for a specific tier.
    ///
    /// # Tier Configuration
    ///
    /// | Tier | Images/day | Avatars/period | Period | Style slots | Create | Update | Regenerate |
    /// |------|------------|----------------|--------|-------------|--------|--------|------------|
    /// | Free | disabled | 1 | 30 days | 1 | Yes | No | No |
    /// | Enhanced | 5 | 3 | 14 days | 3 | Yes | Yes | No |
    /// | Premium | Unlimited | 10 | 30 days | 10 | Yes | Yes | Yes |
    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Free => Self {
                tier,
                daily_quota: Quota::DISABLED,
                period_quota: Quota::Limited(1),
                period_length_days: 30,
                max_concurrent_style_slots: 1,
                can_create: true,
                can_update: false,
                can_regenerate: false,
            },
            Tier::Enhanced => Self {
                tier,
                daily_quota: Quota::Limited(5),
                period_quota: Quota::Limited(3),
                period_length_days: 14,
                max_concurrent_style_slots: 3,
                can_create: true,
                can_update: true,
                can_regenerate: false,
            },
            Tier::Premium => Self {
                tier,
                daily_quota: Quota::Unlimited,
                period_quota: Quota::Limited(10),
                period_length_days: 30,
                max_concurrent_style_slots: 10,
                can_create: true,
                can_update: true,
                can_regenerate: true,
            },
        }
    }

    /// Quota governing the given resource.
    pub fn quota_for(&self, resource: TrackedResource) -> Quota {
        match resource.window_kind() {
            WindowKind::Daily => self.daily_quota,
            WindowKind::Period => self.period_quota,
        }
    }

    /// Reset window governing the given resource.
    pub fn window_for(&self, resource: TrackedResource) -> ResetWindow {
        match resource.window_kind() {
            WindowKind::Daily => ResetWindow::Daily,
            WindowKind::Period => ResetWindow::Period {
                days: self.period_length_days,
            },
        }
    }

    /// Returns true if the tier grants the capability.
    pub fn allows(&self, feature: Feature) -> bool {
        match feature {
            Feature::Create => self.can_create,
            Feature::Update => self.can_update,
            Feature::Regenerate => self.can_regenerate,
        }
    }

    /// Check if the style slot limit has been reached.
    pub fn style_slot_limit_reached(&self, current_slots: u32) -> bool {
        current_slots >= self.max_concurrent_style_slots
    }

    /// The lowest tier that grants the capability.
    pub fn minimum_tier_for(feature: Feature) -> Tier {
        Tier::ALL
            .into_iter()
            .find(|tier| Self::for_tier(*tier).allows(feature))
            .unwrap_or(Tier::Premium)
    }
}
