//! Persisted paywall cadence state and the pure decision over it.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{Cadence, PaywallContext, PaywallDecision};
use crate::domain::entitlement::Tier;
use crate::domain::foundation::Timestamp;

/// Everything the scheduler remembers between launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaywallState {
    pub first_launch_seen: bool,
    /// Non-manual dismissals since the last reset.
    pub dismiss_count: u32,
    /// `None` when the prompt has not been shown since the last reset.
    pub last_shown_at: Option<Timestamp>,
    pub last_periodic_reset_at: Timestamp,
    /// When the app was first seen running.
    pub first_launch_at: Option<Timestamp>,
}

impl PaywallState {
    /// First-run defaults.
    pub fn initial(now: Timestamp) -> Self {
        Self {
            first_launch_seen: false,
            dismiss_count: 0,
            last_shown_at: None,
            last_periodic_reset_at: now,
            first_launch_at: None,
        }
    }

    /// Returns true once more than `cadence.periodic_reset_days` have passed
    /// since the last reset.
    pub fn periodic_reset_due(&self, now: Timestamp, cadence: &Cadence) -> bool {
        now.duration_since(&self.last_periodic_reset_at)
            > Duration::days(i64::from(cadence.periodic_reset_days))
    }

    /// Forgets dismissals and restarts the reset interval at `now`.
    pub fn apply_periodic_reset(&mut self, now: Timestamp) {
        self.dismiss_count = 0;
        self.last_periodic_reset_at = now;
    }

    /// Earliest time the prompt may appear again, or `None` if it may
    /// appear immediately.
    pub fn next_show_at(&self, cadence: &Cadence) -> Option<Timestamp> {
        self.last_shown_at.map(|shown| {
            shown.plus_days(i64::from(cadence.backoff_days(self.dismiss_count)))
        })
    }

    /// Decides whether to show the prompt. Assumes any due periodic reset
    /// has already been applied.
    pub fn decide(&self, tier: Tier, now: Timestamp, cadence: &Cadence) -> PaywallDecision {
        if tier != Tier::Free {
            return PaywallDecision::Suppressed;
        }
        if !self.first_launch_seen {
            return PaywallDecision::FirstLaunchDue;
        }
        match self.next_show_at(cadence) {
            Some(next) if now.is_before(&next) => PaywallDecision::NotYetEligible,
            _ => PaywallDecision::PeriodicDue,
        }
    }

    /// Records that the prompt shown in `context` was closed at `now`.
    pub fn record_dismissal(&mut self, context: PaywallContext, now: Timestamp) {
        self.last_shown_at = Some(now);
        if context.counts_as_dismissal() {
            self.dismiss_count = self.dismiss_count.saturating_add(1);
        }
        if context == PaywallContext::FirstLaunch {
            self.first_launch_seen = true;
        }
    }

    /// Resets the backoff ladder after a successful purchase.
    pub fn record_purchase(&mut self, now: Timestamp) {
        self.dismiss_count = 0;
        self.last_shown_at = None;
        self.last_periodic_reset_at = now;
    }
}
