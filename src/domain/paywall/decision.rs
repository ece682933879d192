//! Upgrade prompt contexts and scheduling decisions.

use serde::{Deserialize, Serialize};

/// Why the upgrade prompt is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaywallContext {
    /// Shown once, on the first launch of the app.
    FirstLaunch,
    /// Shown on the backoff schedule.
    Periodic,
    /// Shown because a gated operation was denied.
    FeatureLimit,
    /// Opened by the user.
    Manual,
}

impl PaywallContext {
    /// Returns true if dismissing the prompt in this context pushes the
    /// backoff ladder up a rung. User-initiated showings never do.
    pub fn counts_as_dismissal(&self) -> bool {
        !matches!(self, PaywallContext::Manual)
    }
}

/// Whether the upgrade prompt should be shown right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaywallDecision {
    /// Backoff has not elapsed since the last showing.
    NotYetEligible,
    /// The first-launch prompt has not been seen yet.
    FirstLaunchDue,
    /// Backoff has elapsed.
    PeriodicDue,
    /// The user holds a paid tier.
    Suppressed,
}

impl PaywallDecision {
    /// Returns true if the caller should show the prompt.
    pub fn is_due(&self) -> bool {
        matches!(self, PaywallDecision::FirstLaunchDue | PaywallDecision::PeriodicDue)
    }

    /// The context to pass to `show` when the prompt is due.
    pub fn context(&self) -> Option<PaywallContext> {
        match self {
            PaywallDecision::FirstLaunchDue => Some(PaywallContext::FirstLaunch),
            PaywallDecision::PeriodicDue => Some(PaywallContext::Periodic),
            PaywallDecision::NotYetEligible | PaywallDecision::Suppressed => None,
        }
    }
}

impl std::fmt::Display for PaywallDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaywallDecision::NotYetEligible => "not_yet_eligible",
            PaywallDecision::FirstLaunchDue => "first_launch_due",
            PaywallDecision::PeriodicDue => "periodic_due",
            PaywallDecision::Suppressed => "suppressed",
        };
        write!(f, "{}", s)
    }
}
