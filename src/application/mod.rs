//! Application layer - Services that orchestrate the domain through ports.
//!
//! - `UsageTracker` - Quota counters with lazy resets
//! - `PaywallScheduler` - Upgrade prompt cadence
//! - `FeatureGate` - Lock-guarded façade combining both with the entitlement source

mod feature_gate;
mod paywall_scheduler;
mod usage_tracker;

pub use feature_gate::FeatureGate;
pub use paywall_scheduler::{keys as paywall_keys, PaywallScheduler};
pub use usage_tracker::UsageTracker;
