//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps)
//! - `entitlement` - Tiers, per-tier limits, and entitlement resolution
//! - `usage` - Usage counters, reset windows, and access outcomes
//! - `paywall` - Upgrade prompt cadence and backoff

pub mod entitlement;
pub mod foundation;
pub mod paywall;
pub mod usage;
