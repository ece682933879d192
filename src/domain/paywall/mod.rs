//! Paywall domain module.
//!
//! Decides when a free-tier user sees the upgrade prompt. Each non-manual
//! dismissal doubles the wait before the next showing, up to a cap, and
//! the ladder starts over periodically or after a purchase.
//!
//! # Module Structure
//!
//! - `cadence` - Backoff and periodic reset timing
//! - `decision` - Prompt contexts and scheduling outcomes
//! - `state` - Persisted state and the pure decision over it

mod cadence;
mod decision;
mod state;

pub use cadence::{backoff_days, Cadence, DEFAULT_BACKOFF_CAP_DAYS, DEFAULT_PERIODIC_RESET_DAYS};
pub use decision::{PaywallContext, PaywallDecision};
pub use state::PaywallState;
