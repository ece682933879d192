//! Usage domain module.
//!
//! Counter state for rate-limited resources and the rules that roll it
//! over. Resets are lazy: they are evaluated whenever a counter is read or
//! written, never by a timer.

mod access;
mod record;
mod window;

pub use access::{AccessDeniedReason, AccessResult};
pub use record::UsageRecord;
pub use window::ResetWindow;
