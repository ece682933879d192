//! Entitlement domain module.
//!
//! Pure policy: which tier is in force and what that tier permits.
//!
//! # Module Structure
//!
//! - `tier` - Tier subscription levels
//! - `tier_limits` - Feature limits per tier
//! - `quota` - Quota sizes with the disabled/unlimited distinctions
//! - `resource` - Rate-limited resources and their window kinds
//! - `entitlement` - Resolution of the active entitlement

#[allow(clippy::module_inception)]
mod entitlement;
mod quota;
mod resource;
mod tier;
mod tier_limits;

pub use entitlement::Entitlement;
pub use quota::{Quota, UNLIMITED_REMAINING};
pub use resource::{TrackedResource, WindowKind};
pub use tier::{ParseTierError, Tier};
pub use tier_limits::{Feature, TierLimits};
