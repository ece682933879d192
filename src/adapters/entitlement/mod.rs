//! Entitlement adapters - implementations of the EntitlementSource port.
//!
//! - `StaticEntitlementSource` - Settable source for tests and push-driven hosts

mod static_source;

pub use static_source::StaticEntitlementSource;
