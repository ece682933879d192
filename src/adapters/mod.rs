//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - System and manual clocks
//! - `store` - Key/value stores (in-memory, JSON file)
//! - `entitlement` - Entitlement sources

pub mod clock;
pub mod entitlement;
pub mod store;

pub use clock::{ManualClock, SystemClock};
pub use entitlement::StaticEntitlementSource;
pub use store::{InMemoryKeyValueStore, JsonFileStore};
