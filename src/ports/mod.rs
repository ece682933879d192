//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Clock` - Current time and local calendar offset
//! - `KeyValueStore` - Durable scalar storage for counters and cadence state
//! - `EntitlementSource` - The user's active tier, owned by the purchase system

mod clock;
mod entitlement_source;
mod key_value_store;

pub use clock::Clock;
pub use entitlement_source::EntitlementSource;
pub use key_value_store::{KeyValueStore, StoreError, StoreValue, StoreWrite};
