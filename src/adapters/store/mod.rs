//! Key/value store adapters.
//!
//! - `InMemoryKeyValueStore` - Process-local store for tests
//! - `JsonFileStore` - Durable store backed by a single JSON file

mod in_memory;
mod json_file;

pub use in_memory::InMemoryKeyValueStore;
pub use json_file::JsonFileStore;
