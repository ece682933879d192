//! In-memory key/value store implementation.
//!
//! Useful for:
//! - Unit and integration tests
//! - Hosts that persist state some other way
//!
//! Nothing survives the process.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::ports::{KeyValueStore, StoreError, StoreValue, StoreWrite};

/// In-memory implementation of the KeyValueStore port.
///
/// Thread-safe via internal `Mutex`.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: Mutex<HashMap<String, StoreValue>>,
}

impl InMemoryKeyValueStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns all stored keys, sorted.
    ///
    /// Useful for testing and debugging.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, StoreValue>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<StoreValue> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: StoreValue) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }

    fn apply(&self, writes: Vec<StoreWrite>) -> Result<(), StoreError> {
        let mut values = self.lock();
        for write in writes {
            match write {
                StoreWrite::Set(key, value) => {
                    values.insert(key, value);
                }
                StoreWrite::Remove(key) => {
                    values.remove(&key);
                }
            }
        }
        Ok(())
    }
}
