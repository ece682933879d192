//! KeyValueStore port - Durable storage for counters and cadence state.
//!
//! The store is the single source of truth across restarts: services read
//! it once on construction and write every mutation back. Values that are
//! missing or of the wrong type are treated as uninitialised by callers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::Timestamp;

/// A scalar value held in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StoreValue {
    Int(i64),
    Bool(bool),
    Timestamp(Timestamp),
    Text(String),
}

impl StoreValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            StoreValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StoreValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            StoreValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoreValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for StoreValue {
    fn from(v: i64) -> Self {
        StoreValue::Int(v)
    }
}

impl From<u32> for StoreValue {
    fn from(v: u32) -> Self {
        StoreValue::Int(i64::from(v))
    }
}

impl From<bool> for StoreValue {
    fn from(v: bool) -> Self {
        StoreValue::Bool(v)
    }
}

impl From<Timestamp> for StoreValue {
    fn from(v: Timestamp) -> Self {
        StoreValue::Timestamp(v)
    }
}

impl From<String> for StoreValue {
    fn from(v: String) -> Self {
        StoreValue::Text(v)
    }
}

/// One change in a batched write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    Set(String, StoreValue),
    Remove(String),
}

/// Port for durable key/value storage.
///
/// Implementations use interior mutability; callers hold them behind `Arc`.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<StoreValue>;

    /// Writes a value.
    fn set(&self, key: &str, value: StoreValue) -> Result<(), StoreError>;

    /// Deletes a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Applies several changes as one logical write.
    ///
    /// The default applies them one by one; stores that can commit a batch
    /// atomically should override it.
    fn apply(&self, writes: Vec<StoreWrite>) -> Result<(), StoreError> {
        for write in writes {
            match write {
                StoreWrite::Set(key, value) => self.set(&key, value)?,
                StoreWrite::Remove(key) => self.remove(&key)?,
            }
        }
        Ok(())
    }
}

/// Errors from the key/value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store contents could not be encoded or decoded.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
