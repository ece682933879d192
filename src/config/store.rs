//! Persistence configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where usage counters and paywall state are kept
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    /// JSON file holding the state. Unset keeps state in memory only.
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.path {
            Some(path) if path.as_os_str().is_empty() => Err(ValidationError::EmptyStorePath),
            _ => Ok(()),
        }
    }

    /// Check if state survives restarts
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }
}
