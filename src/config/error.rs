//! Configuration error types

use thiserror::Error;

use crate::ports::StoreError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Store could not be opened: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Periodic reset interval must be at least one day")]
    InvalidResetInterval,

    #[error("Backoff cap must be between 1 and {max} days")]
    InvalidBackoffCap { max: u32 },

    #[error("Store path must not be empty")]
    EmptyStorePath,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
