//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TIERGATE` prefix and nested values use double underscores as separators.
//!
//! Tier limits are deliberately absent: they are compiled in, see
//! [`TierLimits`](crate::domain::entitlement::TierLimits).
//!
//! # Example
//!
//! ```no_run
//! use tiergate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod logging;
mod paywall;
mod store;

pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use paywall::PaywallConfig;
pub use store::StoreConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// in-memory configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Persistence of counters and paywall state
    #[serde(default)]
    pub store: StoreConfig,

    /// Upgrade prompt cadence
    #[serde(default)]
    pub paywall: PaywallConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TIERGATE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TIERGATE__STORE__PATH=/var/lib/app/state.json` -> `store.path`
    /// - `TIERGATE__PAYWALL__BACKOFF_CAP_DAYS=14` -> `paywall.backoff_cap_days = 14`
    /// - `TIERGATE__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TIERGATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.store.validate()?;
        self.paywall.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
