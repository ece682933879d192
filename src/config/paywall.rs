//! Paywall cadence configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::paywall::{Cadence, DEFAULT_BACKOFF_CAP_DAYS, DEFAULT_PERIODIC_RESET_DAYS};

/// Longest backoff cap accepted, in days
const MAX_BACKOFF_CAP_DAYS: u32 = 365;

/// Timing of upgrade prompts
#[derive(Debug, Clone, Deserialize)]
pub struct PaywallConfig {
    /// Days after which dismissals are forgotten
    #[serde(default = "default_periodic_reset_days")]
    pub periodic_reset_days: u32,

    /// Ceiling on the delay between prompts, in days
    #[serde(default = "default_backoff_cap_days")]
    pub backoff_cap_days: u32,
}

impl PaywallConfig {
    /// Cadence used by the scheduler
    pub fn cadence(&self) -> Cadence {
        Cadence {
            backoff_cap_days: self.backoff_cap_days,
            periodic_reset_days: self.periodic_reset_days,
        }
    }

    /// Validate paywall configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.periodic_reset_days == 0 {
            return Err(ValidationError::InvalidResetInterval);
        }
        if self.backoff_cap_days == 0 || self.backoff_cap_days > MAX_BACKOFF_CAP_DAYS {
            return Err(ValidationError::InvalidBackoffCap {
                max: MAX_BACKOFF_CAP_DAYS,
            });
        }
        Ok(())
    }
}

impl Default for PaywallConfig {
    fn default() -> Self {
        Self {
            periodic_reset_days: default_periodic_reset_days(),
            backoff_cap_days: default_backoff_cap_days(),
        }
    }
}

fn default_periodic_reset_days() -> u32 {
    DEFAULT_PERIODIC_RESET_DAYS
}

fn default_backoff_cap_days() -> u32 {
    DEFAULT_BACKOFF_CAP_DAYS
}
