//! Tracing subscriber setup.
//!
//! Library code only emits `tracing` events; hosts that do not install
//! their own subscriber can call [`init_tracing`] once at startup.

use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Returns false
/// if a global subscriber was already installed.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt().with_env_filter(filter).with_target(true);
    let result = match config.format {
        LogFormat::Plain => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    match result {
        Ok(()) => {
            tracing::debug!(format = ?config.format, "Tracing initialised");
            true
        }
        Err(_) => false,
    }
}
