//! Tiergate - Subscription tier gating for consumer apps
//!
//! This crate decides whether a user may perform a paid operation, how many
//! uses remain in the current window, and when a free-tier user should be
//! interrupted with an upgrade prompt.
//!
//! The purchase system, UI, and storage engine are collaborators reached
//! through [`ports`]; [`application::FeatureGate`] is the usual entry point.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
