//! Foundation module - Shared domain primitives.
//!
//! Contains value objects that form the vocabulary shared by the
//! entitlement, usage, and paywall domains.

mod timestamp;

pub use timestamp::Timestamp;
