//! Rate-limited resources gated by tier.

use serde::{Deserialize, Serialize};

/// How a resource's counter window is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Resets when the local calendar day changes.
    Daily,
    /// Resets after the tier's period length in days.
    Period,
}

/// A rate-limited operation with its own usage counter.
///
/// Adding a variant forces every quota lookup and storage key to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedResource {
    /// AI image generations, counted per calendar day.
    DailyImageGeneration,
    /// Avatar generations, counted per tier-specific period.
    AvatarGeneration,
}

impl TrackedResource {
    /// Every tracked resource.
    pub const ALL: [TrackedResource; 2] = [
        TrackedResource::DailyImageGeneration,
        TrackedResource::AvatarGeneration,
    ];

    /// The window the counter for this resource accumulates over.
    pub fn window_kind(&self) -> WindowKind {
        match self {
            TrackedResource::DailyImageGeneration => WindowKind::Daily,
            TrackedResource::AvatarGeneration => WindowKind::Period,
        }
    }

    /// Persistence namespace for this resource's counter.
    pub fn key_namespace(&self) -> &'static str {
        match self {
            TrackedResource::DailyImageGeneration => "dailyImageGenerations",
            TrackedResource::AvatarGeneration => "avatarGenerations",
        }
    }

    /// Store key holding the consumed count.
    pub fn count_key(&self) -> String {
        format!("{}.count", self.key_namespace())
    }

    /// Store key holding the start of the current window.
    pub fn window_start_key(&self) -> String {
        format!("{}.windowStart", self.key_namespace())
    }

    /// Human-readable name used in denial messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TrackedResource::DailyImageGeneration => "AI image generation",
            TrackedResource::AvatarGeneration => "Avatar generation",
        }
    }
}

impl std::fmt::Display for TrackedResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key_namespace())
    }
}
