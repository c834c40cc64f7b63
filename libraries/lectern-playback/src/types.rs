//! Core types for playback control

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Playback status of the bound source
///
/// One tagged status replaces separate "playing", "loading" and "error" flags
/// so contradictory combinations cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// No source bound
    Idle,

    /// Source bound, metadata not yet known
    Loading,

    /// Metadata known, paused
    Ready,

    /// Primitive confirmed it is producing audio
    Playing,

    /// Playing but temporarily starved of data
    Buffering,

    /// Terminal for the current binding
    Error,
}

impl PlaybackStatus {
    /// Whether audio is (or is about to resume) coming out
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing | Self::Buffering)
    }

    /// Whether a source is bound and has not failed
    pub fn is_live(self) -> bool {
        !matches!(self, Self::Idle | Self::Error)
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Buffering => "buffering",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generation marker of a source binding
///
/// Incremented on every rebind. Notifications tagged with any other
/// generation than the current one are stale and get discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    /// Generation before anything was bound
    pub const INITIAL: Self = Self(0);

    /// Wrap a raw counter value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The generation following this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why the primitive refused to start playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionReason {
    /// Autoplay policy: no user gesture yet
    AutoplayBlocked,

    /// Media type or codec not playable
    FormatUnsupported,

    /// Anything else (network, aborted, ...)
    Unknown,
}

impl RejectionReason {
    /// Classify a DOM exception name from a rejected `play()` promise
    pub fn from_dom_error_name(name: &str) -> Self {
        match name {
            "NotAllowedError" => Self::AutoplayBlocked,
            "NotSupportedError" => Self::FormatUnsupported,
            _ => Self::Unknown,
        }
    }

    /// Kebab-case name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AutoplayBlocked => "autoplay-blocked",
            Self::FormatUnsupported => "format-unsupported",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much media data the primitive holds (HTML `readyState`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadyState {
    HaveNothing = 0,
    HaveMetadata = 1,
    HaveCurrentData = 2,
    HaveFutureData = 3,
    HaveEnoughData = 4,
}

impl ReadyState {
    /// Map a raw `readyState` value, saturating above 4
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            0 => Self::HaveNothing,
            1 => Self::HaveMetadata,
            2 => Self::HaveCurrentData,
            3 => Self::HaveFutureData,
            _ => Self::HaveEnoughData,
        }
    }
}

/// Configuration for the audio player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Skip button distance in seconds (default: 10)
    #[serde(default = "default_skip_seconds")]
    pub skip_seconds: f64,

    /// Arrow-key seek distance in seconds (default: 5)
    #[serde(default = "default_keyboard_step_seconds")]
    pub keyboard_step_seconds: f64,

    /// Display time of the "audio unavailable" notice (default: 3000 ms)
    #[serde(default = "default_unavailable_notice_ms")]
    pub unavailable_notice_ms: u64,

    /// Display time of failure notices (default: 4000 ms)
    #[serde(default = "default_failure_notice_ms")]
    pub failure_notice_ms: u64,
}

impl PlayerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("skip_seconds", self.skip_seconds),
            ("keyboard_step_seconds", self.keyboard_step_seconds),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlaybackError::InvalidConfig(format!(
                    "{} must be a positive number of seconds, got {}",
                    name, value
                )));
            }
        }

        if self.unavailable_notice_ms == 0 || self.failure_notice_ms == 0 {
            return Err(PlaybackError::InvalidConfig(
                "notice durations must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_skip_seconds() -> f64 {
    10.0
}

fn default_keyboard_step_seconds() -> f64 {
    5.0
}

fn default_unavailable_notice_ms() -> u64 {
    3000
}

fn default_failure_notice_ms() -> u64 {
    4000
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            skip_seconds: default_skip_seconds(),
            keyboard_step_seconds: default_keyboard_step_seconds(),
            unavailable_notice_ms: default_unavailable_notice_ms(),
            failure_notice_ms: default_failure_notice_ms(),
        }
    }
}
