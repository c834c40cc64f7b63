//! User-visible notices
//!
//! Short, classified messages shown for a bounded time. Only terminal
//! failures and the "no audio" case produce notices; ignored seeks and
//! buffering never do.

use crate::types::{PlayerConfig, RejectionReason};
use serde::{Deserialize, Serialize};

/// Why a notice was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NoticeKind {
    /// Play pressed on a book without audio
    AudioUnavailable,

    /// The source failed to load
    LoadFailed,

    /// The primitive rejected `play()`
    PlaybackRejected {
        /// Classified rejection
        reason: RejectionReason,
    },
}

impl NoticeKind {
    /// Human-readable message
    pub fn message(self) -> &'static str {
        match self {
            Self::AudioUnavailable => "Audio file is not available for this book.",
            Self::LoadFailed => "Audio could not be loaded for this book.",
            Self::PlaybackRejected { reason } => match reason {
                RejectionReason::AutoplayBlocked => {
                    "Audio playback failed. Browser blocked autoplay. Please interact with the page first."
                }
                RejectionReason::FormatUnsupported => {
                    "Audio playback failed. Audio format not supported."
                }
                RejectionReason::Unknown => {
                    "Audio playback failed. Please check your connection and try again."
                }
            },
        }
    }

    /// How long the notice stays up
    pub fn display_ms(self, config: &PlayerConfig) -> u64 {
        match self {
            Self::AudioUnavailable => config.unavailable_notice_ms,
            Self::LoadFailed | Self::PlaybackRejected { .. } => config.failure_notice_ms,
        }
    }
}

/// A notice to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// Monotonic id, used to dismiss exactly this notice
    pub id: u64,

    /// Classification
    #[serde(flatten)]
    pub kind: NoticeKind,

    /// Text to show
    pub message: String,

    /// Display duration in milliseconds
    pub display_ms: u64,
}

impl Notice {
    /// Build a notice of `kind`
    pub fn new(id: u64, kind: NoticeKind, config: &PlayerConfig) -> Self {
        Self {
            id,
            kind,
            message: kind.message().to_string(),
            display_ms: kind.display_ms(config),
        }
    }
}
