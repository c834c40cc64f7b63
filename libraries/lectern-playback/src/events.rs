//! Playback Events
//!
//! Two directions of event traffic:
//! - [`MediaNotification`]: lifecycle notifications fired by the media
//!   primitive, fed into the player
//! - [`PlayerEvent`]: changes the player queues for the host to drain

use crate::notice::Notice;
use crate::rate::PlaybackRate;
use crate::types::{Generation, PlaybackStatus, RejectionReason};
use lectern_core::BookId;
use serde::{Deserialize, Serialize};

/// Notifications fired by the media primitive
///
/// Arrive asynchronously and in no guaranteed order, except that
/// `MetadataResolved` precedes any non-zero duration read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MediaNotification {
    /// Duration is known (`loadedmetadata`)
    MetadataResolved {
        /// Duration in seconds
        duration: f64,
    },

    /// Playhead moved (`timeupdate`, several times per second while playing)
    #[serde(rename_all = "camelCase")]
    PositionUpdate {
        /// Position in seconds
        current_time: f64,
    },

    /// Reached the end (`ended`)
    PlaybackEnded,

    /// Loading or decoding failed (`error`)
    Error {
        /// Host-provided description, if any
        #[serde(default)]
        detail: Option<String>,
    },

    /// Playback starved (`waiting`)
    BufferingStart,

    /// Enough data to continue (`canplay`)
    CanResume,

    /// The `play()` request resolved
    PlayStarted,

    /// The `play()` request was rejected
    PlayRejected {
        /// Classified rejection
        reason: RejectionReason,
    },
}

impl MediaNotification {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::MetadataResolved { .. } => "metadata-resolved",
            Self::PositionUpdate { .. } => "position-update",
            Self::PlaybackEnded => "playback-ended",
            Self::Error { .. } => "error",
            Self::BufferingStart => "buffering-start",
            Self::CanResume => "can-resume",
            Self::PlayStarted => "play-started",
            Self::PlayRejected { .. } => "play-rejected",
        }
    }
}

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerEvent {
    /// A new binding replaced the previous one
    #[serde(rename_all = "camelCase")]
    SourceBound {
        /// Generation of the new binding
        generation: Generation,
        /// Owning book
        book_id: BookId,
        /// Resolved URL (`None` for books without audio)
        url: Option<String>,
    },

    /// Status changed
    StatusChanged {
        /// Previous status
        from: PlaybackStatus,
        /// New status
        to: PlaybackStatus,
    },

    /// Position changed (notification or seek)
    #[serde(rename_all = "camelCase")]
    PositionChanged {
        /// Position in seconds
        current_time: f64,
    },

    /// Duration became known
    DurationChanged {
        /// Duration in seconds
        duration: f64,
    },

    /// Playback rate changed
    RateChanged {
        /// New rate
        rate: PlaybackRate,
    },

    /// A notice should be shown
    NoticeRaised {
        /// The notice
        notice: Notice,
    },

    /// A notice was dismissed
    NoticeDismissed {
        /// Id of the dismissed notice
        id: u64,
    },
}
