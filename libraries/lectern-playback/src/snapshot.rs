//! View-state snapshot consumed by the rendering layer

use crate::format::{format_clock, progress_fraction};
use crate::notice::Notice;
use crate::presentation::PresentationState;
use crate::rate::PlaybackRate;
use crate::session::{PlaybackSession, SessionFailure};
use crate::types::PlaybackStatus;
use serde::{Deserialize, Serialize};

/// Everything a renderer needs, computed in one place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub status: PlaybackStatus,
    pub current_time: f64,
    pub duration: f64,
    pub playback_rate: PlaybackRate,
    pub speed_menu_open: bool,
    pub is_source_available: bool,
    pub is_playing: bool,
    pub is_play_pending: bool,
    pub is_buffering: bool,
    /// `m:ss` of `current_time`
    pub current_time_label: String,
    /// `m:ss` of `duration`
    pub duration_label: String,
    /// Played fraction in `[0, 1]`
    pub progress_fraction: f64,
    pub notice: Option<Notice>,
    pub failure: Option<SessionFailure>,
}

impl PlayerSnapshot {
    /// Capture session and presentation state
    pub fn capture(session: &PlaybackSession, presentation: &PresentationState) -> Self {
        let status = session.status();

        Self {
            status,
            current_time: session.current_time(),
            duration: session.duration(),
            playback_rate: session.rate(),
            speed_menu_open: presentation.speed_menu_open(),
            is_source_available: session.source().is_available(),
            is_playing: status.is_playing(),
            is_play_pending: session.is_play_pending(),
            is_buffering: status == PlaybackStatus::Buffering,
            current_time_label: format_clock(session.current_time()),
            duration_label: format_clock(session.duration()),
            progress_fraction: progress_fraction(session.current_time(), session.duration()),
            notice: presentation.notice().cloned(),
            failure: session.failure().cloned(),
        }
    }
}
