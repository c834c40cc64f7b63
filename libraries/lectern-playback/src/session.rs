//! Playback session
//!
//! Mutable state of one source binding. A fresh session is created on every
//! rebind; nothing carries over between books.

use crate::error::PlaybackError;
use crate::rate::PlaybackRate;
use crate::types::{Generation, PlaybackStatus, RejectionReason};
use lectern_core::{BookId, ResolvedAudioSource};
use serde::{Deserialize, Serialize};

/// What put a session into [`PlaybackStatus::Error`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SessionFailure {
    /// Load or decode failure reported by the primitive
    Load {
        /// Host-provided description, if any
        detail: Option<String>,
    },

    /// `play()` rejected
    Rejected {
        /// Classified rejection
        reason: RejectionReason,
    },
}

impl SessionFailure {
    /// The error this failure surfaces as
    pub fn to_error(&self) -> PlaybackError {
        match self {
            Self::Load { detail } => PlaybackError::LoadError(
                detail
                    .clone()
                    .unwrap_or_else(|| "media element reported an error".to_string()),
            ),
            Self::Rejected { reason } => PlaybackError::PlaybackRejected(*reason),
        }
    }
}

/// State of the current source binding
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    generation: Generation,
    book_id: Option<BookId>,
    source: ResolvedAudioSource,
    status: PlaybackStatus,
    current_time: f64,
    duration: f64,
    rate: PlaybackRate,
    play_pending: bool,
    failure: Option<SessionFailure>,
}

impl PlaybackSession {
    /// Session before any book was bound
    pub fn unbound() -> Self {
        Self {
            generation: Generation::INITIAL,
            book_id: None,
            source: ResolvedAudioSource::none(),
            status: PlaybackStatus::Idle,
            current_time: 0.0,
            duration: 0.0,
            rate: PlaybackRate::Normal,
            play_pending: false,
            failure: None,
        }
    }

    /// Fresh session for a new binding
    ///
    /// Starts `Loading` when there is something to play, `Idle` otherwise.
    pub fn bind(generation: Generation, book_id: BookId, source: ResolvedAudioSource) -> Self {
        let status = if source.is_available() {
            PlaybackStatus::Loading
        } else {
            PlaybackStatus::Idle
        };

        Self {
            generation,
            book_id: Some(book_id),
            source,
            status,
            ..Self::unbound()
        }
    }

    /// Whether `book_id` and `source` describe this very binding
    pub fn is_same_binding(&self, book_id: &BookId, source: &ResolvedAudioSource) -> bool {
        self.book_id.as_ref() == Some(book_id) && &self.source == source
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn book_id(&self) -> Option<&BookId> {
        self.book_id.as_ref()
    }

    pub fn source(&self) -> &ResolvedAudioSource {
        &self.source
    }

    pub fn url(&self) -> Option<&str> {
        self.source.url()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }

    /// Whether a `play()` request is in flight
    pub fn is_play_pending(&self) -> bool {
        self.play_pending
    }

    pub fn failure(&self) -> Option<&SessionFailure> {
        self.failure.as_ref()
    }

    pub(crate) fn set_status(&mut self, status: PlaybackStatus) {
        self.status = status;
    }

    pub(crate) fn set_play_pending(&mut self, pending: bool) {
        self.play_pending = pending;
    }

    pub(crate) fn set_rate(&mut self, rate: PlaybackRate) {
        self.rate = rate;
    }

    /// Set the position, keeping it within `[0, duration]`
    ///
    /// Returns the stored value, or `None` for non-finite input.
    pub(crate) fn set_current_time(&mut self, seconds: f64) -> Option<f64> {
        if !seconds.is_finite() {
            return None;
        }

        self.current_time = self.clamp_position(seconds);
        Some(self.current_time)
    }

    /// Set the duration; non-finite or negative values count as unknown
    pub(crate) fn set_duration(&mut self, seconds: f64) -> f64 {
        self.duration = if seconds.is_finite() && seconds > 0.0 {
            seconds
        } else {
            0.0
        };
        self.current_time = self.clamp_position(self.current_time);
        self.duration
    }

    /// Enter the terminal error state
    pub(crate) fn fail(&mut self, failure: SessionFailure) {
        self.status = PlaybackStatus::Error;
        self.play_pending = false;
        self.failure = Some(failure);
    }

    /// Clamp into `[0, duration]`, or just `>= 0` while the duration is unknown
    pub fn clamp_position(&self, seconds: f64) -> f64 {
        if self.duration > 0.0 {
            seconds.clamp(0.0, self.duration)
        } else {
            seconds.max(0.0)
        }
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::unbound()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound_session() -> PlaybackSession {
        PlaybackSession::bind(
            Generation::new(1),
            BookId::new("1"),
            ResolvedAudioSource::from_url("http://example.org/a.mp3"),
        )
    }

    #[test]
    fn binding_with_source_starts_loading() {
        let session = bound_session();
        assert_eq!(session.status(), PlaybackStatus::Loading);
        assert_eq!(session.rate(), PlaybackRate::Normal);
        assert_eq!(session.duration(), 0.0);
    }

    #[test]
    fn binding_without_source_is_idle() {
        let session = PlaybackSession::bind(
            Generation::new(1),
            BookId::new("1"),
            ResolvedAudioSource::none(),
        );
        assert_eq!(session.status(), PlaybackStatus::Idle);
    }

    #[test]
    fn position_is_clamped_to_duration() {
        let mut session = bound_session();
        session.set_duration(120.0);

        assert_eq!(session.set_current_time(150.0), Some(120.0));
        assert_eq!(session.set_current_time(-4.0), Some(0.0));
        assert_eq!(session.set_current_time(f64::NAN), None);
        assert_eq!(session.current_time(), 0.0);
    }

    #[test]
    fn shorter_duration_pulls_position_back() {
        let mut session = bound_session();
        session.set_current_time(90.0);
        session.set_duration(60.0);
        assert_eq!(session.current_time(), 60.0);
    }

    #[test]
    fn non_finite_duration_counts_as_unknown() {
        let mut session = bound_session();
        assert_eq!(session.set_duration(f64::INFINITY), 0.0);
        assert_eq!(session.set_duration(f64::NAN), 0.0);
    }

    #[test]
    fn same_binding_requires_same_book_and_url() {
        let session = bound_session();
        let url = ResolvedAudioSource::from_url("http://example.org/a.mp3");
        assert!(session.is_same_binding(&BookId::new("1"), &url));
        assert!(!session.is_same_binding(&BookId::new("2"), &url));
        assert!(!session.is_same_binding(&BookId::new("1"), &ResolvedAudioSource::none()));
    }

    #[test]
    fn failure_maps_to_error() {
        let mut session = bound_session();
        session.set_play_pending(true);
        session.fail(SessionFailure::Rejected {
            reason: RejectionReason::Unknown,
        });

        assert_eq!(session.status(), PlaybackStatus::Error);
        assert!(!session.is_play_pending());
        assert_eq!(
            session.failure().map(SessionFailure::to_error),
            Some(PlaybackError::PlaybackRejected(RejectionReason::Unknown))
        );
    }
}
