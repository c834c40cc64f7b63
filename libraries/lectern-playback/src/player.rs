//! Audio player - core orchestration
//!
//! Binds book audio to a media primitive, translates user commands into
//! primitive operations and folds the primitive's asynchronous notifications
//! back into a single consistent session.

use crate::{
    error::{PlaybackError, Result},
    events::{MediaNotification, PlayerEvent},
    notice::NoticeKind,
    presentation::PresentationState,
    primitive::MediaPrimitive,
    rate::PlaybackRate,
    session::{PlaybackSession, SessionFailure},
    snapshot::PlayerSnapshot,
    types::{Generation, PlaybackStatus, PlayerConfig, ReadyState},
};
use lectern_core::{BookAudioRef, SourceResolver};
use tracing::{debug, trace, warn};

/// What a `toggle` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// A play request was issued; `Playing` follows once confirmed
    PlayRequested,

    /// A play request was already in flight; nothing issued
    AlreadyPending,

    /// Playback paused
    Paused,
}

/// Key names handled by [`AudioPlayer::handle_seek_key`]
const KEY_SEEK_FORWARD: &str = "ArrowRight";
const KEY_SEEK_BACKWARD: &str = "ArrowLeft";

/// Book-detail audio player
///
/// Owns the media primitive, the playback session of the current binding and
/// the presentation state. Single-threaded: every method runs to completion
/// on the host's event loop, and asynchronous outcomes re-enter through
/// [`AudioPlayer::handle_notification`].
pub struct AudioPlayer<M: MediaPrimitive> {
    media: M,
    resolver: SourceResolver,
    config: PlayerConfig,

    /// Last generation handed out
    generation: Generation,

    session: PlaybackSession,
    presentation: PresentationState,

    /// Event queue for the host
    events: Vec<PlayerEvent>,

    detached: bool,
}

impl<M: MediaPrimitive> AudioPlayer<M> {
    /// Create a player around `media`
    ///
    /// Nothing is bound until [`AudioPlayer::bind_book`] is called.
    pub fn new(media: M, resolver: SourceResolver, config: PlayerConfig) -> Self {
        Self {
            media,
            resolver,
            config,
            generation: Generation::INITIAL,
            session: PlaybackSession::unbound(),
            presentation: PresentationState::new(),
            events: Vec::new(),
            detached: false,
        }
    }

    // ===== Binding =====

    /// Bind the audio of `book`
    ///
    /// Resets the session and reloads the primitive whenever the resolved URL
    /// or the owning book changed. Rebinding the exact same book and URL is a
    /// no-op and returns `Ok(false)`.
    pub fn bind_book(&mut self, book: &BookAudioRef) -> Result<bool> {
        self.ensure_attached()?;

        let source = self.resolver.resolve(book);
        if self.session.is_same_binding(&book.book_id, &source) {
            trace!(book_id = %book.book_id, "Same book and source, keeping session");
            return Ok(false);
        }

        let previous_status = self.session.status();
        let previous_rate = self.session.rate();
        if previous_status.is_playing() || self.session.is_play_pending() {
            self.media.pause();
        }
        self.media.detach();

        self.generation = self.generation.next();
        self.session = PlaybackSession::bind(self.generation, book.book_id.clone(), source);
        self.presentation.close_speed_menu();
        self.media.set_playback_rate(PlaybackRate::Normal.as_f64());

        debug!(
            generation = %self.generation,
            book_id = %book.book_id,
            url = ?self.session.url(),
            "Binding audio source"
        );

        self.events.push(PlayerEvent::SourceBound {
            generation: self.generation,
            book_id: book.book_id.clone(),
            url: self.session.url().map(str::to_string),
        });
        if previous_status != self.session.status() {
            self.events.push(PlayerEvent::StatusChanged {
                from: previous_status,
                to: self.session.status(),
            });
        }
        if previous_rate != PlaybackRate::Normal {
            self.events.push(PlayerEvent::RateChanged {
                rate: PlaybackRate::Normal,
            });
        }

        match self.session.url().map(str::to_string) {
            Some(url) => {
                self.media.attach(self.generation);
                if let Err(e) = self.media.load(&url) {
                    warn!("Error setting audio source {}: {}", url, e);
                    self.fail(SessionFailure::Load {
                        detail: Some(e.to_string()),
                    });
                }
            }
            None => self.media.unload(),
        }

        Ok(true)
    }

    // ===== Playback Control =====

    /// Play when paused, pause when playing
    ///
    /// Without a source this only raises the "audio unavailable" notice.
    /// After a failure nothing is retried until a new source is bound.
    pub fn toggle(&mut self) -> Result<ToggleAction> {
        self.ensure_attached()?;

        match self.session.status() {
            PlaybackStatus::Idle => {
                debug!("Toggle without audio source");
                self.raise_notice(NoticeKind::AudioUnavailable);
                Err(PlaybackError::NoSource)
            }
            PlaybackStatus::Error => {
                debug!("Toggle on failed source ignored");
                Err(PlaybackError::SourceFailed)
            }
            PlaybackStatus::Playing | PlaybackStatus::Buffering => {
                self.media.pause();
                self.session.set_play_pending(false);
                self.transition(PlaybackStatus::Ready);
                Ok(ToggleAction::Paused)
            }
            PlaybackStatus::Loading | PlaybackStatus::Ready => {
                if self.session.is_play_pending() {
                    trace!("Play already pending");
                    return Ok(ToggleAction::AlreadyPending);
                }

                // An element that never fetched anything needs a fresh load first
                if self.media.ready_state() == ReadyState::HaveNothing
                    && self.session.status() == PlaybackStatus::Ready
                {
                    if let Some(url) = self.session.url().map(str::to_string) {
                        debug!("Audio not ready, loading first");
                        if let Err(e) = self.media.load(&url) {
                            warn!("Reload before play failed: {}", e);
                            let failure = SessionFailure::Load {
                                detail: Some(e.to_string()),
                            };
                            let error = failure.to_error();
                            self.fail(failure);
                            return Err(error);
                        }
                        // Loading resets the element to its default rate
                        self.media.set_playback_rate(self.session.rate().as_f64());
                    }
                }

                self.session.set_play_pending(true);
                self.media.play(self.session.generation());
                debug!(generation = %self.session.generation(), "Play requested");
                Ok(ToggleAction::PlayRequested)
            }
        }
    }

    // ===== Seeking =====

    /// Seek to a fraction of the duration
    ///
    /// Ignored while the duration is unknown or the source failed. The session
    /// position is updated immediately, without waiting for the primitive.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<f64> {
        self.ensure_attached()?;
        self.ensure_seekable()?;

        if !fraction.is_finite() {
            return Err(PlaybackError::SeekIgnored);
        }

        let target = fraction.clamp(0.0, 1.0) * self.session.duration();
        Ok(self.apply_seek(target))
    }

    /// Seek relative to the current position, clamped to `[0, duration]`
    pub fn seek_by(&mut self, delta_seconds: f64) -> Result<f64> {
        self.ensure_attached()?;
        self.ensure_seekable()?;

        if !delta_seconds.is_finite() {
            return Err(PlaybackError::SeekIgnored);
        }

        let target = self
            .session
            .clamp_position(self.session.current_time() + delta_seconds);
        Ok(self.apply_seek(target))
    }

    /// Skip forward by the configured skip distance
    pub fn skip_forward(&mut self) -> Result<f64> {
        self.seek_by(self.config.skip_seconds)
    }

    /// Skip backward by the configured skip distance
    pub fn skip_backward(&mut self) -> Result<f64> {
        self.seek_by(-self.config.skip_seconds)
    }

    /// Handle a key press on the seek bar
    ///
    /// Returns `Ok(false)` for keys the seek bar does not use.
    pub fn handle_seek_key(&mut self, key: &str) -> Result<bool> {
        let delta = match key {
            KEY_SEEK_FORWARD => self.config.keyboard_step_seconds,
            KEY_SEEK_BACKWARD => -self.config.keyboard_step_seconds,
            _ => return Ok(false),
        };

        self.seek_by(delta)?;
        Ok(true)
    }

    // ===== Rate =====

    /// Set the playback rate
    ///
    /// Applies immediately whether playing or paused. Values outside the
    /// supported set are rejected and leave the rate unchanged. Disabled
    /// while no source is bound.
    pub fn set_rate(&mut self, rate: f64) -> Result<PlaybackRate> {
        self.ensure_attached()?;
        if self.session.status() == PlaybackStatus::Idle {
            return Err(PlaybackError::NoSource);
        }

        let rate = PlaybackRate::try_from(rate)?;
        self.media.set_playback_rate(rate.as_f64());

        if self.session.rate() != rate {
            self.session.set_rate(rate);
            self.events.push(PlayerEvent::RateChanged { rate });
        }

        Ok(rate)
    }

    /// Pick a rate from the speed menu, closing the menu
    pub fn select_rate(&mut self, rate: f64) -> Result<PlaybackRate> {
        let rate = self.set_rate(rate)?;
        self.presentation.close_speed_menu();
        Ok(rate)
    }

    /// Open or close the speed menu
    pub fn toggle_speed_menu(&mut self) -> bool {
        self.presentation.toggle_speed_menu()
    }

    // ===== Notices =====

    /// Dismiss the notice with `id` once its display time is over
    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        let dismissed = self.presentation.dismiss_notice(id);
        if dismissed {
            self.events.push(PlayerEvent::NoticeDismissed { id });
        }
        dismissed
    }

    // ===== Notifications =====

    /// Fold a primitive notification into the session
    ///
    /// Notifications from another generation than the current binding, or
    /// arriving after teardown, are discarded. Returns whether the
    /// notification changed anything.
    pub fn handle_notification(
        &mut self,
        generation: Generation,
        notification: MediaNotification,
    ) -> bool {
        if self.detached {
            trace!(notification = notification.name(), "Notification after teardown discarded");
            return false;
        }

        if generation != self.session.generation() {
            trace!(
                notification = notification.name(),
                stale = %generation,
                current = %self.session.generation(),
                "Stale notification discarded"
            );
            return false;
        }

        let status = self.session.status();
        if !status.is_live() {
            trace!(notification = notification.name(), %status, "Notification ignored");
            return false;
        }

        match notification {
            MediaNotification::MetadataResolved { duration } => {
                let duration = self.session.set_duration(duration);
                debug!("Audio loaded, duration: {}", duration);
                self.events.push(PlayerEvent::DurationChanged { duration });
                if status == PlaybackStatus::Loading {
                    self.transition(PlaybackStatus::Ready);
                }
                true
            }

            MediaNotification::PositionUpdate { current_time } => {
                if !status.is_playing() {
                    return false;
                }
                match self.session.set_current_time(current_time) {
                    Some(current_time) => {
                        self.events.push(PlayerEvent::PositionChanged { current_time });
                        true
                    }
                    None => false,
                }
            }

            MediaNotification::PlaybackEnded => {
                if !status.is_playing() {
                    return false;
                }
                debug!("Audio playback ended");
                self.session.set_play_pending(false);
                self.session.set_current_time(0.0);
                self.events.push(PlayerEvent::PositionChanged { current_time: 0.0 });
                self.transition(PlaybackStatus::Ready);
                true
            }

            MediaNotification::Error { detail } => {
                warn!("Audio error event: {}", detail.as_deref().unwrap_or("unknown"));
                self.fail(SessionFailure::Load { detail });
                true
            }

            MediaNotification::BufferingStart => {
                if status != PlaybackStatus::Playing {
                    return false;
                }
                debug!("Audio waiting/buffering");
                self.transition(PlaybackStatus::Buffering);
                true
            }

            MediaNotification::CanResume => {
                if status != PlaybackStatus::Buffering {
                    return false;
                }
                self.transition(PlaybackStatus::Playing);
                true
            }

            MediaNotification::PlayStarted => {
                if !self.session.is_play_pending() {
                    trace!("Unrequested play confirmation ignored");
                    return false;
                }
                debug!("Audio playback started");
                self.session.set_play_pending(false);
                self.transition(PlaybackStatus::Playing);
                true
            }

            MediaNotification::PlayRejected { reason } => {
                if !self.session.is_play_pending() {
                    return false;
                }
                warn!("Audio play() request rejected: {}", reason);
                self.fail(SessionFailure::Rejected { reason });
                true
            }
        }
    }

    // ===== Teardown =====

    /// Release the primitive subscription
    ///
    /// Afterwards notifications are discarded and commands fail with
    /// [`PlaybackError::Detached`]. Idempotent.
    pub fn teardown(&mut self) {
        if self.detached {
            return;
        }

        debug!(generation = %self.session.generation(), "Tearing down audio player");
        if self.session.status().is_playing() || self.session.is_play_pending() {
            self.media.pause();
        }
        self.session.set_play_pending(false);
        if self.session.status().is_playing() {
            self.transition(PlaybackStatus::Ready);
        }
        self.media.detach();
        self.detached = true;
    }

    // ===== State Queries =====

    /// Snapshot for rendering
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot::capture(&self.session, &self.presentation)
    }

    pub fn status(&self) -> PlaybackStatus {
        self.session.status()
    }

    /// Generation of the current binding
    pub fn generation(&self) -> Generation {
        self.session.generation()
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn resolver(&self) -> &SourceResolver {
        &self.resolver
    }

    /// The owned media primitive
    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    // ===== Internal =====

    fn ensure_attached(&self) -> Result<()> {
        if self.detached {
            Err(PlaybackError::Detached)
        } else {
            Ok(())
        }
    }

    fn ensure_seekable(&self) -> Result<()> {
        if !self.session.status().is_live() || self.session.duration() <= 0.0 {
            trace!(status = %self.session.status(), "Seek ignored");
            return Err(PlaybackError::SeekIgnored);
        }
        Ok(())
    }

    fn apply_seek(&mut self, target: f64) -> f64 {
        self.media.set_current_time(target);
        let current_time = self.session.set_current_time(target).unwrap_or(0.0);
        self.events.push(PlayerEvent::PositionChanged { current_time });
        current_time
    }

    fn transition(&mut self, to: PlaybackStatus) {
        let from = self.session.status();
        if from == to {
            return;
        }

        debug!("Playback status {} -> {}", from, to);
        self.session.set_status(to);
        self.events.push(PlayerEvent::StatusChanged { from, to });
    }

    fn fail(&mut self, failure: SessionFailure) {
        let from = self.session.status();
        let kind = match failure {
            SessionFailure::Load { .. } => NoticeKind::LoadFailed,
            SessionFailure::Rejected { reason } => NoticeKind::PlaybackRejected { reason },
        };

        self.session.fail(failure);
        if from != PlaybackStatus::Error {
            self.events.push(PlayerEvent::StatusChanged {
                from,
                to: PlaybackStatus::Error,
            });
        }
        self.raise_notice(kind);
    }

    fn raise_notice(&mut self, kind: NoticeKind) {
        let notice = self.presentation.raise_notice(kind, &self.config);
        self.events.push(PlayerEvent::NoticeRaised { notice });
    }
}

impl<M: MediaPrimitive> Drop for AudioPlayer<M> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::MockMediaPrimitive;
    use crate::types::RejectionReason;
    use lectern_core::BookId;
    use mockall::predicate::eq;

    fn book(id: &str, audio: Option<&str>) -> BookAudioRef {
        BookAudioRef::new(BookId::new(id), audio.map(str::to_string))
    }

    /// Mock accepting the subscription and pause bookkeeping
    ///
    /// Tests add expectations for `load`, `play`, `ready_state` and
    /// `set_playback_rate` themselves.
    fn base_media() -> MockMediaPrimitive {
        let mut media = MockMediaPrimitive::new();
        media.expect_unload().return_const(());
        media.expect_attach().return_const(());
        media.expect_detach().return_const(());
        media.expect_set_current_time().return_const(());
        media.expect_pause().return_const(());
        media
    }

    fn player(media: MockMediaPrimitive) -> AudioPlayer<MockMediaPrimitive> {
        AudioPlayer::new(media, SourceResolver::default(), PlayerConfig::default())
    }

    #[test]
    fn rapid_toggles_issue_one_play_request() {
        let mut media = base_media();
        media.expect_load().returning(|_| Ok(()));
        media.expect_set_playback_rate().return_const(());
        media
            .expect_ready_state()
            .return_const(ReadyState::HaveEnoughData);
        media.expect_play().times(1).return_const(());

        let mut player = player(media);
        player.bind_book(&book("1", Some("a.mp3"))).unwrap();
        let generation = player.generation();
        player.handle_notification(
            generation,
            MediaNotification::MetadataResolved { duration: 60.0 },
        );

        assert_eq!(player.toggle().unwrap(), ToggleAction::PlayRequested);
        assert_eq!(player.toggle().unwrap(), ToggleAction::AlreadyPending);
        assert_eq!(player.status(), PlaybackStatus::Ready);
        assert!(player.session().is_play_pending());
    }

    #[test]
    fn binding_loads_resolved_url_under_new_generation() {
        let mut media = MockMediaPrimitive::new();
        media.expect_detach().return_const(());
        media
            .expect_set_playback_rate()
            .with(eq(1.0))
            .return_const(());
        media
            .expect_attach()
            .with(eq(Generation::new(1)))
            .times(1)
            .return_const(());
        media
            .expect_load()
            .with(eq("http://127.0.0.1:8000/media/audio/x/y.mp3"))
            .times(1)
            .returning(|_| Ok(()));

        let mut player = player(media);
        assert!(player.bind_book(&book("1", Some("/audio/x/y.mp3"))).unwrap());
        assert_eq!(player.status(), PlaybackStatus::Loading);
    }

    #[test]
    fn refused_load_fails_the_binding() {
        let mut media = base_media();
        media.expect_set_playback_rate().return_const(());
        media
            .expect_load()
            .returning(|_| Err(PlaybackError::LoadError("bad src".to_string())));

        let mut player = player(media);
        player.bind_book(&book("1", Some("a.mp3"))).unwrap();

        assert_eq!(player.status(), PlaybackStatus::Error);
        assert_eq!(
            player.presentation().notice().map(|n| n.kind),
            Some(NoticeKind::LoadFailed)
        );
    }

    #[test]
    fn book_without_audio_unloads_and_stays_idle() {
        let mut media = MockMediaPrimitive::new();
        media.expect_detach().return_const(());
        media.expect_set_playback_rate().return_const(());
        media.expect_unload().times(1).return_const(());
        media.expect_attach().never();
        media.expect_load().never();
        media.expect_play().never();

        let mut player = player(media);
        player.bind_book(&book("1", None)).unwrap();

        assert_eq!(player.status(), PlaybackStatus::Idle);
        assert_eq!(player.toggle(), Err(PlaybackError::NoSource));
        assert_eq!(player.seek_by(10.0), Err(PlaybackError::SeekIgnored));
        assert_eq!(
            player.presentation().notice().map(|n| n.message.as_str()),
            Some("Audio file is not available for this book.")
        );
    }

    #[test]
    fn reloads_before_play_when_nothing_fetched() {
        let mut media = base_media();
        media.expect_set_playback_rate().return_const(());
        media
            .expect_ready_state()
            .return_const(ReadyState::HaveNothing);
        // initial bind + reload before play
        media.expect_load().times(2).returning(|_| Ok(()));
        media.expect_play().times(1).return_const(());

        let mut player = player(media);
        player.bind_book(&book("1", Some("a.mp3"))).unwrap();
        let generation = player.generation();
        player.handle_notification(
            generation,
            MediaNotification::MetadataResolved { duration: 30.0 },
        );

        assert_eq!(player.toggle().unwrap(), ToggleAction::PlayRequested);
    }

    #[test]
    fn rate_applies_while_paused_and_rejects_unknown_values() {
        let mut media = base_media();
        media.expect_load().returning(|_| Ok(()));
        media
            .expect_set_playback_rate()
            .with(eq(1.0))
            .return_const(());
        media
            .expect_set_playback_rate()
            .with(eq(1.5))
            .times(1)
            .return_const(());

        let mut player = player(media);
        player.bind_book(&book("1", Some("a.mp3"))).unwrap();

        assert_eq!(player.set_rate(1.5).unwrap(), PlaybackRate::OneAndHalf);
        assert_eq!(player.set_rate(3.0), Err(PlaybackError::InvalidRate(3.0)));
        assert_eq!(player.session().rate(), PlaybackRate::OneAndHalf);
    }

    #[test]
    fn rejection_is_classified() {
        let mut media = base_media();
        media.expect_load().returning(|_| Ok(()));
        media.expect_set_playback_rate().return_const(());
        media
            .expect_ready_state()
            .return_const(ReadyState::HaveEnoughData);
        media.expect_play().times(1).return_const(());

        let mut player = player(media);
        player.bind_book(&book("1", Some("a.mp3"))).unwrap();
        let generation = player.generation();

        player.toggle().unwrap();
        assert!(player.handle_notification(
            generation,
            MediaNotification::PlayRejected {
                reason: RejectionReason::FormatUnsupported
            }
        ));

        assert_eq!(player.status(), PlaybackStatus::Error);
        assert_eq!(
            player.session().failure().map(SessionFailure::to_error),
            Some(PlaybackError::PlaybackRejected(
                RejectionReason::FormatUnsupported
            ))
        );
        assert_eq!(player.toggle(), Err(PlaybackError::SourceFailed));
    }

    #[test]
    fn teardown_detaches_once() {
        let mut media = MockMediaPrimitive::new();
        media.expect_attach().return_const(());
        media.expect_load().returning(|_| Ok(()));
        media.expect_set_playback_rate().return_const(());
        // one detach for the bind, one for teardown; drop must not add another
        media.expect_detach().times(2).return_const(());

        let mut player = player(media);
        player.bind_book(&book("1", Some("a.mp3"))).unwrap();

        player.teardown();
        player.teardown();
        assert!(player.is_detached());
        assert_eq!(player.toggle(), Err(PlaybackError::Detached));
        assert!(!player.handle_notification(
            player.generation(),
            MediaNotification::MetadataResolved { duration: 10.0 }
        ));
    }
}
