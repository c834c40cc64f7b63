//! Media primitive trait
//!
//! Abstracts the host-provided audio element (an `HtmlAudioElement` in the
//! browser, a simulated element in tests and the replay tool).

use crate::error::Result;
use crate::types::{Generation, ReadyState};

/// Host-provided audio playback object
///
/// Commands take effect immediately; their consequences arrive later as
/// [`crate::MediaNotification`]s that the host feeds back into
/// [`crate::AudioPlayer::handle_notification`] together with the generation
/// the primitive was attached with.
///
/// The player owns its primitive exclusively. No two players may drive the
/// same underlying element.
#[cfg_attr(test, mockall::automock)]
pub trait MediaPrimitive {
    /// Point the element at `url` and start fetching metadata
    ///
    /// # Returns
    /// * `Ok(())` - Load issued; metadata or an error arrives as a notification
    /// * `Err(_)` - The element refused the source outright
    fn load(&mut self, url: &str) -> Result<()>;

    /// Clear the source
    fn unload(&mut self);

    /// Begin playback
    ///
    /// The outcome is reported asynchronously as `PlayStarted` or
    /// `PlayRejected`, tagged with `generation`.
    fn play(&mut self, generation: Generation);

    /// Pause playback (synchronous, always succeeds)
    fn pause(&mut self);

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Move the playhead
    fn set_current_time(&mut self, seconds: f64);

    /// Duration in seconds (NaN or 0 until metadata is known)
    fn duration(&self) -> f64;

    /// Current rate multiplier
    fn playback_rate(&self) -> f64;

    /// Change the rate multiplier
    fn set_playback_rate(&mut self, rate: f64);

    /// How much media data is buffered
    fn ready_state(&self) -> ReadyState;

    /// Subscribe to lifecycle notifications for `generation`
    ///
    /// Replaces any previous subscription.
    fn attach(&mut self, generation: Generation);

    /// Release the lifecycle subscription
    fn detach(&mut self);
}
