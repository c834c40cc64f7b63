//! Lectern - Book Audio Playback
//!
//! Playback controller for the audio attached to a book detail view.
//!
//! This crate provides:
//! - A single playback state machine (`Idle`, `Loading`, `Ready`, `Playing`,
//!   `Buffering`, `Error`)
//! - Generation-tagged notifications, so late events from a previous source
//!   never touch the current one
//! - Seeking (fraction, relative, skip buttons, arrow keys)
//! - A closed set of playback rates and a speed menu
//! - Classified, time-limited notices for failures
//! - A render-ready [`PlayerSnapshot`]
//!
//! # Architecture
//!
//! `lectern-playback` never touches a browser directly. The host audio
//! element is reached through the [`MediaPrimitive`] trait; its asynchronous
//! lifecycle events come back through [`AudioPlayer::handle_notification`].
//! The `wasm` feature provides the `HtmlAudioElement` implementation and a
//! JavaScript-facing wrapper.
//!
//! # Example
//!
//! ```rust
//! use lectern_core::{BookAudioRef, BookId, SourceResolver};
//! use lectern_playback::{
//!     AudioPlayer, Generation, MediaNotification, MediaPrimitive, PlaybackStatus,
//!     PlayerConfig, ReadyState, Result,
//! };
//!
//! // Implement MediaPrimitive for your host
//! #[derive(Default)]
//! struct SilentMedia {
//!     position: f64,
//!     rate: f64,
//! }
//!
//! impl MediaPrimitive for SilentMedia {
//!     fn load(&mut self, _url: &str) -> Result<()> { Ok(()) }
//!     fn unload(&mut self) {}
//!     fn play(&mut self, _generation: Generation) {}
//!     fn pause(&mut self) {}
//!     fn current_time(&self) -> f64 { self.position }
//!     fn set_current_time(&mut self, seconds: f64) { self.position = seconds; }
//!     fn duration(&self) -> f64 { 0.0 }
//!     fn playback_rate(&self) -> f64 { self.rate }
//!     fn set_playback_rate(&mut self, rate: f64) { self.rate = rate; }
//!     fn ready_state(&self) -> ReadyState { ReadyState::HaveEnoughData }
//!     fn attach(&mut self, _generation: Generation) {}
//!     fn detach(&mut self) {}
//! }
//!
//! let mut player = AudioPlayer::new(
//!     SilentMedia::default(),
//!     SourceResolver::default(),
//!     PlayerConfig::default(),
//! );
//!
//! player.bind_book(&BookAudioRef::new(BookId::new("7"), Some("chapter1.mp3".into())))?;
//! let generation = player.generation();
//!
//! // The host forwards element events tagged with the generation it attached with
//! player.handle_notification(generation, MediaNotification::MetadataResolved { duration: 95.0 });
//! player.toggle()?;
//! player.handle_notification(generation, MediaNotification::PlayStarted);
//!
//! let snapshot = player.snapshot();
//! assert_eq!(snapshot.status, PlaybackStatus::Playing);
//! assert_eq!(snapshot.duration_label, "1:35");
//! # Ok::<(), lectern_playback::PlaybackError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
pub mod events;
pub mod format;
pub mod notice;
mod player;
pub mod presentation;
mod primitive;
pub mod rate;
pub mod session;
pub mod snapshot;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::{MediaNotification, PlayerEvent};
pub use format::{format_clock, progress_fraction};
pub use notice::{Notice, NoticeKind};
pub use player::{AudioPlayer, ToggleAction};
pub use presentation::PresentationState;
pub use primitive::MediaPrimitive;
pub use rate::PlaybackRate;
pub use session::{PlaybackSession, SessionFailure};
pub use snapshot::PlayerSnapshot;
pub use types::{Generation, PlaybackStatus, PlayerConfig, ReadyState, RejectionReason};
