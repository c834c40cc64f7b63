//! WASM bindings for lectern-playback
//!
//! Drives an `HtmlAudioElement` through the core [`crate::AudioPlayer`] and
//! exposes a JavaScript-friendly wrapper for the book detail page.

pub mod media;
pub mod player;

pub use media::{HtmlMediaPrimitive, NotificationSink};
pub use player::WasmAudioPlayer;
