mod book;
mod ids;

pub use book::{BookAudioRef, ResolvedAudioSource, AUDIO_FIELD_KEYS};
pub use ids::BookId;
