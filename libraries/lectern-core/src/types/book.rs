//! Book record value objects consumed by the player

use super::ids::BookId;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Record keys that may hold the audio path, in lookup order
///
/// Different backend endpoints spell the field differently; the first key
/// holding a non-empty value wins. Null, `false`, `0` and `""` are skipped.
pub const AUDIO_FIELD_KEYS: [&str; 5] = [
    "audio_file",
    "audioSrc",
    "audioLink",
    "audio_clip",
    "audioURL",
];

/// Audio reference carried by a book record
///
/// Supplied fresh whenever the host page loads or changes books. The player
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAudioRef {
    /// Identity of the owning book
    pub book_id: BookId,

    /// Raw audio path or URL exactly as the backend sent it
    pub raw_audio_field: Option<String>,
}

impl BookAudioRef {
    /// Create a new audio reference
    pub fn new(book_id: BookId, raw_audio_field: Option<String>) -> Self {
        Self {
            book_id,
            raw_audio_field,
        }
    }

    /// Reference for a book that has no audio at all
    pub fn without_audio(book_id: BookId) -> Self {
        Self::new(book_id, None)
    }

    /// Build from a raw backend book record
    ///
    /// The identity comes from `id` (number or string). The audio field is the
    /// first of [`AUDIO_FIELD_KEYS`] holding a non-empty value; a non-string
    /// value there means "no audio".
    pub fn from_record(record: &Value) -> Result<Self> {
        let object = record
            .as_object()
            .ok_or_else(|| CoreError::invalid_record("expected a JSON object"))?;

        let book_id = match object.get("id") {
            Some(Value::Number(n)) => BookId::new(n.to_string()),
            Some(Value::String(s)) if !s.trim().is_empty() => BookId::new(s.trim()),
            _ => return Err(CoreError::MissingBookId),
        };

        let raw_audio_field = AUDIO_FIELD_KEYS
            .iter()
            .filter_map(|key| object.get(*key))
            .find(|value| is_present(value))
            .and_then(|value| value.as_str())
            .map(str::to_string);

        Ok(Self {
            book_id,
            raw_audio_field,
        })
    }

    /// Parse a JSON book record
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_record(&value)
    }
}

/// Whether a record value counts as set
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Canonical playable URL derived from a [`BookAudioRef`]
///
/// Purely derived: recomputed on every book change, never cached across books.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedAudioSource {
    /// Playable URL, or `None` when the book has no audio
    pub url: Option<String>,
}

impl ResolvedAudioSource {
    /// A source with nothing to play
    pub fn none() -> Self {
        Self { url: None }
    }

    /// A source pointing at `url`
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// Borrow the URL
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Whether there is anything to play
    pub fn is_available(&self) -> bool {
        self.url.is_some()
    }
}
