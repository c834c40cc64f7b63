//! Source resolution
//!
//! Derives a single, unambiguous playable URL from a book's raw audio field.
//! Backend-provided absolute URLs are trusted verbatim; relative paths are
//! cleaned and joined onto the configured media base.
//!
//! Cleaning is a single pass: one leading `/` and then one leading `audio/`
//! segment are removed. Paths such as `audio/audio/x.mp3` keep their second
//! `audio/` on purpose; nested duplication is a backend data problem.

use crate::config::ResolverConfig;
use crate::types::{BookAudioRef, ResolvedAudioSource};
use tracing::{debug, trace};

/// Directory segment the media base already ends in
const AUDIO_SEGMENT: &str = "audio/";

/// Resolves book audio references into playable URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResolver {
    /// Media base without trailing slash
    base: String,
}

impl SourceResolver {
    /// Create a resolver from configuration
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            base: config.media_audio_base.trim_end_matches('/').to_string(),
        }
    }

    /// The normalized media base
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolve a book's audio reference
    pub fn resolve(&self, book: &BookAudioRef) -> ResolvedAudioSource {
        let source = self.resolve_raw(book.raw_audio_field.as_deref());
        trace!(book_id = %book.book_id, url = ?source.url(), "Resolved audio source");
        source
    }

    /// Resolve a raw audio field
    ///
    /// Never fails: missing or blank input resolves to no source.
    pub fn resolve_raw(&self, raw: Option<&str>) -> ResolvedAudioSource {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return ResolvedAudioSource::none();
        };

        if raw.starts_with("http") {
            return ResolvedAudioSource::from_url(raw);
        }

        let url = format!("{}/{}", self.base, clean_relative_path(raw));
        debug!("Constructed audio URL: {}", url);
        ResolvedAudioSource::from_url(url)
    }
}

impl Default for SourceResolver {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}

/// Strip one leading `/` and then one leading `audio/` segment
///
/// Case-sensitive. A non-prefix `audio/` is left untouched.
pub fn clean_relative_path(raw: &str) -> &str {
    let path = raw.strip_prefix('/').unwrap_or(raw);
    path.strip_prefix(AUDIO_SEGMENT).unwrap_or(path)
}
