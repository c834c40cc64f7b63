//! Lectern Core
//!
//! Book record types and audio source resolution for the Lectern book-detail
//! audio player.
//!
//! This crate provides:
//! - **Domain Types**: `BookId`, `BookAudioRef`, `ResolvedAudioSource`
//! - **Source Resolution**: turning loosely typed backend audio fields into one
//!   canonical, playable URL
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use lectern_core::{BookAudioRef, BookId, ResolverConfig, SourceResolver};
//!
//! let resolver = SourceResolver::new(&ResolverConfig::default());
//!
//! let book = BookAudioRef::new(BookId::new("42"), Some("/audio/ch1/intro.mp3".to_string()));
//! let source = resolver.resolve(&book);
//!
//! assert_eq!(
//!     source.url(),
//!     Some("http://127.0.0.1:8000/media/audio/ch1/intro.mp3")
//! );
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use config::ResolverConfig;
pub use error::{CoreError, Result};
pub use resolver::{clean_relative_path, SourceResolver};
pub use types::{BookAudioRef, BookId, ResolvedAudioSource, AUDIO_FIELD_KEYS};
