//! Error types for playback control

use crate::types::RejectionReason;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The bound book has no audio
    #[error("No audio source bound")]
    NoSource,

    /// The primitive could not load the source or resolve its metadata
    #[error("Audio could not be loaded: {0}")]
    LoadError(String),

    /// The primitive refused to start playback
    #[error("Playback rejected: {0}")]
    PlaybackRejected(RejectionReason),

    /// Seek issued while the duration is unknown or the source has failed
    #[error("Seek ignored")]
    SeekIgnored,

    /// Rate outside the supported set
    #[error("Unsupported playback rate: {0}")]
    InvalidRate(f64),

    /// The current binding already failed; bind a new source to recover
    #[error("Audio source has failed; bind a new source to retry")]
    SourceFailed,

    /// The player was torn down
    #[error("Player has been torn down")]
    Detached,

    /// Configuration rejected during validation
    #[error("Invalid player configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
