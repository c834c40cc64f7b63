/// Resolver configuration
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for [`crate::SourceResolver`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Base URL (or absolute path) that relative audio paths are joined onto
    #[serde(default = "default_media_audio_base")]
    pub media_audio_base: String,
}

impl ResolverConfig {
    /// Create a configuration with a custom media base
    pub fn with_base(media_audio_base: impl Into<String>) -> Self {
        Self {
            media_audio_base: media_audio_base.into(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base = self.media_audio_base.trim();

        if base.is_empty() {
            return Err(CoreError::config("media_audio_base must not be empty"));
        }

        if !base.starts_with("http") && !base.starts_with('/') {
            return Err(CoreError::config(format!(
                "media_audio_base must be an http(s) URL or an absolute path, got {:?}",
                self.media_audio_base
            )));
        }

        Ok(())
    }
}

fn default_media_audio_base() -> String {
    "http://127.0.0.1:8000/media/audio".to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            media_audio_base: default_media_audio_base(),
        }
    }
}
