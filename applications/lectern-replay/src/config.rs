/// Replay configuration
use crate::error::{ReplayError, Result};
use lectern_core::ResolverConfig;
use lectern_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub player: PlayerConfig,
}

impl AppConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables use the `LECTERN_` prefix and `__` between
    /// nesting levels, e.g. `LECTERN_RESOLVER__MEDIA_AUDIO_BASE`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ReplayError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            settings = settings.add_source(config::File::from(path.to_path_buf()));
        }

        // Override with environment variables (prefixed with LECTERN_)
        settings = settings.add_source(
            config::Environment::with_prefix("LECTERN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ReplayError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ReplayError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.resolver
            .validate()
            .map_err(|e| ReplayError::Config(e.to_string()))?;

        self.player
            .validate()
            .map_err(|e| ReplayError::Config(e.to_string()))?;

        Ok(())
    }
}
