//! Scenario files
//!
//! A scenario is a JSON document with a list of steps:
//!
//! ```json
//! {
//!   "steps": [
//!     { "bind": { "id": 1, "audio_file": "/audio/ch1.mp3" } },
//!     { "notify": { "notification": { "type": "metadataResolved", "duration": 120 } } },
//!     "toggle",
//!     { "notify": { "notification": { "type": "playStarted" } } },
//!     { "seekFraction": 0.5 },
//!     { "notify": { "notification": { "type": "positionUpdate", "currentTime": 3 }, "generation": 0 } }
//!   ]
//! }
//! ```

use crate::error::{ReplayError, Result};
use lectern_playback::{Generation, MediaNotification};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// Free-form label, echoed in logs
    #[serde(default)]
    pub name: Option<String>,

    pub steps: Vec<Step>,
}

/// One scripted step
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    /// Bind a raw backend book record
    Bind(serde_json::Value),
    Toggle,
    SeekFraction(f64),
    SeekBy(f64),
    SkipForward,
    SkipBackward,
    /// Key pressed on the seek bar
    Key(String),
    /// Rate picked from the speed menu
    SetRate(f64),
    ToggleSpeedMenu,
    Teardown,
    /// Deliver a primitive notification
    Notify {
        notification: MediaNotification,
        /// Defaults to the current generation
        #[serde(default)]
        generation: Option<Generation>,
    },
}

impl Step {
    /// Short name for reports
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bind(_) => "bind",
            Self::Toggle => "toggle",
            Self::SeekFraction(_) => "seekFraction",
            Self::SeekBy(_) => "seekBy",
            Self::SkipForward => "skipForward",
            Self::SkipBackward => "skipBackward",
            Self::Key(_) => "key",
            Self::SetRate(_) => "setRate",
            Self::ToggleSpeedMenu => "toggleSpeedMenu",
            Self::Teardown => "teardown",
            Self::Notify { .. } => "notify",
        }
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json)?;
        if scenario.steps.is_empty() {
            return Err(ReplayError::Scenario("scenario has no steps".to_string()));
        }
        Ok(scenario)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
