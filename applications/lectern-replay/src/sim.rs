//! Simulated media element
//!
//! Stands in for a browser audio element: accepts every command, keeps the
//! values it was given and logs each call. Notifications are not generated
//! here; scenarios script them explicitly.

use lectern_playback::{Generation, MediaPrimitive, ReadyState, Result};
use serde::Serialize;

/// Command received by the simulated element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum MediaCommand {
    Load { url: String },
    Unload,
    Play { generation: Generation },
    Pause,
    #[serde(rename_all = "camelCase")]
    SetCurrentTime { seconds: f64 },
    #[serde(rename_all = "camelCase")]
    SetPlaybackRate { rate: f64 },
    Attach { generation: Generation },
    Detach,
}

#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    log: Vec<MediaCommand>,
    src: Option<String>,
    attached: Option<Generation>,
    current_time: f64,
    playback_rate: f64,
    ready_state: ReadyState,
}

impl SimulatedMedia {
    pub fn new() -> Self {
        Self {
            log: Vec::new(),
            src: None,
            attached: None,
            current_time: 0.0,
            playback_rate: 1.0,
            ready_state: ReadyState::HaveNothing,
        }
    }

    /// Every command received so far
    pub fn log(&self) -> &[MediaCommand] {
        &self.log
    }

    /// Current source URL
    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    /// Generation the element is subscribed for
    pub fn attached(&self) -> Option<Generation> {
        self.attached
    }
}

impl Default for SimulatedMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaPrimitive for SimulatedMedia {
    fn load(&mut self, url: &str) -> Result<()> {
        self.log.push(MediaCommand::Load {
            url: url.to_string(),
        });
        self.src = Some(url.to_string());
        self.current_time = 0.0;
        // A simulated fetch completes immediately
        self.ready_state = ReadyState::HaveEnoughData;
        Ok(())
    }

    fn unload(&mut self) {
        self.log.push(MediaCommand::Unload);
        self.src = None;
        self.current_time = 0.0;
        self.ready_state = ReadyState::HaveNothing;
    }

    fn play(&mut self, generation: Generation) {
        self.log.push(MediaCommand::Play { generation });
    }

    fn pause(&mut self) {
        self.log.push(MediaCommand::Pause);
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.log.push(MediaCommand::SetCurrentTime { seconds });
        self.current_time = seconds;
    }

    fn duration(&self) -> f64 {
        f64::NAN
    }

    fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.log.push(MediaCommand::SetPlaybackRate { rate });
        self.playback_rate = rate;
    }

    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    fn attach(&mut self, generation: Generation) {
        self.log.push(MediaCommand::Attach { generation });
        self.attached = Some(generation);
    }

    fn detach(&mut self) {
        self.log.push(MediaCommand::Detach);
        self.attached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_and_unload_track_source() {
        let mut media = SimulatedMedia::new();
        media.load("http://example.org/a.mp3").unwrap();
        assert_eq!(media.src(), Some("http://example.org/a.mp3"));
        assert_eq!(media.ready_state(), ReadyState::HaveEnoughData);

        media.unload();
        assert_eq!(media.src(), None);
        assert_eq!(media.ready_state(), ReadyState::HaveNothing);
        assert_eq!(media.log().len(), 2);
    }

    #[test]
    fn command_log_serializes_tagged() {
        let json = serde_json::to_string(&MediaCommand::SetPlaybackRate { rate: 1.5 }).unwrap();
        assert_eq!(json, r#"{"command":"setPlaybackRate","rate":1.5}"#);
    }
}
