//! Scenario runner

use crate::config::AppConfig;
use crate::scenario::{Scenario, Step};
use crate::sim::{MediaCommand, SimulatedMedia};
use lectern_core::{BookAudioRef, SourceResolver};
use lectern_playback::{AudioPlayer, PlayerEvent, PlayerSnapshot};
use serde::Serialize;
use tracing::{debug, info};

/// Result of one replayed step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    /// 1-based step number
    pub step: usize,
    pub action: &'static str,
    /// Command error, if the player refused the step
    pub error: Option<String>,
    pub events: Vec<PlayerEvent>,
    pub snapshot: PlayerSnapshot,
}

/// Replays scenario steps against a player driving a simulated element
pub struct Replay {
    player: AudioPlayer<SimulatedMedia>,
    steps_run: usize,
}

impl Replay {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            player: AudioPlayer::new(
                SimulatedMedia::new(),
                SourceResolver::new(&config.resolver),
                config.player.clone(),
            ),
            steps_run: 0,
        }
    }

    /// Apply one step and report the resulting state
    pub fn apply(&mut self, step: &Step) -> StepReport {
        self.steps_run += 1;
        let error = self.execute(step).err();

        if let Some(error) = &error {
            debug!(step = self.steps_run, action = step.name(), "Step refused: {}", error);
        }

        StepReport {
            step: self.steps_run,
            action: step.name(),
            error,
            events: self.player.drain_events(),
            snapshot: self.player.snapshot(),
        }
    }

    /// Apply every step of `scenario`
    pub fn run(&mut self, scenario: &Scenario) -> Vec<StepReport> {
        info!(
            name = scenario.name.as_deref().unwrap_or("unnamed"),
            steps = scenario.steps.len(),
            "Replaying scenario"
        );
        scenario.steps.iter().map(|step| self.apply(step)).collect()
    }

    /// Commands the simulated element received so far
    pub fn media_log(&self) -> &[MediaCommand] {
        self.player.media().log()
    }

    pub fn player(&self) -> &AudioPlayer<SimulatedMedia> {
        &self.player
    }

    fn execute(&mut self, step: &Step) -> Result<(), String> {
        let player = &mut self.player;

        match step {
            Step::Bind(record) => {
                let book = BookAudioRef::from_record(record).map_err(|e| e.to_string())?;
                player.bind_book(&book).map(drop).map_err(|e| e.to_string())
            }
            Step::Toggle => player.toggle().map(drop).map_err(|e| e.to_string()),
            Step::SeekFraction(fraction) => player
                .seek_to_fraction(*fraction)
                .map(drop)
                .map_err(|e| e.to_string()),
            Step::SeekBy(delta) => player.seek_by(*delta).map(drop).map_err(|e| e.to_string()),
            Step::SkipForward => player.skip_forward().map(drop).map_err(|e| e.to_string()),
            Step::SkipBackward => player.skip_backward().map(drop).map_err(|e| e.to_string()),
            Step::Key(key) => player
                .handle_seek_key(key)
                .map(drop)
                .map_err(|e| e.to_string()),
            Step::SetRate(rate) => player
                .select_rate(*rate)
                .map(drop)
                .map_err(|e| e.to_string()),
            Step::ToggleSpeedMenu => {
                player.toggle_speed_menu();
                Ok(())
            }
            Step::Teardown => {
                player.teardown();
                Ok(())
            }
            Step::Notify {
                notification,
                generation,
            } => {
                let generation = generation.unwrap_or_else(|| player.generation());
                player.handle_notification(generation, notification.clone());
                Ok(())
            }
        }
    }
}
