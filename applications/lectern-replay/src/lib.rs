//! Lectern Replay Library
//!
//! Replays scripted book-detail player scenarios against a simulated media
//! element and reports the player state after every step.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod replay;
pub mod scenario;
pub mod sim;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{ReplayError, Result};
pub use replay::{Replay, StepReport};
pub use scenario::{Scenario, Step};
pub use sim::{MediaCommand, SimulatedMedia};
