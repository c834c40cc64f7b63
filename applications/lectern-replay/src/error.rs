/// Replay error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReplayError>;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid scenario: {0}")]
    Scenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
