/// Core error types for Lectern
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Lectern
#[derive(Error, Debug)]
pub enum CoreError {
    /// Book record carries no usable identity
    #[error("Book record has no id")]
    MissingBookId,

    /// Book record is not shaped like a record at all
    #[error("Invalid book record: {0}")]
    InvalidRecord(String),

    /// Configuration rejected during validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an invalid record error
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
