/// Core error types for Aria
use thiserror::Error;

/// Result type alias using `AriaError`
pub type Result<T> = std::result::Result<T, AriaError>;

/// Core error type for Aria
#[derive(Error, Debug)]
pub enum AriaError {
    /// Track index could not be loaded or parsed
    #[error("Index error: {0}")]
    Index(String),
}

impl AriaError {
    /// Create an index error
    pub fn index(msg: impl Into<String>) -> Self {
        Self::Index(msg.into())
    }
}
