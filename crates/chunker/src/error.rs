use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur while turning a source into chunks
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// Local file could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetch failed in transport or returned a non-success status
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ChunkerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
