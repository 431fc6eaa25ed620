use thiserror::Error;

pub type Result<T> = std::result::Result<T, DriverError>;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed backend response: {0}")]
    Protocol(String),

    #[error("OpenAI backend selected but no API token configured")]
    MissingToken,
}

impl DriverError {
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }
}
