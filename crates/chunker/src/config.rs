use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for paragraph chunking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Lines at or below this length (in chars) are dropped
    pub min_paragraph_length: usize,

    /// Maximum number of chars considered per document; the rest is ignored
    pub doc_max_length: usize,

    /// Directory for transient fetch artifacts
    pub tmp_path: PathBuf,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            min_paragraph_length: 32,
            doc_max_length: 100_000,
            tmp_path: std::env::temp_dir(),
        }
    }
}

impl ChunkerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.doc_max_length == 0 {
            return Err(ChunkerError::invalid_config("doc_max_length must be > 0"));
        }

        if self.min_paragraph_length >= self.doc_max_length {
            return Err(ChunkerError::invalid_config(format!(
                "min_paragraph_length ({}) must be below doc_max_length ({})",
                self.min_paragraph_length, self.doc_max_length
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(ChunkerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ChunkerConfig::default();

        config.doc_max_length = 0;
        assert!(config.validate().is_err());

        config.doc_max_length = 10;
        config.min_paragraph_length = 10;
        assert!(config.validate().is_err());

        config.min_paragraph_length = 5;
        assert!(config.validate().is_ok());
    }
}
