use anyhow::{Context, Result};
use ragnote_driver::DriverConfig;
use ragnote_vector_store::IndexConfig;
use serde::Deserialize;
use std::path::Path;

/// Top-level TOML configuration: `[index]` and `[driver]` tables
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub index: IndexConfig,
    pub driver: DriverConfig,
}

impl AppConfig {
    /// Load from a TOML file, or fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;

        config.index.validate().context("invalid [index] config")?;
        Ok(config)
    }

    /// Embedding dimension encoded in the model id (`hash-<dim>`)
    pub fn embedding_dimension(&self) -> usize {
        self.index
            .embedding_model
            .rsplit('-')
            .next()
            .and_then(|suffix| suffix.parse().ok())
            .unwrap_or(384)
    }
}
