use crate::embedder::Precision;
use crate::error::Result;
use ragnote_chunker::ChunkerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration surface of the retrieval index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Identifier of the embedding model backing the index
    pub embedding_model: String,

    /// Numeric precision of stored embeddings
    pub precision: Precision,

    /// Lines at or below this length (in chars) are dropped during ingestion
    pub min_paragraph_length: usize,

    /// Maximum number of chars considered per document
    pub doc_max_length: usize,

    /// Directory for transient fetch artifacts
    pub tmp_path: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        let chunker = ChunkerConfig::default();
        Self {
            embedding_model: "hash-384".to_string(),
            precision: Precision::Float32,
            min_paragraph_length: chunker.min_paragraph_length,
            doc_max_length: chunker.doc_max_length,
            tmp_path: chunker.tmp_path,
        }
    }
}

impl IndexConfig {
    /// The chunking subset of this configuration
    #[must_use]
    pub fn chunker(&self) -> ChunkerConfig {
        ChunkerConfig {
            min_paragraph_length: self.min_paragraph_length,
            doc_max_length: self.doc_max_length,
            tmp_path: self.tmp_path.clone(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.chunker().validate()?;
        Ok(())
    }
}
