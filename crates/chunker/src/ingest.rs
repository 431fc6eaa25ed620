use crate::chunker::split_paragraphs;
use crate::config::ChunkerConfig;
use crate::error::Result;
use crate::html::extract_visible_text;
use crate::types::{Chunk, Source};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Normalizes one input source into labeled paragraph chunks
pub struct Ingestor {
    config: ChunkerConfig,
    client: reqwest::Client,
}

impl Ingestor {
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    /// Convert one source into chunks. An empty result is valid.
    pub async fn ingest(&self, source: &Source, label: &str) -> Result<Vec<Chunk>> {
        match source {
            Source::Text(content) => Ok(self.chunk_text(content, label)),
            Source::File(path) => self.chunk_file(path, label),
            Source::Url(url) => self.chunk_url(url, label).await,
        }
    }

    /// Split raw text into chunks
    pub fn chunk_text(&self, content: &str, label: &str) -> Vec<Chunk> {
        split_paragraphs(content, &self.config)
            .into_iter()
            .map(|paragraph| Chunk::new(label, paragraph))
            .collect()
    }

    /// Read a local file as UTF-8 text and split it
    pub fn chunk_file(&self, path: &Path, label: &str) -> Result<Vec<Chunk>> {
        log::info!("Ingesting file {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(self.chunk_text(&content, label))
    }

    /// Fetch a web page, reduce it to visible text, and split it.
    ///
    /// The response body is spooled through a temp file under `tmp_path`;
    /// the file is removed when the handle drops, including on error.
    pub async fn chunk_url(&self, url: &str, label: &str) -> Result<Vec<Chunk>> {
        log::info!("Fetching {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;

        let mut artifact = NamedTempFile::new_in(&self.config.tmp_path)?;
        artifact.write_all(&body)?;
        let html = std::fs::read_to_string(artifact.path())?;

        Ok(self.chunk_text(&extract_visible_text(&html), label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_LABEL;
    use pretty_assertions::assert_eq;

    fn ingestor(min_len: usize) -> Ingestor {
        Ingestor::new(ChunkerConfig {
            min_paragraph_length: min_len,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_chunk_text_applies_label() {
        let chunks = ingestor(10).chunk_text(
            "alpha beta gamma content long enough\nshort",
            "doc1",
        );

        assert_eq!(
            chunks,
            vec![Chunk::new("doc1", "alpha beta gamma content long enough")]
        );
    }

    #[tokio::test]
    async fn test_ingest_missing_file_is_io_error() {
        let source = Source::File("/nonexistent/ragnote-test-file".into());
        let err = ingestor(10).ingest(&source, DEFAULT_LABEL).await.unwrap_err();
        assert!(matches!(err, crate::ChunkerError::Io(_)));
    }

    #[tokio::test]
    async fn test_ingest_file_reads_and_splits() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"a paragraph that is long enough to keep\nno\n")
            .unwrap();

        let source = Source::File(file.path().to_path_buf());
        let chunks = ingestor(10).ingest(&source, "notes").await.unwrap();

        assert_eq!(
            chunks,
            vec![Chunk::new("notes", "a paragraph that is long enough to keep")]
        );
    }

    #[tokio::test]
    async fn test_ingest_unreachable_url_is_network_error() {
        let source = Source::Url("http://127.0.0.1:1/page".to_string());
        let err = ingestor(10).ingest(&source, DEFAULT_LABEL).await.unwrap_err();
        assert!(matches!(err, crate::ChunkerError::Network(_)));
    }
}
