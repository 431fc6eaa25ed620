use crate::config::IndexConfig;
use crate::embedder::Embedder;
use crate::error::{Result, VectorStoreError};
use crate::flat_index::FlatIndex;
use crate::store::ChunkStore;
use ragnote_chunker::{Chunk, Ingestor, Source, DEFAULT_LABEL};
use std::path::PathBuf;
use std::sync::Arc;

/// Probe text used to fix the index dimension at construction
const DIMENSION_PROBE: &str = "hello world";

/// Inputs for one [`RagIndex::add`] call.
///
/// Several sources may be supplied at once; they are ingested independently
/// and their chunks stored in the fixed order file, url, text.
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    text: Option<String>,
    file: Option<PathBuf>,
    url: Option<String>,
    label: Option<String>,
}

impl AddRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: raw text to split
    #[must_use]
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.text = Some(content.into());
        self
    }

    /// Builder: path to a local text file
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Builder: web page to fetch
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder: label stored with every chunk of this request
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sources in ingestion order: file, url, text
    fn sources(&self) -> Vec<Source> {
        let mut sources = Vec::new();
        if let Some(path) = &self.file {
            sources.push(Source::File(path.clone()));
        }
        if let Some(url) = &self.url {
            sources.push(Source::Url(url.clone()));
        }
        if let Some(content) = &self.text {
            sources.push(Source::Text(content.clone()));
        }
        sources
    }
}

/// Retrieval index façade owning the ingestor, the embedder seam, and the
/// two position-aligned stores.
///
/// All growth goes through [`RagIndex::add`], which embeds each source as one
/// batch and appends vectors and chunks in lockstep, so chunk id `i` and
/// vector id `i` always describe the same paragraph.
pub struct RagIndex {
    config: IndexConfig,
    embedder: Arc<dyn Embedder>,
    ingestor: Ingestor,
    index: FlatIndex,
    store: ChunkStore,
}

impl RagIndex {
    /// Build an index around an injected embedder.
    ///
    /// The embedder is probed once with a canonical string; its output length
    /// becomes the fixed dimension every stored vector must match.
    pub async fn new(config: IndexConfig, embedder: Arc<dyn Embedder>) -> Result<Self> {
        config.validate()?;
        let probe = embedder.embed(DIMENSION_PROBE).await?;
        log::info!(
            "Initializing index: model={}, dimension={}",
            config.embedding_model,
            probe.len()
        );

        let ingestor = Ingestor::new(config.chunker())?;

        Ok(Self {
            config,
            embedder,
            ingestor,
            index: FlatIndex::new(probe.len()),
            store: ChunkStore::new(),
        })
    }

    /// Ingest every supplied source and store its chunks.
    ///
    /// Each source is chunked, embedded as one batch, and appended to the
    /// vector index and the chunk store together. A source whose paragraphs
    /// are all filtered out stores nothing and is not an error. Returns the
    /// number of chunks stored by this call.
    pub async fn add(&mut self, request: AddRequest) -> Result<usize> {
        let sources = request.sources();
        if sources.is_empty() {
            return Err(VectorStoreError::EmptyRequest);
        }

        let label = request.label.as_deref().unwrap_or(DEFAULT_LABEL);
        let mut stored = 0;

        for source in &sources {
            let chunks = self.ingestor.ingest(source, label).await?;
            if chunks.is_empty() {
                log::debug!("Source produced no chunks, skipping");
                continue;
            }

            let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
            let vectors = self.embedder.embed_batch(&texts).await?;
            if vectors.len() != chunks.len() {
                return Err(VectorStoreError::Embedding(format!(
                    "embedder returned {} vectors for {} texts",
                    vectors.len(),
                    chunks.len()
                )));
            }

            // Vectors first: insert validates the whole batch before it
            // stores anything, so a failure here leaves both sides unchanged.
            stored += chunks.len();
            self.index.insert(vectors)?;
            self.store.append(chunks);
        }

        log::info!("Stored {stored} chunks, index holds {}", self.store.len());
        Ok(stored)
    }

    /// Look up a stored chunk by id
    pub fn retrieve(&self, id: usize) -> Result<&Chunk> {
        self.store.get(id)
    }

    /// Ids of the `top` chunks nearest to `query`, best first
    pub async fn search(&self, query: &str, top: usize) -> Result<Vec<usize>> {
        let query_vector = self.embedder.embed(query).await?;
        self.index.search(&query_vector, top)
    }

    /// Like [`RagIndex::search`], restricted to chunks carrying `label`.
    ///
    /// The full index is ranked first and the label applied as a post-filter,
    /// so the result still holds up to `top` ids when enough chunks match.
    pub async fn search_labeled(&self, query: &str, label: &str, top: usize) -> Result<Vec<usize>> {
        let query_vector = self.embedder.embed(query).await?;
        let mut ids = self.index.search(&query_vector, self.index.len())?;

        ids.retain(|&id| {
            self.store
                .get(id)
                .map(|chunk| chunk.label == label)
                .unwrap_or(false)
        });
        ids.truncate(top);
        Ok(ids)
    }

    /// Number of stored chunks (and vectors)
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The configuration this index was built with
    #[must_use]
    pub const fn config(&self) -> &IndexConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::{HashEmbedder, Precision};
    use pretty_assertions::assert_eq;

    async fn index_with_min_len(min_len: usize) -> RagIndex {
        let config = IndexConfig {
            min_paragraph_length: min_len,
            ..Default::default()
        };
        let embedder = Arc::new(HashEmbedder::new(64, Precision::Float32));
        RagIndex::new(config, embedder).await.unwrap()
    }

    #[tokio::test]
    async fn test_round_trip_content() {
        let mut index = index_with_min_len(10).await;

        let stored = index
            .add(
                AddRequest::new()
                    .text("alpha beta gamma content long enough\nshort\nanother sufficiently long paragraph")
                    .label("doc1"),
            )
            .await
            .unwrap();

        assert_eq!(stored, 2);
        let chunk = index.retrieve(0).unwrap();
        assert_eq!(chunk.label, "doc1");
        assert_eq!(chunk.text, "alpha beta gamma content long enough");
    }

    #[tokio::test]
    async fn test_missing_label_defaults() {
        let mut index = index_with_min_len(5).await;
        index
            .add(AddRequest::new().text("a paragraph without a label"))
            .await
            .unwrap();

        assert_eq!(index.retrieve(0).unwrap().label, DEFAULT_LABEL);
    }

    #[tokio::test]
    async fn test_fully_filtered_source_is_noop() {
        let mut index = index_with_min_len(50).await;
        let stored = index
            .add(AddRequest::new().text("all\nlines\ntoo\nshort"))
            .await
            .unwrap();

        assert_eq!(stored, 0);
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn test_empty_request_is_rejected() {
        let mut index = index_with_min_len(10).await;
        let err = index.add(AddRequest::new().label("doc1")).await.unwrap_err();
        assert!(matches!(err, VectorStoreError::EmptyRequest));
    }

    #[tokio::test]
    async fn test_search_returns_self_first() {
        let mut index = index_with_min_len(5).await;
        index
            .add(AddRequest::new().text("the quick brown fox jumps\na completely different line"))
            .await
            .unwrap();

        // The hash embedder is deterministic, so an identical query embeds
        // to distance zero from its own chunk.
        let ids = index.search("the quick brown fox jumps", 1).await.unwrap();
        assert_eq!(ids, vec![0]);
    }

    #[tokio::test]
    async fn test_search_on_empty_index_is_empty() {
        let index = index_with_min_len(10).await;
        assert!(index.search("anything", 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_out_of_range_fails() {
        let index = index_with_min_len(10).await;
        assert!(matches!(
            index.retrieve(0).unwrap_err(),
            VectorStoreError::OutOfRange { id: 0, len: 0 }
        ));
    }

    #[tokio::test]
    async fn test_ids_stable_across_searches() {
        let mut index = index_with_min_len(5).await;
        index
            .add(AddRequest::new().text("first long enough line\nsecond long enough line"))
            .await
            .unwrap();

        let first = index.search("long enough", 2).await.unwrap();
        let second = index.search("long enough", 2).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_labeled_search_filters_results() {
        let mut index = index_with_min_len(5).await;
        index
            .add(AddRequest::new().text("a paragraph about rust ownership").label("rust"))
            .await
            .unwrap();
        index
            .add(AddRequest::new().text("a paragraph about sourdough baking").label("bread"))
            .await
            .unwrap();

        let ids = index.search_labeled("a paragraph", "bread", 5).await.unwrap();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_store_and_index_stay_aligned() {
        let mut index = index_with_min_len(5).await;

        for round in 0..3 {
            index
                .add(AddRequest::new().text(format!(
                    "round {round} first long line\nshort\nround {round} second long line"
                )))
                .await
                .unwrap();
            assert_eq!(index.store.len(), index.index.len());
        }
        assert_eq!(index.len(), 6);
    }
}
