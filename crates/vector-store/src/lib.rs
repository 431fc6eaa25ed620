//! # Ragnote Vector Store
//!
//! In-memory retrieval index over paragraph chunks.
//!
//! ## Architecture
//!
//! ```text
//! Source (text | file | url)
//!     │
//!     ├──> Ingestor ──> Chunk[]
//!     │
//!     ├──> Embedder (batch) ──> Vector[dim]
//!     │
//!     └──> lockstep append
//!          ├─> ChunkStore  (id = position)
//!          └─> FlatIndex   (brute-force L2 search)
//! ```
//!
//! The chunk store and the vector index grow only through [`RagIndex::add`],
//! which appends to both in one step; position `i` in one always refers to
//! position `i` in the other.
//!
//! ## Example
//!
//! ```no_run
//! use ragnote_vector_store::{AddRequest, HashEmbedder, IndexConfig, RagIndex};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> ragnote_vector_store::Result<()> {
//!     let config = IndexConfig::default();
//!     let embedder = Arc::new(HashEmbedder::new(384, config.precision));
//!     let mut index = RagIndex::new(config, embedder).await?;
//!
//!     index
//!         .add(AddRequest::new().text("some paragraph long enough to keep").label("notes"))
//!         .await?;
//!
//!     for id in index.search("paragraph", 5).await? {
//!         let chunk = index.retrieve(id)?;
//!         println!("{id}: [{}] {}", chunk.label, chunk.text);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod config;
mod embedder;
mod error;
mod flat_index;
mod index;
mod store;

pub use config::IndexConfig;
pub use embedder::{Embedder, HashEmbedder, Precision};
pub use error::{Result, VectorStoreError};
pub use flat_index::FlatIndex;
pub use index::{AddRequest, RagIndex};
pub use store::ChunkStore;

// Re-export chunker types for convenience
pub use ragnote_chunker::{Chunk, ChunkerConfig, Source, DEFAULT_LABEL};
